//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Formats a health check report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for (name, _, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n{}", format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = format!("\n{}\n", "Summary".bold().underline());
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));

    if report.warned > 0 {
        summary.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned));
    }
    if report.failed > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    let overall = match report.overall() {
        CheckStatus::Pass => "Overall: HEALTHY".green().bold(),
        CheckStatus::Warn => "Overall: HEALTHY (with warnings)".yellow().bold(),
        CheckStatus::Fail => "Overall: UNHEALTHY".red().bold(),
    };
    summary.push_str(&format!("\n  {overall}\n"));

    summary
}

/// Formats per-check details, headed by each check's description
pub fn format_details(report: &HealthCheckReport) -> String {
    let mut out = String::new();
    for (name, description, result) in &report.results {
        let Some(details) = &result.details else {
            continue;
        };
        out.push_str(&format!("\n{}", name.bold()));
        if let Some(description) = description {
            out.push_str(&format!(" - {description}"));
        }
        out.push('\n');
        out.push_str(details);
        out.push('\n');
    }
    out
}

/// Prints the report, then any per-check details, to stdout
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));
    print!("{}", format_details(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{CheckResult, HealthCheckRunner, SystemCheck};

    struct Detailed;

    impl SystemCheck for Detailed {
        fn name(&self) -> &'static str {
            "Detailed"
        }

        fn description(&self) -> Option<&'static str> {
            Some("Has details")
        }

        fn check(&self) -> CheckResult {
            CheckResult::warn("careful").with_details("  ✓ one\n  ⚠ two")
        }
    }

    #[test]
    fn test_report_lists_checks_and_summary() {
        colored::control::set_override(false);
        let report = HealthCheckRunner::new().add_check(Detailed).run();

        let text = format_report(&report);
        assert!(text.contains("Detailed"));
        assert!(text.contains("WARN"));
        assert!(text.contains("careful"));
        assert!(text.contains("Overall: HEALTHY (with warnings)"));

        let details = format_details(&report);
        assert!(details.contains("Detailed - Has details"));
        assert!(details.contains("  ⚠ two"));
    }
}
