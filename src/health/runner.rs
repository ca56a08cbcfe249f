//! Runner that executes health checks and tallies the results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// (system name, description, result) in run order
    pub results: Vec<(String, Option<&'static str>, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    fn from_results(results: Vec<(String, Option<&'static str>, CheckResult)>) -> Self {
        let count = |status| results.iter().filter(|(.., r)| r.status == status).count();
        Self {
            total: results.len(),
            passed: count(CheckStatus::Pass),
            warned: count(CheckStatus::Warn),
            failed: count(CheckStatus::Fail),
            results,
        }
    }

    /// No check failed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Process exit code: 0 = all pass, 1 = any fail, 2 = warnings only
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }

    /// Worst status across all checks
    pub fn overall(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|(.., result)| result.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }
}

/// Orchestrates running health checks and collecting results
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs checks in the order they were added
    pub fn run(self) -> HealthCheckReport {
        let results = self
            .checks
            .into_iter()
            .map(|check| {
                let start = Instant::now();
                let result = check.check().with_duration(start.elapsed());

                match result.status {
                    CheckStatus::Pass => {
                        debug!(check = check.name(), duration = ?result.duration, "Health check passed")
                    }
                    status => {
                        warn!(check = check.name(), %status, message = %result.message, "Health check")
                    }
                }

                (check.name().to_string(), check.description(), result)
            })
            .collect();

        HealthCheckReport::from_results(results)
    }
}

impl Default for HealthCheckRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("hmm"),
                CheckStatus::Fail => CheckResult::fail("broken"),
            }
        }
    }

    #[test]
    fn test_empty_runner_is_healthy() {
        let report = HealthCheckRunner::new().run();
        assert_eq!(report.total, 0);
        assert!(report.is_healthy());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.overall(), CheckStatus::Pass);
    }

    #[test]
    fn test_counts_and_exit_codes() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();
        assert_eq!((report.passed, report.warned, report.failed), (1, 1, 0));
        assert_eq!(report.exit_code(), 2);
        assert!(report.is_healthy());

        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Warn))
            .add_check(Fixed("b", CheckStatus::Fail))
            .run();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.overall(), CheckStatus::Fail);
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_results_keep_run_order() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("first", CheckStatus::Pass))
            .add_check(Fixed("second", CheckStatus::Pass))
            .run();
        let names: Vec<_> = report.results.iter().map(|(name, ..)| name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
