//! Integration tests for the health check system

use moving_box::health::{self, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 6);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(result.status.is_ok(), "Config check failed: {}", result.message);
}

#[test]
fn test_world_check() {
    let result = WorldCheck::new().check();
    assert!(result.status.is_ok(), "World check failed: {}", result.message);
    assert!(result.details.is_some_and(|d| d.contains("Edge guard")));
}

#[test]
fn test_debug_ui_check() {
    let result = DebugUICheck::new().check();
    assert!(result.status.is_ok(), "Debug UI check failed: {}", result.message);
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert!(result.status.is_ok(), "Build info check failed: {}", result.message);
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();
    assert!(result.status.is_ok(), "System info check failed: {}", result.message);
}

#[test]
fn test_graphics_backend_check() {
    // Warns rather than fails on machines without a GPU
    let result = GraphicsBackendCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Graphics backend check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(WorldCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(ConfigCheck::new()).run();

    let expected = if report.failed > 0 {
        1
    } else if report.warned > 0 {
        2
    } else {
        0
    };
    assert_eq!(report.exit_code(), expected);
}
