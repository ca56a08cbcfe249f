//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that every shipped profile loads and describes a playable game
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads and validates each profile from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failures = 0;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => match config.validate() {
                    Ok(()) => details.push(format!(
                        "  ✓ Profile '{}': window {}x{}, box {}..={} step {}",
                        profile,
                        config.window.width,
                        config.window.height,
                        config.moving_box.min_half_size,
                        config.moving_box.max_half_size,
                        config.moving_box.resize_step
                    )),
                    Err(e) => {
                        details.push(format!("  ✗ Profile '{}': invalid - {}", profile, e));
                        failures += 1;
                    }
                },
                Err(e) => {
                    details.push(format!("  ✗ Profile '{}': failed to load - {}", profile, e));
                    failures += 1;
                }
            }
        }

        let details = details.join("\n");
        if failures > 0 {
            CheckResult::fail(format!("{} of {} profiles unusable", failures, self.profiles.len()))
                .with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
