//! Graphics backend health check

use std::collections::BTreeSet;

use crate::health::check::{CheckResult, SystemCheck};

/// Checks that wgpu can see at least one adapter to draw the game with
pub struct GraphicsBackendCheck;

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        details.push("  ✓ wgpu instance created".to_string());

        let adapters = instance.enumerate_adapters(wgpu::Backends::all());

        // Headless machines (CI) have none
        if adapters.is_empty() {
            details.push("  ⚠ No graphics adapters found".to_string());
            return CheckResult::warn("No graphics adapter; the game window cannot start")
                .with_details(details.join("\n"));
        }

        let mut has_hardware = false;
        let mut backends = BTreeSet::new();
        for (i, adapter) in adapters.iter().enumerate() {
            let info = adapter.get_info();
            backends.insert(format!("{:?}", info.backend));
            has_hardware |= matches!(
                info.device_type,
                wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu
            );
            details.push(format!(
                "    [{i}] {} - {:?} ({:?})",
                info.name, info.device_type, info.backend
            ));
        }
        details.push(format!(
            "  Backends available: {}",
            backends.into_iter().collect::<Vec<_>>().join(", ")
        ));

        if has_hardware {
            CheckResult::pass(format!("{} adapter(s) found", adapters.len()))
                .with_details(details.join("\n"))
        } else {
            CheckResult::warn(format!(
                "{} adapter(s) found (no hardware GPU detected)",
                adapters.len()
            ))
            .with_details(details.join("\n"))
        }
    }
}
