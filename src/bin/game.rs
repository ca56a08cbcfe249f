use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use winit::event_loop::{ControlFlow, EventLoop};

use moving_box::app::{App, AppConfig};
use moving_box::{build_info, health, logging};

#[derive(Parser, Debug)]
#[command(name = "game", version)]
#[command(about = "Move the box with the arrow keys; click or scroll on it to resize")]
struct Cli {
    /// Configuration profile (config/<PROFILE>.toml)
    #[arg(long, env = "APP_PROFILE", default_value = "release")]
    profile: String,

    /// Run the health checks, print the report and exit
    #[arg(long)]
    health_check: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging needs the config, so a load failure is reported after init
    let (config, load_error) = match AppConfig::load(&cli.profile) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::with_defaults(&cli.profile), Some(e)),
    };

    logging::init(&config.logging)?;

    if let Some(e) = load_error {
        warn!(profile = %cli.profile, error = %e, "Failed to load config, using defaults");
    }

    info!(
        version = %build_info::version_string(),
        git = %build_info::git_sha_short(),
        "moving-box"
    );

    if cli.health_check {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    config
        .validate()
        .with_context(|| format!("invalid configuration for profile '{}'", cli.profile))?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("event loop failed")?;

    info!("Exited cleanly");
    Ok(())
}
