//! # Ephem Resilience Self-Check Binary
//!
//! Drives one failure of each representative class through the
//! dispatcher and prints the resulting diagnostics, so an operator can
//! verify the fallback paths on a deployed configuration.
//!
//! # Usage
//!
//! ```bash
//! # Run against the default config path
//! ephem_resilience
//!
//! # Explicit config, verbose logging
//! ephem_resilience --config config/ephem.toml -v
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ephem_common::prelude::*;
use ephem_resilience::{DiagnosticsLog, FallbackDispatcher};

/// Ephemeris pipeline resilience self-check
#[derive(Parser, Debug)]
#[command(name = "ephem_resilience")]
#[command(version)]
#[command(about = "Exercises the fallback paths of the ephemeris resilience core")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = ephem_common::consts::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging (overrides the configured level).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let config = match ResilienceConfig::load(&args.config) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound) => {
            let config = ResilienceConfig::default();
            eprintln!(
                "config {} not found, using defaults",
                args.config.display()
            );
            config
        }
        Err(e) => {
            eprintln!("failed to load config {}: {e}", args.config.display());
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("invalid config: {e}");
        std::process::exit(1);
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.shared.log_level.as_filter_str())
    };
    tracing_subscriber::fmt().compact().with_env_filter(filter).init();

    info!(service = %config.shared.service_name, "resilience self-check starting");

    let log = Arc::new(Mutex::new(DiagnosticsLog::new()));
    let dispatcher = FallbackDispatcher::new(log, config.diagnostics.retain_source_detail);

    run_checks(&dispatcher);

    let stats = dispatcher.stats();
    info!(
        total = stats.total,
        lifetime = stats.lifetime_total,
        "self-check complete"
    );
    for (kind, count) in &stats.by_kind {
        info!("  {kind}: {count}");
    }
}

/// One raise per representative failure class, covering the resolved,
/// double-fault, and fatal paths.
fn run_checks(dispatcher: &FallbackDispatcher) {
    // Resolved: nutation skip with partial data.
    let raw = ephem_common::quantity::epoch_mean_angles();
    match dispatcher.raise(
        FailureKind::Nutation,
        ErrorDescriptor::new("nutation series unavailable"),
        FailureContext::new().with_raw_data(raw),
    ) {
        Ok(result) => info!(resolved_by = ?result.resolved_by, "nutation check passed"),
        Err(e) => error!("nutation check unexpectedly fatal: {e}"),
    }

    // Resolved: timezone from longitude.
    match dispatcher.raise(
        FailureKind::Timezone,
        ErrorDescriptor::new("tz database lookup failed"),
        FailureContext::new().with_longitude(13.4),
    ) {
        Ok(result) => info!(message = %result.message, "timezone check passed"),
        Err(e) => error!("timezone check unexpectedly fatal: {e}"),
    }

    // Double fault: precision already at the floor.
    match dispatcher.raise(
        FailureKind::Precision,
        ErrorDescriptor::new("series truncated below tolerance"),
        FailureContext::new().with_precision(PrecisionLevel::Minimal),
    ) {
        Ok(result) if !result.success => {
            info!("precision double-fault absorbed as default result");
        }
        Ok(_) => warn!("precision check resolved unexpectedly"),
        Err(e) => error!("precision check unexpectedly fatal: {e}"),
    }

    // Fatal: time base failure has no fallback.
    match dispatcher.raise(
        FailureKind::TimeBase,
        ErrorDescriptor::new("delta-T table exhausted"),
        FailureContext::new(),
    ) {
        Err(fatal) => info!(kind = %fatal.kind, "fatal path verified"),
        Ok(_) => warn!("time base check should have been fatal"),
    }
}
