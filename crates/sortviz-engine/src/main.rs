//! Headless demo binary for the Sortviz animation engine.
//!
//! Wires together configuration, the run controller, and a tracing
//! frame sink, then runs one sort to completion. Any real front end
//! (desktop GUI, web page, terminal UI) replaces the sink and issues
//! the same controller calls.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `sortviz-config.yaml`
//! 3. Build the controller (generates the initial array)
//! 4. Resolve the demo algorithm by name
//! 5. Start the run with a tracing frame sink
//! 6. Wait for completion and log the run summary

mod error;
mod sink;

use std::path::PathBuf;
use std::time::Duration;

use sortviz_core::config::VisualizerConfig;
use sortviz_core::controller::SortController;
use sortviz_types::Algorithm;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::sink::TracingSink;

/// Default configuration file name, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "sortviz-config.yaml";

/// Application entry point for the demo engine.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the run fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("sortviz-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        array_size = config.array.size,
        min_value = config.array.min_value,
        max_value = config.array.max_value,
        seed = ?config.array.seed,
        step_delay_ms = config.pacing.step_delay_ms,
        demo_algorithm = config.demo.algorithm,
        "Configuration loaded"
    );

    // 3. Build the controller.
    let controller = SortController::new(&config)?;
    info!("Controller initialized");

    // 4. Resolve the demo algorithm.
    let algorithm =
        Algorithm::from_name(&config.demo.algorithm).ok_or_else(|| EngineError::UnknownAlgorithm {
            name: config.demo.algorithm.clone(),
        })?;

    // 5. Start the run.
    let run_id = controller
        .start(algorithm, Box::new(TracingSink::new()))
        .await
        .map_err(EngineError::from)?;
    info!(%run_id, %algorithm, "Demo run started");

    // 6. Wait for completion and report.
    let summary = controller.wait().await.map_err(EngineError::from)?;
    if let Some(summary) = summary {
        let frame = controller.snapshot().await;
        info!(
            run_id = %summary.run_id,
            algorithm = %summary.algorithm,
            status = ?summary.status,
            steps = summary.steps,
            elapsed_seconds = format!(
                "{:.2}",
                Duration::from_millis(summary.elapsed_ms).as_secs_f64()
            ),
            sorted = frame.values.is_sorted(),
            "Demo run finished"
        );
    } else {
        warn!("Demo run produced no summary");
    }

    Ok(())
}

/// Load configuration from `SORTVIZ_CONFIG` or the default path, falling
/// back to built-in defaults when no file exists.
fn load_config() -> Result<VisualizerConfig, EngineError> {
    let path = std::env::var("SORTVIZ_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = if path.exists() {
        VisualizerConfig::from_file(&path)?
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        VisualizerConfig::default()
    };
    config.validate()?;
    Ok(config)
}
