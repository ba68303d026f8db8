//! # Bubble Sim
//!
//! Headless runner for NPC tether scenarios.
//!
//! Usage: `bubble-sim [scenario.toml] [--dump-gizmos]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod scenario;

use anyhow::Result;
use bubble_tools::{gizmos_to_json, NpcDebugOverlayConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::SimConfig;
use crate::scenario::Simulation;

/// Default scenario file name.
const SCENARIO_FILE: &str = "bubble-sim.toml";

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("bubble=info".parse()?))
        .init();

    info!("Bubble sim starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut path = SCENARIO_FILE.to_string();
    let mut dump_gizmos = false;
    for arg in std::env::args().skip(1) {
        if arg == "--dump-gizmos" {
            dump_gizmos = true;
        } else {
            path = arg;
        }
    }

    let config = SimConfig::load_from(&path)?;
    let mut sim = Simulation::new(config)?;
    let summary = sim.run();

    info!(
        ticks = summary.ticks,
        transitions = summary.transitions,
        events = summary.events_delivered,
        "Simulation finished"
    );
    for (name, state) in &summary.final_states {
        info!("{name}: {}", state.display_name());
    }

    if dump_gizmos {
        let gizmos = sim.gizmos(&NpcDebugOverlayConfig::default());
        println!("{}", gizmos_to_json(&gizmos)?);
    }

    Ok(())
}
