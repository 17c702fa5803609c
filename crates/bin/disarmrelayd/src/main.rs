//! # disarmrelayd — disarmrelay daemon
//!
//! Composition root that wires the adapters together and runs the plugin.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Construct the host-side adapters (the simulated host stands in for the
//!   real accessory host, which owns the ports in production)
//! - Construct application services, injecting adapters via port traits
//! - Run discovery reconciliation on the host's ready signal
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use disarmrelay_adapter_http_reqwest::ReqwestDisarmClient;
use disarmrelay_adapter_virtual::{VirtualHost, simulated_alarm};
use disarmrelay_app::services::discovery::DiscoveryCoordinator;
use disarmrelay_app::services::executor::DisarmExecutor;
use disarmrelay_app::services::pipeline::DisarmPipeline;
use disarmrelay_app::services::resolver::AlarmResolver;
use disarmrelay_app::services::trigger::TriggerSwitch;

use config::{Config, StrategyKind};

/// Display name of the seeded alarm when none is configured.
const DEFAULT_SIMULATED_ALARM: &str = "Somfy Home Alarm";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Host-side ports. In production the accessory host implements these;
    // the simulated host stands in so the daemon runs self-contained.
    let mut host = VirtualHost::new();
    if config.alarm.strategy == StrategyKind::Bridge {
        host = host.with_bridge_access();
    }
    if config.simulation.seed_alarm {
        let name = if config.alarm.name.is_empty() {
            DEFAULT_SIMULATED_ALARM
        } else {
            config.alarm.name.as_str()
        };
        host = host.with_accessory(simulated_alarm(name));
        tracing::info!(alarm = name, "seeded simulated alarm accessory");
    }

    // Services
    let resolver = AlarmResolver::new(host.clone(), config.strategy());
    let executor = DisarmExecutor::new(host.clone(), ReqwestDisarmClient::new());
    let pipeline = DisarmPipeline::new(resolver, executor);

    // Discovery runs on the host's ready signal; the simulated host is
    // ready as soon as it exists.
    let coordinator = DiscoveryCoordinator::new(host.clone());
    let accessory = coordinator
        .reconcile()
        .await
        .context("reconciling trigger accessory")?;

    let switch = TriggerSwitch::new(pipeline, host.clone());
    tracing::info!(
        accessory = %accessory.display_name,
        on = switch.get_on(),
        "trigger switch ready; waiting for host events"
    );

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    tracing::info!("shutting down");
    Ok(())
}
