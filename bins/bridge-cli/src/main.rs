// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! guardian-bridge
//!
//! Reads a captured guardian boundary, reconciles it into the chaperone
//! frame and commits it to the chaperone store in one pass.
#![allow(clippy::print_stdout)]

mod args;

use anyhow::{Context, Result};
use args::{Cli, Command, PlanArgs, RunArgs};
use bridge_app_core::config::{ConfigService, ConfigStore};
use bridge_app_core::prefs::{BoundaryMode, BridgePrefs, PREFS_KEY};
use bridge_config_fs::FsConfigStore;
use bridge_core::{plan_boundary, run_bridge, BridgeError, SettingsOutcome};
use bridge_runtime_fs::{SnapshotSource, StoreDestination};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let store = match &cli.store_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    }
    .context("open config store")?;
    info!(dir = %store.base().display(), "config store");

    match cli.command {
        Command::Sync(run) => sync(store, &run, BoundaryMode::WriteBoundary),
        Command::Clear(run) => sync(store, &run, BoundaryMode::ClearBoundary),
        Command::Plan(plan) => print_plan(&store, &plan),
    }
}

fn load_prefs<S: ConfigStore>(config: &ConfigService<S>) -> Result<BridgePrefs> {
    config
        .load_or_default(PREFS_KEY)
        .context("load saved preferences")
}

fn with_stage(err: BridgeError) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(format!("{stage} failed"))
}

fn sync(store: FsConfigStore, run: &RunArgs, mode: BoundaryMode) -> Result<()> {
    let config = ConfigService::new(store);
    let prefs = run.effective_prefs(load_prefs(&config)?);
    if run.save_prefs {
        config
            .save(PREFS_KEY, &prefs)
            .context("save preferences")?;
        info!("preferences saved");
    }

    let source = SnapshotSource::from_path(&run.snapshot);
    let destination = StoreDestination::new(config.into_inner());
    let report = run_bridge(&source, &destination, &prefs, mode).map_err(with_stage)?;

    if let SettingsOutcome::Failed(reason) = &report.settings {
        warn!(%reason, "boundary committed; colour setting not applied");
    }
    info!(
        origin = ?report.origin.to_array(),
        quads = report.commit.quads_committed,
        previous = ?report.commit.previous_quads,
        "done"
    );
    if run.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("encode report")?
        );
    }
    Ok(())
}

fn print_plan(store: &FsConfigStore, args: &PlanArgs) -> Result<()> {
    let prefs = args.effective_prefs(load_prefs(&ConfigService::new(store))?);
    let source = SnapshotSource::from_path(&args.snapshot);
    let plan = plan_boundary(&source, &prefs, args.mode()).map_err(with_stage)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("encode plan")?
    );
    Ok(())
}
