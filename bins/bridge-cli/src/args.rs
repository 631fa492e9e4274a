// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface and preference overrides.

use bridge_app_core::prefs::{BoundaryMode, BridgePrefs, TrackingOrigin};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "guardian-bridge")]
#[command(author, version, about = "Copy a guardian boundary into a chaperone configuration")]
pub struct Cli {
    /// Directory holding saved prefs and the chaperone store (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the guardian walls into the chaperone configuration
    Sync(RunArgs),
    /// Commit an empty set of collision bounds
    Clear(RunArgs),
    /// Read and reconcile the boundary, print the staged plan, touch nothing
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Captured guardian boundary snapshot (JSON)
    pub snapshot: PathBuf,
    #[command(flatten)]
    pub overrides: Overrides,
    /// Wait before the destination shuts down, in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,
    /// Collision-bounds colour alpha written after commit
    #[arg(long)]
    pub alpha: Option<i32>,
    /// Persist the effective preferences
    #[arg(long)]
    pub save_prefs: bool,
    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Captured guardian boundary snapshot (JSON)
    pub snapshot: PathBuf,
    #[command(flatten)]
    pub overrides: Overrides,
    /// Plan a cleared boundary instead of the guardian walls
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Wall height in metres
    #[arg(long)]
    pub wall_height: Option<f32>,
    /// Tracking origin the source reports points in
    #[arg(long, value_enum)]
    pub tracking_origin: Option<OriginArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OriginArg {
    EyeLevel,
    FloorLevel,
}

impl From<OriginArg> for TrackingOrigin {
    fn from(value: OriginArg) -> Self {
        match value {
            OriginArg::EyeLevel => Self::EyeLevel,
            OriginArg::FloorLevel => Self::FloorLevel,
        }
    }
}

impl Overrides {
    fn apply(&self, prefs: &mut BridgePrefs) {
        if let Some(h) = self.wall_height {
            prefs.wall_height = h;
        }
        if let Some(o) = self.tracking_origin {
            prefs.tracking_origin = o.into();
        }
    }
}

impl RunArgs {
    /// Stored prefs with this invocation's flags layered on top.
    pub fn effective_prefs(&self, stored: BridgePrefs) -> BridgePrefs {
        let mut prefs = stored;
        self.overrides.apply(&mut prefs);
        if let Some(ms) = self.settle_ms {
            prefs.settle_delay_ms = ms;
        }
        if let Some(a) = self.alpha {
            prefs.bounds_alpha = a;
        }
        prefs
    }
}

impl PlanArgs {
    /// Stored prefs with this invocation's flags layered on top.
    pub fn effective_prefs(&self, stored: BridgePrefs) -> BridgePrefs {
        let mut prefs = stored;
        self.overrides.apply(&mut prefs);
        prefs
    }

    /// Mode the plan is built for.
    pub fn mode(&self) -> BoundaryMode {
        if self.clear {
            BoundaryMode::ClearBoundary
        } else {
            BoundaryMode::WriteBoundary
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn sync_flags_override_stored_prefs() {
        let cli = parse(&[
            "guardian-bridge",
            "sync",
            "room.json",
            "--wall-height",
            "3",
            "--tracking-origin",
            "floor-level",
            "--settle-ms",
            "0",
            "--alpha",
            "40",
        ]);
        let Command::Sync(run) = cli.command else {
            panic!("expected sync");
        };
        let prefs = run.effective_prefs(BridgePrefs::default());
        assert!((prefs.wall_height - 3.0).abs() < f32::EPSILON);
        assert_eq!(prefs.tracking_origin, TrackingOrigin::FloorLevel);
        assert_eq!(prefs.settle_delay_ms, 0);
        assert_eq!(prefs.bounds_alpha, 40);
    }

    #[test]
    fn absent_flags_keep_stored_values() {
        let cli = parse(&["guardian-bridge", "clear", "room.json"]);
        let Command::Clear(run) = cli.command else {
            panic!("expected clear");
        };
        let stored = BridgePrefs {
            wall_height: 2.0,
            bounds_alpha: 12,
            ..BridgePrefs::default()
        };
        let prefs = run.effective_prefs(stored.clone());
        assert_eq!(prefs, stored);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = parse(&[
            "guardian-bridge",
            "plan",
            "room.json",
            "--clear",
            "-v",
            "--store-dir",
            "/tmp/x",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/x")));
        let Command::Plan(plan) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(plan.mode(), BoundaryMode::ClearBoundary);
    }

    #[test]
    fn plan_defaults_to_writing_walls() {
        let cli = parse(&["guardian-bridge", "plan", "room.json"]);
        let Command::Plan(plan) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(plan.mode(), BoundaryMode::WriteBoundary);
    }

    #[test]
    fn snapshot_is_required() {
        assert!(Cli::try_parse_from(["guardian-bridge", "sync"]).is_err());
    }
}
