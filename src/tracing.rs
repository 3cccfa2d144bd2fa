//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! structure resolution, layout restore, and native-state issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=drydock::resolve=trace` - scoped filtering
//! - `RUST_LOG=drydock::layout=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/drydock/logs/drydock.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::structure::{find_regions, DockArea, DockStructure};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var for filtering:
/// - `RUST_LOG=debug` - all debug logs
/// - `RUST_LOG=drydock::resolve=trace` - scoped filtering
/// - `RUST_LOG=drydock::layout=debug` - module-level filtering
///
/// File logging writes to `~/.config/drydock/logs/drydock.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "drydock.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of a structure's region shape for diffing
#[derive(Debug, Clone)]
pub struct StructureSnapshot {
    pub areas: Vec<AreaSnapshot>,
}

#[derive(Debug, Clone)]
pub struct AreaSnapshot {
    pub area: DockArea,
    pub regions: Vec<RegionInfo>,
}

#[derive(Debug, Clone)]
pub struct RegionInfo {
    pub ids: Vec<String>,
    pub active: usize,
}

impl StructureSnapshot {
    pub fn of(structure: &DockStructure) -> Self {
        Self {
            areas: DockArea::ALL
                .into_iter()
                .map(|area| AreaSnapshot {
                    area,
                    regions: structure
                        .area(area)
                        .map(|node| {
                            find_regions(node)
                                .into_iter()
                                .map(|region| RegionInfo {
                                    ids: region.ids().map(|id| id.to_string()).collect(),
                                    active: region.active,
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StructureSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for (before, after) in self.areas.iter().zip(&other.areas) {
            let label = before.area.label();

            if before.regions.len() != after.regions.len() {
                changes.push(format!(
                    "{}: {} regions → {}",
                    label,
                    before.regions.len(),
                    after.regions.len()
                ));
                continue;
            }

            for (i, (b, a)) in before.regions.iter().zip(&after.regions).enumerate() {
                if b.ids != a.ids {
                    changes.push(format!(
                        "{} #{}: [{}] → [{}]",
                        label,
                        i,
                        b.ids.join(", "),
                        a.ids.join(", ")
                    ));
                }
                if b.active != a.active {
                    changes.push(format!("{} #{}: active {} → {}", label, i, b.active, a.active));
                }
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::AreaSpec;

    fn sample() -> DockStructure {
        let mut structure = DockStructure::default();
        structure = structure
            .merge(DockStructure::build(DockArea::Left, &AreaSpec::tabs(["a", "b"])).unwrap())
            .unwrap();
        structure
            .merge(DockStructure::build(DockArea::Right, &AreaSpec::id("c")).unwrap())
            .unwrap()
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = StructureSnapshot::of(&sample());
        assert_eq!(snapshot.areas.len(), 4);
        assert_eq!(snapshot.areas[0].regions.len(), 1);
        assert_eq!(snapshot.areas[0].regions[0].ids, vec!["a", "b"]);
        assert_eq!(snapshot.areas[1].regions[0].ids, vec!["c"]);
        assert!(snapshot.areas[2].regions.is_empty());
    }

    #[test]
    fn test_diff_none_when_identical() {
        let structure = sample();
        let before = StructureSnapshot::of(&structure);
        let after = StructureSnapshot::of(&structure);
        assert!(before.diff(&after).is_none());
    }

    #[test]
    fn test_diff_reports_membership_change() {
        let before = StructureSnapshot::of(&sample());
        let mut changed = sample();
        changed.remove_id(&"b".into());
        let after = StructureSnapshot::of(&changed);

        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("left #0"), "diff was: {}", diff);
        assert!(diff.contains("[a, b]"), "diff was: {}", diff);
        assert!(diff.contains("[a]"), "diff was: {}", diff);
    }

    #[test]
    fn test_diff_reports_region_count_change() {
        let before = StructureSnapshot::of(&sample());
        let mut changed = sample();
        changed.take_area(DockArea::Right);
        let after = StructureSnapshot::of(&changed);

        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("right: 1 regions → 0"), "diff was: {}", diff);
    }
}
