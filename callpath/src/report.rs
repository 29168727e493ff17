//! Human-readable rendering of executions and batch summaries.

use serde::Serialize;

use crate::batch::BatchOutcome;
use crate::core::types::Shape;
use crate::driver::ExecutionRecord;
use crate::io::stack::StackSnapshot;
use crate::paths::registry::Registry;

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

/// Header printed before each execution's output.
pub fn render_execution(record: &ExecutionRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{RULE}\n"));
    out.push_str(&format!("EXECUTION #{}\n", record.seq));
    out.push_str(&format!("Selected: {}\n", record.path_name));
    out.push_str(&format!("Route: {}\n", record.frames.join(" > ")));
    out.push_str(&format!(
        "Depth: {} frames, {} us\n",
        record.frames.len(),
        record.elapsed_micros
    ));
    out.push_str(RULE);
    out
}

/// Stack snapshot listing, truncated to `shown` frames.
pub fn render_stack(snapshot: &StackSnapshot, shown: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n[STACK TRACE] depth: {} frames\n",
        snapshot.depth()
    ));
    out.push_str(&format!("{THIN_RULE}\n"));
    for frame in snapshot.frames.iter().take(shown) {
        out.push_str(&format!("  {frame}\n"));
    }
    if snapshot.depth() > shown {
        out.push_str(&format!(
            "  ... ({} more frames)\n",
            snapshot.depth() - shown
        ));
    }
    out.push_str(THIN_RULE);
    out
}

/// Usage statistics table for a finished batch.
pub fn render_summary(registry: &Registry, outcome: &BatchOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{RULE}\nPATH USAGE STATISTICS\n{RULE}\n"));
    for (id, count) in outcome.usage.iter() {
        let name = registry.describe(id).unwrap_or("<unregistered>");
        out.push_str(&format!("  {name}: {count} times\n"));
    }
    out.push_str(&format!("{THIN_RULE}\n"));
    out.push_str(&format!("executions: {}\n", outcome.usage.total()));
    out.push_str(&format!("distinct routes: {}", outcome.distinct_routes()));
    out
}

/// Machine-readable batch report for `--json`.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub paths: Vec<PathSummary>,
    pub executions: &'a [ExecutionRecord],
    pub distinct_routes: usize,
}

#[derive(Debug, Serialize)]
pub struct PathSummary {
    pub id: usize,
    pub name: &'static str,
    pub shape: Shape,
    pub count: u32,
}

impl<'a> BatchReport<'a> {
    pub fn new(registry: &Registry, outcome: &'a BatchOutcome) -> Self {
        let paths = registry
            .iter()
            .map(|path| PathSummary {
                id: path.id.index(),
                name: path.name,
                shape: path.shape,
                count: outcome.usage.get(path.id),
            })
            .collect();
        Self {
            paths,
            executions: &outcome.records,
            distinct_routes: outcome.distinct_routes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PathId, UsageCounters};
    use crate::io::stack::StackFrame;
    use chrono::Utc;

    fn record(seq: u64, path: usize, frames: Vec<&'static str>) -> ExecutionRecord {
        ExecutionRecord {
            seq,
            path: PathId::new(path),
            path_name: "Path A (Direct)",
            started_at: Utc::now(),
            elapsed_micros: 12,
            frames,
            payload_calls: 1,
            stack: None,
        }
    }

    #[test]
    fn execution_header_lists_route() {
        let text = render_execution(&record(2, 0, vec!["path_a::direct"]));
        assert!(text.contains("EXECUTION #2"));
        assert!(text.contains("Selected: Path A (Direct)"));
        assert!(text.contains("Route: path_a::direct"));
    }

    #[test]
    fn stack_listing_truncates_and_marks_unknown() {
        let snapshot = StackSnapshot {
            frames: (0..5)
                .map(|index| StackFrame {
                    index,
                    address: 0x1000 + index,
                    symbol: (index % 2 == 0).then(|| format!("frame_{index}")),
                })
                .collect(),
        };
        let text = render_stack(&snapshot, 3);
        assert!(text.contains("frame_0"));
        assert!(text.contains("<unknown>"));
        assert!(!text.contains("frame_4"));
        assert!(text.contains("... (2 more frames)"));
    }

    #[test]
    fn summary_lists_every_path_with_counts() {
        let registry = Registry::standard();
        let mut usage = UsageCounters::new(registry.count());
        usage.record(PathId::new(0));
        usage.record(PathId::new(0));
        let outcome = BatchOutcome {
            records: vec![
                record(1, 0, vec!["path_a::direct"]),
                record(2, 0, vec!["path_a::direct"]),
            ],
            usage,
        };

        let text = render_summary(&registry, &outcome);
        assert!(text.contains("Path A (Direct): 2 times"));
        assert!(text.contains("Path M (Branching - 5 levels): 0 times"));
        assert!(text.contains("executions: 2"));
        assert!(text.contains("distinct routes: 1"));

        let report = BatchReport::new(&registry, &outcome);
        assert_eq!(report.paths.len(), 13);
        assert_eq!(report.paths[0].count, 2);
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["executions"].as_array().map(Vec::len), Some(2));
    }
}
