//! Report and graph writers.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ciq_core::PlanRow;
use ciq_plan::GraphExport;

/// Write the report as delimited text with a header row.
pub fn write_rows<W: Write>(writer: W, rows: &[PlanRow], delimiter: u8) -> anyhow::Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv.write_record(PlanRow::HEADERS)?;
    for row in rows {
        csv.write_record(row.to_record())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_report(path: &Path, rows: &[PlanRow], delimiter: u8) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    write_rows(std::io::BufWriter::new(file), rows, delimiter)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

pub fn write_graph(path: &Path, graph: &GraphExport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(graph)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write link graph to {}", path.display()))
}

/// `plan.csv` -> `plan.graph.json`.
#[must_use]
pub fn graph_path_for(report: &Path) -> PathBuf {
    report.with_extension("graph.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciq_core::{PriorityTier, Role};
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<PlanRow> {
        vec![
            PlanRow {
                cluster_id: 0,
                role: Role::Pillar,
                keyword: "áo dài".into(),
                suggested_url: "/ao-dai".into(),
                link_target_url: String::new(),
                anchor_text: String::new(),
                intent: "Commercial".into(),
                volume: "500".into(),
                difficulty: "4".into(),
                score: 120.0,
                priority: PriorityTier::Highest,
            },
            PlanRow {
                cluster_id: 0,
                role: Role::Supporting,
                keyword: "áo dài, cách may".into(),
                suggested_url: "/ao-dai-cach-may".into(),
                link_target_url: "/ao-dai".into(),
                anchor_text: "áo dài".into(),
                intent: String::new(),
                volume: "1,200".into(),
                difficulty: String::new(),
                score: 0.0,
                priority: PriorityTier::Deprioritized,
            },
        ]
    }

    #[test]
    fn writes_header_and_quoted_cells() {
        let mut out = Vec::new();
        write_rows(&mut out, &rows(), b',').unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Cluster ID,Role,Keyword,Suggested URL,Link Target URL,Anchor Text,Intent,Volume,Difficulty,Score,Priority"
        );
        assert_eq!(
            lines[1],
            "0,Pillar Page,áo dài,/ao-dai,,,Commercial,500,4,120.0,highest priority"
        );
        assert_eq!(
            lines[2],
            "0,Cluster Content,\"áo dài, cách may\",/ao-dai-cach-may,/ao-dai,áo dài,,\"1,200\",,0.0,deprioritized"
        );
    }

    #[test]
    fn honours_delimiter() {
        let mut out = Vec::new();
        write_rows(&mut out, &rows()[..1], b';').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Cluster ID;Role;Keyword"));
    }

    #[test]
    fn report_and_graph_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("plan.csv");
        write_report(&report, &rows(), b',').unwrap();
        assert_eq!(std::fs::read_to_string(&report).unwrap().lines().count(), 3);

        let graph = graph_path_for(&report);
        assert_eq!(graph, dir.path().join("plan.graph.json"));
        write_graph(&graph, &GraphExport::default()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&graph).unwrap()).unwrap();
        assert_eq!(parsed["nodes"], serde_json::json!([]));
    }
}
