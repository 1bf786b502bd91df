//! Output formatting for CLI

use crate::pipeline::{PipelineReport, PipelineStage};

/// One status line per artifact, in the order the run produced them
pub fn format_report(report: &PipelineReport) -> Vec<String> {
    let mut lines = Vec::new();
    for stage in &report.stages {
        match (&stage.artifact, stage.skipped) {
            (Some(path), _) => lines.push(format!("{} created.", path.display())),
            (None, true) if stage.stage == PipelineStage::Render => {
                lines.push("No .rst file created.".to_string())
            }
            _ => {}
        }
    }
    lines
}

/// Verbose per-stage summary
pub fn format_stage_summary(report: &PipelineReport) -> String {
    let mut output = String::new();
    output.push_str("Stages:\n");
    for stage in &report.stages {
        let status = if stage.skipped { "skipped" } else { "completed" };
        output.push_str(&format!(
            "  - {} ({}): {} ({}ms)\n",
            stage.stage.name(),
            stage.stage.description(),
            status,
            stage.duration_ms
        ));
    }

    let items: Vec<String> = report
        .document
        .items()
        .map(|item| format!("{} ({} columns)", item.name, item.contains.len()))
        .collect();
    output.push_str(&format!(
        "{}: {}\n",
        report.document.item_descriptor,
        items.join(", ")
    ));
    output
}
