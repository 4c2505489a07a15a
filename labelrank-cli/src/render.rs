//! Report rendering for terminal and file output.

use labelrank_eval::config::OutputConfig;
use labelrank_eval::{EvaluationReport, METRIC_NAMES, OutputFormat};
use std::fmt::Write;

/// Render a report according to the output configuration.
///
/// JSON without per-document rows is the plain six-key metric object.
pub fn render_report(report: &EvaluationReport, output: &OutputConfig) -> anyhow::Result<String> {
    match output.format {
        OutputFormat::Json if output.per_document => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.metrics.to_map())?),
        OutputFormat::Table => Ok(render_table(report, output.per_document, output.precision)),
    }
}

fn render_table(report: &EvaluationReport, per_document: bool, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} documents, {} labels, {} predictions",
        report.documents, report.labels, report.predictions
    );
    let _ = writeln!(out);
    for (name, value) in METRIC_NAMES.iter().zip(report.metrics.values()) {
        let _ = writeln!(out, "{:<8} {:.*}", name, precision, value);
    }

    if per_document && !report.per_document.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>10} {:>4} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "doc_id", "rel", "ap", "rr", "ndcg", "r_prec", "p_at_3", "p_at_5"
        );
        for doc in &report.per_document {
            let s = &doc.scores;
            let _ = writeln!(
                out,
                "{:>10} {:>4} {:>8.p$} {:>8.p$} {:>8.p$} {:>8.p$} {:>8.p$} {:>8.p$}",
                doc.doc_id,
                s.relevant,
                s.average_precision,
                s.reciprocal_rank,
                s.ndcg,
                s.r_prec,
                s.p_at_3,
                s.p_at_5,
                p = precision
            );
        }
    }

    out.trim_end().to_string()
}
