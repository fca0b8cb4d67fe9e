//! PDF rendering of a [`ResultRecord`].
//!
//! The report is described as a flat list of [`Block`]s and then laid out by
//! [`pdf`], which owns fonts, wrapping and pagination.

mod pdf;

use agentflow_common::types::{AnalysisRequest, ResultRecord};
use agentflow_common::AgentFlowError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF encoding error: {0}")]
    Encode(String),

    #[error("PDF write error: {0}")]
    Write(String),
}

impl From<ReportError> for AgentFlowError {
    fn from(e: ReportError) -> Self {
        AgentFlowError::Report(e.to_string())
    }
}

/// One unit of report content, in reading order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Block {
    Title(String),
    Heading(String),
    Paragraph(String),
    /// Bold body line, e.g. a subheading inside agent text.
    Strong(String),
    /// Label and value on one line, label in bold.
    Row(String, String),
    /// Indented item with its own marker, e.g. "1." or "-".
    Item(String, String),
    /// Small print.
    Note(String),
    Spacer(f32),
    PageBreak,
}

/// Render the record as a standalone PDF document.
///
/// The returned bytes always start with `%PDF-`.
pub fn render_pdf(
    record: &ResultRecord,
    request: &AnalysisRequest,
) -> Result<Vec<u8>, ReportError> {
    let blocks = build_blocks(record, request);
    let title = format!("Business analysis report - {}", request.company_name());
    let bytes = pdf::write_document(&blocks, &title)?;

    tracing::debug!(
        result_id = %record.id,
        bytes = bytes.len(),
        source = record.source.as_str(),
        "PDF report rendered"
    );
    metrics::counter!("report.rendered", "source" => record.source.as_str()).increment(1);

    Ok(bytes)
}

const MAX_SWOT_ENTRIES: usize = 5;

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Agent text line by line. Markdown headings and fully bold lines become
/// [`Block::Strong`]; blank lines are dropped.
fn agent_text_blocks(text: &str) -> Vec<Block> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with('#') {
                return Block::Strong(line.trim_start_matches('#').trim().to_string());
            }
            match line.strip_prefix("**").and_then(|l| l.strip_suffix("**")) {
                Some(inner) if !inner.trim().is_empty() => Block::Strong(inner.trim().to_string()),
                _ => Block::Paragraph(line.to_string()),
            }
        })
        .collect()
}

pub(crate) fn build_blocks(record: &ResultRecord, request: &AnalysisRequest) -> Vec<Block> {
    let mut blocks = Vec::new();

    // Cover
    blocks.push(Block::Spacer(120.0));
    blocks.push(Block::Title("BUSINESS ANALYSIS REPORT".into()));
    blocks.push(Block::Title(or_na(request.company_name())));
    blocks.push(Block::Spacer(48.0));
    for (label, value) in [
        ("Company", or_na(request.company_name())),
        ("Industry", or_na(request.industry())),
        ("Location", or_na(request.location())),
        ("Analysis type", request.analysis_type().display_name().to_string()),
        ("Analysis date", record.generated_at.format("%d/%m/%Y").to_string()),
        ("Analysis cost", format!("${:.2}", record.estimated_cost)),
        ("Processing time", record.processing_time_label.clone()),
        ("Methodology", record.analysis.methodology.clone()),
    ] {
        blocks.push(Block::Row(label.into(), value));
    }
    if record.is_simulated() {
        blocks.push(Block::Spacer(24.0));
        blocks.push(Block::Paragraph(format!(
            "Note: {}. Figures in this report are not the output of a live multi-agent run.",
            record.source.label()
        )));
    }
    blocks.push(Block::PageBreak);

    // Executive summary
    blocks.push(Block::Heading("EXECUTIVE SUMMARY".into()));
    for para in record.executive_summary.split("\n\n") {
        let para = para.split_whitespace().collect::<Vec<_>>().join(" ");
        if !para.is_empty() {
            blocks.push(Block::Paragraph(para));
        }
    }
    blocks.push(Block::Spacer(12.0));

    // Metrics
    let m = &record.metrics;
    blocks.push(Block::Heading("KEY METRICS".into()));
    for (label, value) in [
        ("Overall score", format!("{}/100", m.overall_score)),
        ("Growth potential", m.growth_potential.label().to_string()),
        ("Risk level", m.risk_level.label().to_string()),
        ("Confidence", m.confidence.label().to_string()),
        ("Data quality", m.data_quality.label().to_string()),
    ] {
        blocks.push(Block::Row(label.into(), value));
    }
    blocks.push(Block::Spacer(12.0));

    blocks.push(Block::Heading("STRATEGIC RECOMMENDATIONS".into()));
    for (i, rec) in record.recommendations.iter().enumerate() {
        blocks.push(Block::Item(format!("{}.", i + 1), rec.clone()));
    }
    blocks.push(Block::Spacer(12.0));

    if let Some(swot) = &record.swot {
        blocks.push(Block::Heading("SWOT ANALYSIS".into()));
        for (label, entries) in swot.quadrants() {
            if entries.is_empty() {
                continue;
            }
            blocks.push(Block::Strong(label.to_uppercase()));
            for entry in entries.iter().take(MAX_SWOT_ENTRIES) {
                blocks.push(Block::Item("•".into(), entry.clone()));
            }
        }
        blocks.push(Block::Spacer(12.0));
    }

    blocks.push(Block::Heading("NEXT STEPS".into()));
    for step in &record.next_steps {
        blocks.push(Block::Item("-".into(), step.clone()));
    }

    if !record.analysis.agents_used.is_empty() {
        blocks.push(Block::Spacer(12.0));
        blocks.push(Block::Heading("AGENTS".into()));
        blocks.push(Block::Paragraph(record.analysis.agents_used.join(", ")));
    }

    if !record.raw_output.trim().is_empty() {
        blocks.push(Block::PageBreak);
        blocks.push(Block::Heading("DETAILED ANALYSIS".into()));
        blocks.extend(agent_text_blocks(&record.raw_output));
    }

    // Provenance
    blocks.push(Block::Spacer(24.0));
    blocks.push(Block::Note(format!(
        "Source: {} ({}). Result {} generated {}.",
        record.source.label(),
        record.source.as_str(),
        record.id,
        record.generated_at.format("%Y-%m-%d %H:%M UTC"),
    )));
    if let Some(diagnostic) = &record.diagnostic {
        blocks.push(Block::Note(format!("Diagnostic: {}", diagnostic)));
    }
    blocks.push(Block::Note("Generated by AgentFlow Manager".into()));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use agentflow_common::types::{RawAgentOutput, Source};

    use crate::chain::{error_stub, simulated_swot};
    use crate::normalize::normalize;

    fn request() -> AnalysisRequest {
        AnalysisRequest::builder("Home Value Store")
            .industry("Retail")
            .location("Texas")
            .build()
    }

    fn record(source: Source) -> ResultRecord {
        normalize(
            RawAgentOutput::from_text(
                "The company faces threats from online competitors.\n\
                 Strategic recommendations:\n\
                 1. Build a same-day delivery service for contractors"
                    .to_string(),
            ),
            &request(),
            source,
            Duration::from_secs(42),
        )
    }

    #[test]
    fn test_pdf_header() {
        let bytes = render_pdf(&record(Source::RealEngine), &request()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_error_stub_renders() {
        let stub = error_stub(&AnalysisRequest::builder("").build(), "company name is required");
        let bytes = render_pdf(&stub, &AnalysisRequest::builder("").build()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_simulated_record_is_labelled() {
        let blocks = build_blocks(&record(Source::SyntheticSimulation), &request());
        assert!(blocks.iter().any(|b| matches!(
            b,
            Block::Paragraph(p) if p.contains("Simulated analysis")
        )));

        let real = build_blocks(&record(Source::RealEngine), &request());
        assert!(!real.iter().any(|b| matches!(
            b,
            Block::Paragraph(p) if p.starts_with("Note:")
        )));
    }

    #[test]
    fn test_recommendations_are_numbered() {
        let blocks = build_blocks(&record(Source::RealEngine), &request());
        assert!(blocks.contains(&Block::Item(
            "1.".into(),
            "Build a same-day delivery service for contractors".into()
        )));
        assert!(blocks.contains(&Block::Row("Overall score".into(), "70/100".into())));
    }

    #[test]
    fn test_blank_fields_show_na() {
        let request = AnalysisRequest::builder("Acme").location("").build();
        let blocks = build_blocks(&record(Source::RealEngine), &request);
        assert!(blocks.contains(&Block::Row("Location".into(), "Unspecified".into())));
        assert_eq!(or_na("  "), "N/A");
    }

    #[test]
    fn test_detailed_analysis_from_agent_text() {
        let mut record = record(Source::RealEngine);
        record.raw_output =
            "## Market\nDemand is steady.\n\n**Key risk**\nOnline rivals.\n****".to_string();

        let blocks = build_blocks(&record, &request());
        let start = blocks
            .iter()
            .position(|b| *b == Block::Heading("DETAILED ANALYSIS".into()))
            .unwrap();
        assert_eq!(blocks[start - 1], Block::PageBreak);
        assert_eq!(
            blocks[start + 1..start + 6],
            [
                Block::Strong("Market".into()),
                Block::Paragraph("Demand is steady.".into()),
                Block::Strong("Key risk".into()),
                Block::Paragraph("Online rivals.".into()),
                Block::Paragraph("****".into()),
            ]
        );
    }

    #[test]
    fn test_no_detailed_analysis_without_agent_text() {
        let stub = error_stub(&request(), "company name is required");
        let blocks = build_blocks(&stub, &request());
        assert!(!blocks.contains(&Block::Heading("DETAILED ANALYSIS".into())));
        assert!(!blocks.contains(&Block::Heading("SWOT ANALYSIS".into())));
    }

    #[test]
    fn test_swot_section() {
        let mut record = record(Source::SyntheticSimulation);
        let mut swot = simulated_swot(&request());
        swot.weaknesses.clear();
        swot.threats = (1..=7).map(|i| format!("Threat {}", i)).collect();
        record.swot = Some(swot);

        let blocks = build_blocks(&record, &request());
        assert!(blocks.contains(&Block::Heading("SWOT ANALYSIS".into())));
        assert!(blocks.contains(&Block::Strong("STRENGTHS".into())));
        assert!(blocks.contains(&Block::Item("•".into(), "Solid positioning in Retail".into())));
        assert!(!blocks.contains(&Block::Strong("WEAKNESSES".into())));
        assert!(blocks.contains(&Block::Item("•".into(), "Threat 5".into())));
        assert!(!blocks.contains(&Block::Item("•".into(), "Threat 6".into())));

        let bytes = render_pdf(&record, &request()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
