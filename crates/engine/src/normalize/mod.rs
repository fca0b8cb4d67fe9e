//! Assembles the canonical [`ResultRecord`] from one stage's agent output.

mod cost;

use std::time::Duration;

use chrono::Utc;

use agentflow_common::ids::ResultId;
use agentflow_common::types::{
    AnalysisRequest, Confidence, DataQuality, DetailedAnalysis, Metrics, RawAgentOutput,
    ResultRecord, Source,
};

use crate::extract;

pub use cost::{estimate_cost, BASE_COST, LARGE_INPUT_CHARS, LARGE_INPUT_MULTIPLIER};

pub const SUMMARY_MAX_CHARS: usize = 500;
pub const ELLIPSIS: &str = "...";

/// Output longer than this counts as a detailed answer.
const DETAILED_OUTPUT_CHARS: usize = 500;
const SCORE_DETAILED: u8 = 85;
const SCORE_BRIEF: u8 = 70;

const CANNED_SUMMARY: &str = "The analysis produced no narrative text. The metrics and \
recommendations below are defaults; run the analysis again once the agent engine is \
available for a company-specific report.";

const DEFAULT_NEXT_STEPS: [&str; 3] = [
    "Review the detailed analysis produced by the agents",
    "Implement the prioritized recommendations",
    "Monitor results and adjust the strategy",
];

/// Build a fully populated record from a stage's output.
///
/// `source` is taken from the caller and never inferred from the text.
/// An error output is treated as empty text.
pub fn normalize(
    raw: RawAgentOutput,
    request: &AnalysisRequest,
    source: Source,
    elapsed: Duration,
) -> ResultRecord {
    let text = raw.into_text();
    let detailed = text.chars().count() > DETAILED_OUTPUT_CHARS;
    let scan = Some(text.as_str());

    let metrics = Metrics {
        overall_score: if detailed { SCORE_DETAILED } else { SCORE_BRIEF },
        confidence: if detailed {
            Confidence::High
        } else {
            Confidence::Medium
        },
        data_quality: data_quality_for(source),
        risk_level: extract::extract_risk_level(scan),
        growth_potential: extract::extract_growth_potential(scan),
    };

    ResultRecord {
        id: ResultId::new(),
        success: !matches!(source, Source::ErrorStub),
        source,
        executive_summary: executive_summary(&text),
        metrics,
        recommendations: extract::extract_recommendations(scan),
        next_steps: DEFAULT_NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        analysis: DetailedAnalysis {
            methodology: source.label().to_string(),
            agents_used: request
                .analysis_type()
                .agents()
                .iter()
                .map(|a| a.to_string())
                .collect(),
        },
        swot: None,
        raw_output: text,
        estimated_cost: estimate_cost(request),
        processing_time_label: processing_time_label(elapsed),
        diagnostic: None,
        generated_at: Utc::now(),
    }
}

/// First 500 characters of the text, with an ellipsis when cut.
/// Empty text gets the canned paragraph.
pub fn executive_summary(text: &str) -> String {
    if text.is_empty() {
        return CANNED_SUMMARY.to_string();
    }

    match text.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

fn data_quality_for(source: Source) -> DataQuality {
    match source {
        Source::RealEngine => DataQuality::Good,
        Source::CachedExample => DataQuality::Fair,
        Source::SyntheticSimulation => DataQuality::Simulated,
        Source::ErrorStub => DataQuality::Unavailable,
    }
}

/// Human-readable duration, e.g. "< 1 second", "42.3 seconds", "2 min 5 s".
pub fn processing_time_label(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        "< 1 second".to_string()
    } else if secs < 60.0 {
        format!("{:.1} seconds", secs)
    } else {
        let whole = elapsed.as_secs();
        format!("{} min {} s", whole / 60, whole % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentflow_common::types::{AnalysisType, UpstreamErrorCode};

    fn request() -> AnalysisRequest {
        AnalysisRequest::builder("Home Value Store")
            .industry("Retail")
            .analysis_type(AnalysisType::Digital)
            .build()
    }

    #[test]
    fn test_summary_short_text_unchanged() {
        let text = "a".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(executive_summary(&text), text);
    }

    #[test]
    fn test_summary_truncated_with_ellipsis() {
        let text = "b".repeat(SUMMARY_MAX_CHARS + 1);
        let summary = executive_summary(&text);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + ELLIPSIS.len());
        assert!(summary.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_summary_respects_char_boundaries() {
        let text = "é".repeat(SUMMARY_MAX_CHARS + 20);
        let summary = executive_summary(&text);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
    }

    #[test]
    fn test_summary_empty_is_canned() {
        assert_eq!(executive_summary(""), CANNED_SUMMARY);
    }

    #[test]
    fn test_summary_whitespace_kept_verbatim() {
        assert_eq!(executive_summary("  \n "), "  \n ");
    }

    #[test]
    fn test_detailed_output_scores_high() {
        let text = format!(
            "{}\nStrategic recommendations:\n1. Launch an online store with same-day pickup",
            "Market overview. ".repeat(40)
        );
        let record = normalize(
            RawAgentOutput::Text(text.clone()),
            &request(),
            Source::RealEngine,
            Duration::from_secs(42),
        );

        assert!(record.success);
        assert_eq!(record.source, Source::RealEngine);
        assert_eq!(record.metrics.overall_score, SCORE_DETAILED);
        assert_eq!(record.metrics.confidence, Confidence::High);
        assert_eq!(record.metrics.data_quality, DataQuality::Good);
        assert_eq!(
            record.recommendations,
            vec!["Launch an online store with same-day pickup"]
        );
        assert_eq!(record.raw_output, text);
        assert_eq!(record.estimated_cost, 0.30);
        assert_eq!(record.processing_time_label, "42.0 seconds");
        assert_eq!(record.analysis.agents_used.len(), 3);
    }

    #[test]
    fn test_brief_output_scores_low() {
        let record = normalize(
            RawAgentOutput::Text("Short answer.".into()),
            &request(),
            Source::CachedExample,
            Duration::from_millis(10),
        );
        assert_eq!(record.metrics.overall_score, SCORE_BRIEF);
        assert_eq!(record.metrics.confidence, Confidence::Medium);
        assert_eq!(record.metrics.data_quality, DataQuality::Fair);
        assert_eq!(record.executive_summary, "Short answer.");
        assert_eq!(record.processing_time_label, "< 1 second");
    }

    #[test]
    fn test_error_output_is_fully_populated() {
        let record = normalize(
            RawAgentOutput::Error(UpstreamErrorCode::Failure),
            &request(),
            Source::ErrorStub,
            Duration::ZERO,
        );
        assert!(!record.success);
        assert_eq!(record.raw_output, "");
        assert_eq!(record.executive_summary, CANNED_SUMMARY);
        assert_eq!(record.recommendations.len(), extract::MAX_RECOMMENDATIONS);
        assert!(!record.next_steps.is_empty());
    }

    #[test]
    fn test_processing_time_label_minutes() {
        assert_eq!(processing_time_label(Duration::from_secs(125)), "2 min 5 s");
    }
}
