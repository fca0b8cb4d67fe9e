use chrono::Utc;

use agentflow_common::ids::ResultId;
use agentflow_common::types::{
    AnalysisRequest, Confidence, DataQuality, DetailedAnalysis, GrowthPotential, Metrics,
    ResultRecord, RiskLevel, Source,
};

const STUB_RECOMMENDATIONS: [&str; 3] = [
    "Provide the company name and the remaining profile fields",
    "Submit the analysis again",
    "Contact support if the problem persists",
];

/// Minimal failed result for a request that cannot be analysed.
///
/// A pure function of its inputs; it cannot fail.
pub fn error_stub(request: &AnalysisRequest, diagnostic: &str) -> ResultRecord {
    let name = if request.company_name().trim().is_empty() {
        "the requested company"
    } else {
        request.company_name()
    };

    ResultRecord {
        id: ResultId::new(),
        success: false,
        source: Source::ErrorStub,
        executive_summary: format!("No analysis could be produced for {}: {}", name, diagnostic),
        metrics: Metrics {
            overall_score: 0,
            confidence: Confidence::Low,
            data_quality: DataQuality::Unavailable,
            risk_level: RiskLevel::Low,
            growth_potential: GrowthPotential::Medium,
        },
        recommendations: STUB_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        next_steps: vec!["Correct the request and run the analysis again".to_string()],
        analysis: DetailedAnalysis {
            methodology: Source::ErrorStub.label().to_string(),
            agents_used: Vec::new(),
        },
        swot: None,
        raw_output: String::new(),
        estimated_cost: 0.0,
        processing_time_label: "< 1 second".to_string(),
        diagnostic: Some(diagnostic.to_string()),
        generated_at: Utc::now(),
    }
}
