use agentflow_common::types::AnalysisRequest;

/// Cost of a market analysis, in USD.
pub const BASE_COST: f64 = 0.10;
/// Free-text fields longer than this make the run more expensive.
pub const LARGE_INPUT_CHARS: usize = 500;
pub const LARGE_INPUT_MULTIPLIER: f64 = 1.5;

/// Deterministic cost estimate for a request, rounded to cents.
pub fn estimate_cost(request: &AnalysisRequest) -> f64 {
    let mut cost = BASE_COST * request.analysis_type().cost_multiplier();

    let large_input = request
        .free_text_fields()
        .iter()
        .any(|field| field.chars().count() > LARGE_INPUT_CHARS);
    if large_input {
        cost *= LARGE_INPUT_MULTIPLIER;
    }

    round_cents(cost)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentflow_common::types::AnalysisType;

    fn request(kind: AnalysisType, goals: &str) -> AnalysisRequest {
        AnalysisRequest::builder("Acme")
            .analysis_type(kind)
            .goals(goals)
            .build()
    }

    #[test]
    fn test_base_costs_by_type() {
        assert_eq!(estimate_cost(&request(AnalysisType::Market, "")), 0.10);
        assert_eq!(estimate_cost(&request(AnalysisType::Digital, "")), 0.30);
        assert_eq!(estimate_cost(&request(AnalysisType::Strategic, "")), 0.50);
        assert_eq!(estimate_cost(&request(AnalysisType::Complete, "")), 1.00);
    }

    #[test]
    fn test_large_free_text_multiplier() {
        let long = "x".repeat(LARGE_INPUT_CHARS + 1);
        assert_eq!(estimate_cost(&request(AnalysisType::Market, &long)), 0.15);
        assert_eq!(estimate_cost(&request(AnalysisType::Complete, &long)), 1.50);
        assert_eq!(estimate_cost(&request(AnalysisType::Digital, &long)), 0.45);
    }

    #[test]
    fn test_exactly_threshold_is_not_large() {
        let edge = "x".repeat(LARGE_INPUT_CHARS);
        assert_eq!(estimate_cost(&request(AnalysisType::Market, &edge)), 0.10);
    }
}
