use agentflow_common::types::RiskLevel;

use super::{contains_any, count_occurrences, lowered};

/// Threat concepts. Each concept counts once toward the distinct-threat
/// tally no matter how many of its terms appear.
const THREAT_CONCEPTS: &[&[&str]] = &[
    &["threat", "amenaza"],
    &["risk", "riesgo"],
    &["challenge", "desafío"],
    &["intense competition", "competencia intensa"],
    &["regulatory change", "cambios regulatorios"],
];

/// Terms whose raw occurrences are weighed against opportunities.
const THREAT_TERMS: &[&str] = &["threat", "amenaza", "risk", "riesgo"];

/// Stems, so plurals ("opportunities", "oportunidades") count too.
const OPPORTUNITY_TERMS: &[&str] = &["opportunit", "oportunidad"];

/// Classify risk from threat vs. opportunity vocabulary.
///
/// High when three or more threat concepts appear or threat mentions
/// outnumber opportunity mentions. Medium when exactly two concepts appear
/// or mentions tie at a non-zero count. Low otherwise, including absent text.
pub fn extract_risk_level(text: Option<&str>) -> RiskLevel {
    let Some(lower) = lowered(text) else {
        return RiskLevel::Low;
    };

    let threat_concepts = THREAT_CONCEPTS
        .iter()
        .filter(|terms| contains_any(&lower, terms))
        .count();
    let threats = count_occurrences(&lower, THREAT_TERMS);
    let opportunities = count_occurrences(&lower, OPPORTUNITY_TERMS);

    if threat_concepts >= 3 || threats > opportunities {
        RiskLevel::High
    } else if threat_concepts == 2 || (threats == opportunities && threats > 0) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_text_is_low() {
        assert_eq!(extract_risk_level(None), RiskLevel::Low);
        assert_eq!(extract_risk_level(Some("")), RiskLevel::Low);
        assert_eq!(extract_risk_level(Some("   \n\t")), RiskLevel::Low);
    }

    #[test]
    fn test_no_vocabulary_is_low() {
        let text = "The company sells hardware in three states and plans a new store.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::Low);
    }

    #[test]
    fn test_three_concepts_is_high() {
        let text = "Main threat: online retail. Regulatory change is expected. \
                    Each challenge is manageable. Many opportunities, many opportunities.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::High);
    }

    #[test]
    fn test_threats_outnumber_opportunities_is_high() {
        let text = "Riesgo de liquidez y riesgo cambiario; una oportunidad en exportación.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::High);
    }

    #[test]
    fn test_two_concepts_is_medium() {
        // risk + challenge; 1 risk mention vs 2 opportunity mentions.
        let text = "One risk and one challenge, balanced by an opportunity and another opportunity.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::Medium);
    }

    #[test]
    fn test_tie_is_medium() {
        let text = "Una amenaza clara, pero también una oportunidad.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::Medium);
    }

    #[test]
    fn test_case_insensitive() {
        let text = "THREAT. RISK. CHALLENGE.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::High);
    }

    #[test]
    fn test_opportunities_only_is_low() {
        let text = "Excellent opportunity in e-commerce and an opportunity abroad.";
        assert_eq!(extract_risk_level(Some(text)), RiskLevel::Low);
    }
}
