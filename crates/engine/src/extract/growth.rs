use agentflow_common::types::GrowthPotential;

use super::{contains_any, lowered};

/// Tiers checked in order; the first tier with a matching phrase wins.
const GROWTH_TIERS: &[(&[&str], GrowthPotential)] = &[
    (
        &[
            "alto crecimiento",
            "gran potencial",
            "excelente oportunidad",
            "high growth",
            "great potential",
            "excellent opportunity",
        ],
        GrowthPotential::High,
    ),
    (
        &[
            "crecimiento moderado",
            "potencial medio",
            "oportunidades",
            "moderate growth",
            "medium potential",
            "opportunities",
        ],
        GrowthPotential::Medium,
    ),
    (
        &[
            "expansión",
            "diversificar",
            "implementar",
            "fortalecer",
            "expansion",
            "diversify",
            "implement",
            "strengthen",
        ],
        GrowthPotential::MediumHigh,
    ),
    // Challenge vocabulary reads as "moderate", which maps onto Medium.
    (
        &[
            "desafío",
            "competencia intensa",
            "riesgo",
            "challenge",
            "intense competition",
            "risk",
        ],
        GrowthPotential::Medium,
    ),
];

/// Classify growth potential by the first matching phrase tier.
/// Absent text or no match yields Medium.
pub fn extract_growth_potential(text: Option<&str>) -> GrowthPotential {
    let Some(lower) = lowered(text) else {
        return GrowthPotential::Medium;
    };

    GROWTH_TIERS
        .iter()
        .find(|(phrases, _)| contains_any(&lower, phrases))
        .map(|(_, potential)| *potential)
        .unwrap_or(GrowthPotential::Medium)
}
