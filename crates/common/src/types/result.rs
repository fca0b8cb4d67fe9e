use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ResultId;

/// Which degradation stage produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    RealEngine,
    CachedExample,
    SyntheticSimulation,
    ErrorStub,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RealEngine => "real_engine",
            Self::CachedExample => "cached_example",
            Self::SyntheticSimulation => "synthetic_simulation",
            Self::ErrorStub => "error_stub",
        }
    }

    /// Label printed on reports so readers can tell a simulation from a real run.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RealEngine => "Multi-agent analysis",
            Self::CachedExample => "Stored example analysis",
            Self::SyntheticSimulation => "Simulated analysis (engine unavailable)",
            Self::ErrorStub => "No analysis (invalid request)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Good,
    Fair,
    Simulated,
    Unavailable,
}

impl DataQuality {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Simulated => "Simulated",
            Self::Unavailable => "Unavailable",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPotential {
    Low,
    Medium,
    MediumHigh,
    High,
}

impl GrowthPotential {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::MediumHigh => "Medium-High",
            Self::High => "High",
        }
    }
}

/// Fixed metric block attached to every result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// 0 to 100.
    pub overall_score: u8,
    pub confidence: Confidence,
    pub data_quality: DataQuality,
    pub risk_level: RiskLevel,
    pub growth_potential: GrowthPotential,
}

/// How the analysis was produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub methodology: String,
    pub agents_used: Vec<String>,
}

/// Strengths, weaknesses, opportunities and threats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Swot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl Swot {
    /// Quadrants in reading order with their report labels.
    pub fn quadrants(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Strengths", self.strengths.as_slice()),
            ("Weaknesses", self.weaknesses.as_slice()),
            ("Opportunities", self.opportunities.as_slice()),
            ("Threats", self.threats.as_slice()),
        ]
    }
}

/// The canonical result every renderer consumes.
///
/// Always fully populated: stages that have nothing to say fill fields with
/// deterministic defaults rather than leaving them out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: ResultId,
    pub success: bool,
    pub source: Source,
    pub executive_summary: String,
    pub metrics: Metrics,
    /// Between one and five entries.
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub analysis: DetailedAnalysis,
    /// Only simulated results carry a SWOT block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swot: Option<Swot>,
    /// Unmodified agent text, for audit.
    pub raw_output: String,
    pub estimated_cost: f64,
    pub processing_time_label: String,
    /// Why the chain degraded, when it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ResultRecord {
    /// True for every source other than a real engine run.
    pub fn is_simulated(&self) -> bool {
        !matches!(self.source, Source::RealEngine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_potential_wire_and_label() {
        let json = serde_json::to_string(&GrowthPotential::MediumHigh).unwrap();
        assert_eq!(json, "\"medium_high\"");
        assert_eq!(GrowthPotential::MediumHigh.label(), "Medium-High");
    }

    #[test]
    fn test_swot_quadrant_order() {
        let swot = Swot {
            strengths: vec!["brand".into()],
            threats: vec!["rivals".into()],
            ..Swot::default()
        };
        let labels: Vec<&str> = swot.quadrants().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["Strengths", "Weaknesses", "Opportunities", "Threats"]);
        assert_eq!(swot.quadrants()[3].1.to_vec(), vec!["rivals".to_string()]);
    }

    #[test]
    fn test_source_wire_format() {
        let json = serde_json::to_string(&Source::SyntheticSimulation).unwrap();
        assert_eq!(json, "\"synthetic_simulation\"");
        assert_eq!(Source::SyntheticSimulation.as_str(), "synthetic_simulation");
    }
}
