use serde::{Deserialize, Serialize};

/// Category of analysis requested. Drives the agent roster, pricing and
/// the time/cost estimate shown before a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    Market,
    Financial,
    Expansion,
    Digital,
    Operations,
    Strategic,
    Complete,
}

/// UI labels as presented in the request form.
const UI_LABELS: &[(&str, AnalysisType)] = &[
    ("🎯 Análisis Básico (5-8 min)", AnalysisType::Market),
    ("💰 Análisis Financiero (6-10 min)", AnalysisType::Financial),
    ("🌍 Estrategia de Expansión (8-12 min)", AnalysisType::Expansion),
    ("💻 Transformación Digital (10-15 min)", AnalysisType::Digital),
    ("⚙️ Optimización Operacional (7-11 min)", AnalysisType::Operations),
    ("📊 Planificación Estratégica (12-18 min)", AnalysisType::Strategic),
    ("🏢 Análisis Completo (25-40 min)", AnalysisType::Complete),
];

/// Estimated run time, cost and report length for an analysis type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub minutes_min: u32,
    pub minutes_max: u32,
    pub cost_min: f64,
    pub cost_max: f64,
    pub pages: String,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 7] = [
        Self::Market,
        Self::Financial,
        Self::Expansion,
        Self::Digital,
        Self::Operations,
        Self::Strategic,
        Self::Complete,
    ];

    /// Key sent to the orchestration engine.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Financial => "financial",
            Self::Expansion => "expansion",
            Self::Digital => "digital",
            Self::Operations => "operations",
            Self::Strategic => "strategic",
            Self::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Market => "Market Analysis",
            Self::Financial => "Financial Analysis",
            Self::Expansion => "Expansion Strategy",
            Self::Digital => "Digital Transformation",
            Self::Operations => "Operational Optimization",
            Self::Strategic => "Strategic Planning",
            Self::Complete => "Complete Analysis",
        }
    }

    /// Map a free-form label (UI label, engine key, or loose wording) to a type.
    ///
    /// Exact UI labels win, then keyword matching. Anything unrecognised,
    /// including an empty label, is a market analysis.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return Self::Market;
        }

        for (ui_label, kind) in UI_LABELS {
            if ui_label.contains(label) || label.contains(ui_label) {
                return *kind;
            }
        }

        let lower = label.to_lowercase();
        if lower.contains("financ") {
            Self::Financial
        } else if lower.contains("expansion") || lower.contains("expansión") {
            Self::Expansion
        } else if lower.contains("digital") {
            Self::Digital
        } else if lower.contains("operacion") || lower.contains("operation") {
            Self::Operations
        } else if lower.contains("estrateg") || lower.contains("strategic") {
            Self::Strategic
        } else if lower.contains("complet") {
            Self::Complete
        } else {
            Self::Market
        }
    }

    /// Agent roles the engine assembles for this analysis type.
    pub fn agents(&self) -> &'static [&'static str] {
        match self {
            Self::Market => &["Market Researcher", "Trend Analyst", "Market Strategist"],
            Self::Financial => &[
                "Financial Analyst",
                "Cost Auditor",
                "Investment Strategist",
            ],
            Self::Expansion => &[
                "Market Researcher",
                "Location Analyst",
                "Expansion Strategist",
            ],
            Self::Digital => &[
                "Digital Auditor",
                "E-commerce Specialist",
                "Marketing Strategist",
            ],
            Self::Operations => &[
                "Inventory Analyst",
                "Logistics Specialist",
                "Sales Optimizer",
            ],
            Self::Strategic => &[
                "Market Researcher",
                "Technology Strategist",
                "Financial Planner",
            ],
            Self::Complete => &[
                "Manager",
                "Researcher",
                "Strategist",
                "Analyst",
                "Digital Specialist",
            ],
        }
    }

    /// Price multiplier applied to the base analysis cost.
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::Complete => 10.0,
            Self::Strategic => 5.0,
            Self::Digital => 3.0,
            _ => 1.0,
        }
    }

    pub fn estimate(&self) -> Estimate {
        let (minutes_min, minutes_max, cost_min, cost_max, pages) = match self {
            Self::Market => (5, 8, 0.10, 0.25, "8-12"),
            Self::Financial => (6, 10, 0.15, 0.40, "12-18"),
            Self::Expansion => (8, 12, 0.20, 0.50, "15-22"),
            Self::Digital => (10, 15, 0.30, 0.70, "18-25"),
            Self::Operations => (7, 11, 0.25, 0.60, "14-20"),
            Self::Strategic => (12, 18, 0.40, 0.80, "20-30"),
            Self::Complete => (25, 40, 1.00, 2.50, "35-50"),
        };

        Estimate {
            minutes_min,
            minutes_max,
            cost_min,
            cost_max,
            pages: pages.to_string(),
        }
    }
}
