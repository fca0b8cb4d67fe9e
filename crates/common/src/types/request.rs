use serde::{Deserialize, Serialize};

use crate::error::{AgentFlowError, Result};
use crate::types::AnalysisType;

/// Language the agents should write the report in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        if tag.starts_with("en") || tag.contains("english") || tag.contains("inglés") {
            Self::En
        } else {
            Self::Es
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

/// Scheduling priority forwarded to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Standard,
    High,
    Urgent,
}

impl Priority {
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.contains("urgent") {
            Self::Urgent
        } else if lower.contains("alta") || lower.contains("high") {
            Self::High
        } else {
            Self::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// A business-profile analysis request. Immutable once built.
///
/// Only the company name is required; every other field has a neutral
/// default so that partially filled forms still produce a report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    company_name: String,
    industry: String,
    location: String,
    #[serde(default)]
    products: String,
    #[serde(default)]
    competitors: String,
    #[serde(default)]
    challenges: String,
    #[serde(default)]
    goals: String,
    #[serde(default)]
    analysis_type: AnalysisType,
    #[serde(default)]
    language: Language,
    #[serde(default)]
    priority: Priority,
}

pub const DEFAULT_INDUSTRY: &str = "General";
pub const DEFAULT_LOCATION: &str = "Unspecified";

impl AnalysisRequest {
    pub fn builder(company_name: impl Into<String>) -> AnalysisRequestBuilder {
        AnalysisRequestBuilder::new(company_name)
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn products(&self) -> &str {
        &self.products
    }

    pub fn competitors(&self) -> &str {
        &self.competitors
    }

    pub fn challenges(&self) -> &str {
        &self.challenges
    }

    pub fn goals(&self) -> &str {
        &self.goals
    }

    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Supplementary free-text fields, in form order.
    pub fn free_text_fields(&self) -> [&str; 4] {
        [
            &self.products,
            &self.competitors,
            &self.challenges,
            &self.goals,
        ]
    }

    /// Check the identifying fields are present.
    pub fn validate(&self) -> Result<()> {
        if self.company_name.trim().is_empty() {
            return Err(AgentFlowError::InvalidRequest(
                "company name is required".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`AnalysisRequest`]. Blank optional fields fall back to
/// defaults at `build()`.
#[derive(Clone, Debug)]
pub struct AnalysisRequestBuilder {
    inner: AnalysisRequest,
}

impl AnalysisRequestBuilder {
    fn new(company_name: impl Into<String>) -> Self {
        Self {
            inner: AnalysisRequest {
                company_name: company_name.into(),
                industry: String::new(),
                location: String::new(),
                products: String::new(),
                competitors: String::new(),
                challenges: String::new(),
                goals: String::new(),
                analysis_type: AnalysisType::default(),
                language: Language::default(),
                priority: Priority::default(),
            },
        }
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.inner.industry = industry.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.inner.location = location.into();
        self
    }

    pub fn products(mut self, products: impl Into<String>) -> Self {
        self.inner.products = products.into();
        self
    }

    pub fn competitors(mut self, competitors: impl Into<String>) -> Self {
        self.inner.competitors = competitors.into();
        self
    }

    pub fn challenges(mut self, challenges: impl Into<String>) -> Self {
        self.inner.challenges = challenges.into();
        self
    }

    pub fn goals(mut self, goals: impl Into<String>) -> Self {
        self.inner.goals = goals.into();
        self
    }

    pub fn analysis_type(mut self, analysis_type: AnalysisType) -> Self {
        self.inner.analysis_type = analysis_type;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.inner.language = language;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.inner.priority = priority;
        self
    }

    pub fn build(self) -> AnalysisRequest {
        let mut request = self.inner;
        request.company_name = request.company_name.trim().to_string();
        if request.industry.trim().is_empty() {
            request.industry = DEFAULT_INDUSTRY.to_string();
        }
        if request.location.trim().is_empty() {
            request.location = DEFAULT_LOCATION.to_string();
        }
        request
    }
}
