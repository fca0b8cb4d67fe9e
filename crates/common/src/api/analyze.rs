use serde::{Deserialize, Serialize};

use crate::types::{AnalysisRequest, AnalysisType, Estimate, Language, Priority};

/// POST /analyze and POST /report request: the form as submitted.
///
/// Analysis type, language and priority arrive as the labels the form shows
/// and are mapped to their enums by [`AnalyzeRequest::into_request`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub products: String,
    #[serde(default)]
    pub competitors: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub analysis_type: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub priority: String,
}

impl AnalyzeRequest {
    pub fn into_request(self) -> AnalysisRequest {
        AnalysisRequest::builder(self.name)
            .industry(self.industry)
            .location(self.location)
            .products(self.products)
            .competitors(self.competitors)
            .challenges(self.challenges)
            .goals(self.goals)
            .analysis_type(AnalysisType::from_label(&self.analysis_type))
            .language(Language::from_tag(&self.language))
            .priority(Priority::from_label(&self.priority))
            .build()
    }
}

/// GET /estimate query.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EstimateQuery {
    #[serde(default)]
    pub analysis_type: String,
}

/// GET /estimate response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub analysis_type: AnalysisType,
    pub display_name: String,
    pub estimate: Estimate,
}

/// A preset request offered by GET /templates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTemplate {
    pub label: String,
    pub name: String,
    pub industry: String,
    pub location: String,
    #[serde(default)]
    pub products: String,
    #[serde(default)]
    pub competitors: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub goals: String,
}

impl AnalysisTemplate {
    /// Form contents for this template, ready to submit.
    pub fn to_form(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            name: self.name.clone(),
            industry: self.industry.clone(),
            location: self.location.clone(),
            products: self.products.clone(),
            competitors: self.competitors.clone(),
            challenges: self.challenges.clone(),
            goals: self.goals.clone(),
            ..AnalyzeRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_maps_labels() {
        let form: AnalyzeRequest = serde_json::from_value(serde_json::json!({
            "name": "Home Value Store",
            "industry": "Retail",
            "analysis_type": "📊 Planificación Estratégica (12-18 min)",
            "language": "en",
            "priority": "Alta"
        }))
        .unwrap();

        let request = form.into_request();
        assert_eq!(request.company_name(), "Home Value Store");
        assert_eq!(request.analysis_type(), AnalysisType::Strategic);
        assert_eq!(request.language(), Language::En);
        assert_eq!(request.priority(), Priority::High);
    }

    #[test]
    fn test_template_to_form_keeps_fields() {
        let template = AnalysisTemplate {
            label: "Tech startup".into(),
            name: "TechInnovate".into(),
            industry: "Technology".into(),
            location: "United States".into(),
            products: "SaaS".into(),
            competitors: String::new(),
            challenges: String::new(),
            goals: "Series A".into(),
        };
        let request = template.to_form().into_request();
        assert_eq!(request.company_name(), "TechInnovate");
        assert_eq!(request.goals(), "Series A");
    }
}
