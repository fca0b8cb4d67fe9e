use serde_json::{json, Value};

use agentflow_common::types::AnalysisRequest;

/// Company profile placeholders the analyzers expect but the form does not ask for.
const DEFAULT_CUSTOMERS: &str = "B2B y B2C";
const DEFAULT_SALES_CHANNELS: &str = "Múltiples canales";
const DEFAULT_SIZE: &str = "Mediana empresa";
const DEFAULT_YEARS_OPERATING: &str = "Varios años";

/// The configuration handed to the orchestration engine for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisJob {
    pub company_name: String,
    pub industry: String,
    pub location: String,
    pub language: String,
    pub analysis_type: String,
    pub description: String,
    pub products: String,
    pub competitors: String,
    pub challenges: String,
    pub goals: String,
    pub priority: String,
}

impl AnalysisJob {
    pub fn from_request(request: &AnalysisRequest) -> Self {
        Self {
            company_name: request.company_name().to_string(),
            industry: request.industry().to_string(),
            location: request.location().to_string(),
            language: request.language().tag().to_string(),
            analysis_type: request.analysis_type().key().to_string(),
            description: format!("Empresa en el sector {}", request.industry()),
            products: request.products().to_string(),
            competitors: request.competitors().to_string(),
            challenges: request.challenges().to_string(),
            goals: request.goals().to_string(),
            priority: request.priority().as_str().to_string(),
        }
    }

    /// Wire payload. The analyzers read Spanish keys and some fields under
    /// two names, so both are sent.
    pub fn to_payload(&self) -> Value {
        json!({
            "nombre": self.company_name,
            "industria": self.industry,
            "ubicacion": self.location,
            "language": self.language,
            "analysis_type": self.analysis_type,
            "descripcion": self.description,
            "productos_servicios": self.products,
            "productos": self.products,
            "competencia_principal": self.competitors,
            "competidores": self.competitors,
            "retos": self.challenges,
            "desafios": self.challenges,
            "objetivos": self.goals,
            "prioridad": self.priority,
            "clientes": DEFAULT_CUSTOMERS,
            "canales_venta": DEFAULT_SALES_CHANNELS,
            "tamano": DEFAULT_SIZE,
            "anos_operacion": DEFAULT_YEARS_OPERATING,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentflow_common::types::{AnalysisType, Language};

    #[test]
    fn test_payload_carries_aliases() {
        let request = AnalysisRequest::builder("FinanceFlow")
            .industry("Finance")
            .competitors("JPMorgan Chase")
            .challenges("Regulation")
            .analysis_type(AnalysisType::Financial)
            .language(Language::En)
            .build();

        let payload = AnalysisJob::from_request(&request).to_payload();
        assert_eq!(payload["nombre"], "FinanceFlow");
        assert_eq!(payload["analysis_type"], "financial");
        assert_eq!(payload["language"], "en");
        assert_eq!(payload["competencia_principal"], payload["competidores"]);
        assert_eq!(payload["retos"], "Regulation");
        assert_eq!(payload["desafios"], "Regulation");
        assert_eq!(payload["descripcion"], "Empresa en el sector Finance");
    }
}
