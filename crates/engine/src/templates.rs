use agentflow_common::api::analyze::AnalysisTemplate;

fn template(
    label: &str,
    name: &str,
    industry: &str,
    products: &str,
    competitors: &str,
    challenges: &str,
    goals: &str,
) -> AnalysisTemplate {
    AnalysisTemplate {
        label: label.into(),
        name: name.into(),
        industry: industry.into(),
        location: "United States".into(),
        products: products.into(),
        competitors: competitors.into(),
        challenges: challenges.into(),
        goals: goals.into(),
    }
}

/// Preset requests shipped with the service.
pub fn builtin_templates() -> Vec<AnalysisTemplate> {
    vec![
        template(
            "🏪 Retail Hardware",
            "Home Value Store",
            "Retail and Commerce",
            "Tools, hardware, gardening",
            "Home Depot, Lowe's, Menards",
            "Online competition, logistics costs",
            "Digitalization, regional expansion",
        ),
        template(
            "🚀 Tech Startup",
            "TechInnovate",
            "Technology",
            "SaaS software, IT consulting",
            "Salesforce, Microsoft, Oracle",
            "Scalability, customer acquisition",
            "300% growth, Series A",
        ),
        template(
            "🏦 Financial Services",
            "FinanceFlow",
            "Finance and Banking",
            "Wealth management, investments",
            "JPMorgan Chase, Bank of America, Wells Fargo",
            "Regulation, digitalization",
            "Process automation, new products",
        ),
    ]
}

/// Built-in templates followed by the configured ones. A configured
/// template replaces a built-in one with the same label.
pub fn all_templates(configured: &[AnalysisTemplate]) -> Vec<AnalysisTemplate> {
    let mut templates: Vec<AnalysisTemplate> = builtin_templates()
        .into_iter()
        .filter(|b| !configured.iter().any(|c| c.label == b.label))
        .collect();
    templates.extend(configured.iter().cloned());
    templates
}
