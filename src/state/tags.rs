use crate::state::query::parse_query;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_CAMPAIGN: &str = "SchoolVisit";
pub const DEFAULT_SOURCE: &str = "QR";
pub const DEFAULT_UTM_MEDIUM: &str = "offline";

/// Attribution carried by the QR link the visitor scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tags {
    pub school: String,
    pub campaign: String,
    pub wave: String,
    pub source: String,
    pub utm_source: String,
    pub utm_campaign: String,
    pub utm_medium: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

impl Default for Tags {
    fn default() -> Self {
        Self::from_params(&HashMap::new())
    }
}

impl Tags {
    pub fn extract(raw_query: &str) -> Self {
        Self::from_params(&parse_query(raw_query))
    }

    /// Empty parameters count as missing, so `?school=&sekolah=X` still
    /// picks up `X`.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let school = get("school").or_else(|| get("sekolah")).unwrap_or_default();
        let campaign = get("campaign").unwrap_or(DEFAULT_CAMPAIGN);
        let source = get("source").or_else(|| get("src")).unwrap_or(DEFAULT_SOURCE);

        Self {
            school: school.to_string(),
            campaign: campaign.to_string(),
            wave: get("wave").unwrap_or_default().to_string(),
            source: source.to_string(),
            utm_source: get("utm_source").unwrap_or(source).to_string(),
            utm_campaign: get("utm_campaign").unwrap_or(campaign).to_string(),
            utm_medium: get("utm_medium").unwrap_or(DEFAULT_UTM_MEDIUM).to_string(),
            reference: get("ref").unwrap_or_default().to_string(),
        }
    }

    pub fn has_school(&self) -> bool {
        !self.school.is_empty()
    }
}
