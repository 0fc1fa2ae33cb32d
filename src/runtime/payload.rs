use crate::core::phone::normalize_wa;
use crate::core::{FormState, Kelas, Rencana};
use crate::state::tags::Tags;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_FUNNEL: &str = "Lead-SchoolVisit";

/// JSON document posted to the lead endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub nama: String,
    pub sekolah: String,
    pub kelas: Kelas,
    pub wa: String,
    #[serde(rename = "wa_normalized")]
    pub wa_normalized: String,
    pub minat_bidang: String,
    pub rencana: Rencana,
    pub ketertarikan: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub izin_follow_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Attribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PayloadMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribution {
    pub status_funnel: String,
    pub sekolah: String,
    pub minat: String,
    pub kelas: Kelas,
    #[serde(flatten)]
    pub link: Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadMeta {
    pub submitted_at: String,
    pub user_agent: String,
}

impl LeadPayload {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            nama: form.nama.clone(),
            sekolah: form.sekolah.clone(),
            kelas: form.kelas,
            wa: form.wa.clone(),
            wa_normalized: normalize_wa(&form.wa),
            minat_bidang: form.minat_bidang.clone(),
            rencana: form.rencana,
            ketertarikan: form.ketertarikan.iter().cloned().collect(),
            izin_follow_up: None,
            tags: None,
            meta: None,
        }
    }

    /// Adds consent, link attribution and submission metadata.
    pub fn with_attribution(
        mut self,
        form: &FormState,
        tags: &Tags,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        self.izin_follow_up = Some(form.izin_follow_up);
        self.tags = Some(Attribution {
            status_funnel: STATUS_FUNNEL.to_string(),
            sekolah: form.sekolah.clone(),
            minat: form.minat_bidang.clone(),
            kelas: form.kelas,
            link: tags.clone(),
        });
        self.meta = Some(PayloadMeta {
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: user_agent(),
        });
        self
    }
}

pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Body returned by the lead endpoint. Anything other than `success: true`
/// is a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub message: Option<String>,
}
