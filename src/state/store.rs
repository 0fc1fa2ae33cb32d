use crate::config::FormConfig;
use crate::core::{Field, FieldValue, FormState};
use crate::error::FormError;
use crate::runtime::submission::{Notice, SubmissionStatus};
use crate::state::step::Step;
use crate::state::tags::Tags;
use crate::state::validation::{self, ErrorMap};
use indexmap::IndexSet;
use serde::Serialize;
use std::sync::Arc;

/// The single mutable record behind one visitor session.
#[derive(Debug, Clone)]
pub struct FormStore {
    pub(crate) config: Arc<FormConfig>,
    pub(crate) tags: Tags,
    pub(crate) form: FormState,
    pub(crate) step: Step,
    pub(crate) errors: ErrorMap,
    pub(crate) status: SubmissionStatus,
    pub(crate) notice: Option<Notice>,
}

/// Recap shown once a lead is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSummary {
    pub nama: String,
    pub minat: String,
    pub sekolah: String,
    pub kelas: String,
}

impl FormStore {
    pub fn new(config: Arc<FormConfig>, tags: Tags) -> Self {
        let form = FormState::seeded(&tags.school);
        Self {
            config,
            tags,
            form,
            step: Step::default(),
            errors: ErrorMap::new(),
            status: SubmissionStatus::Idle,
            notice: None,
        }
    }

    pub fn from_query(config: Arc<FormConfig>, raw_query: &str) -> Self {
        let tags = Tags::extract(raw_query);
        tracing::debug!(
            school = %tags.school,
            campaign = %tags.campaign,
            source = %tags.source,
            "tags extracted from link"
        );
        Self::new(config, tags)
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The school field is shown read-only when the QR link named it.
    pub fn sekolah_locked(&self) -> bool {
        self.tags.has_school()
    }

    pub fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    /// Replaces one field and drops its error; the value is checked again
    /// on the next step change or submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into();
        match (field, value) {
            (Field::Nama, FieldValue::Text(text)) => self.form.nama = text,
            (Field::Sekolah, FieldValue::Text(text)) => self.form.sekolah = text,
            (Field::Wa, FieldValue::Text(text)) => self.form.wa = text,
            (Field::MinatBidang, FieldValue::Text(text)) => self.form.minat_bidang = text,
            (Field::Kelas, FieldValue::Text(text)) => self.form.kelas = text.parse()?,
            (Field::Rencana, FieldValue::Text(text)) => self.form.rencana = text.parse()?,
            (Field::IzinFollowUp, FieldValue::Bool(flag)) => self.form.izin_follow_up = flag,
            (Field::Ketertarikan, FieldValue::List(keys)) => {
                if let Some(unknown) = keys.iter().find(|key| !self.config.options.has_interest(key)) {
                    return Err(FormError::UnknownInterest(unknown.clone()));
                }
                self.form.ketertarikan = keys.into_iter().collect::<IndexSet<_>>();
            }
            (field, value) => {
                tracing::warn!(%field, got = value.kind(), "field type mismatch");
                return Err(FormError::TypeMismatch {
                    field,
                    expected: expected_kind(field),
                });
            }
        }

        self.errors.clear_error(field);
        Ok(())
    }

    pub fn toggle_interest(&mut self, key: &str) -> Result<(), FormError> {
        if !self.config.options.has_interest(key) {
            return Err(FormError::UnknownInterest(key.to_string()));
        }

        if !self.form.ketertarikan.shift_remove(key) {
            self.form.ketertarikan.insert(key.to_string());
        }
        self.errors.clear_error(Field::Ketertarikan);
        Ok(())
    }

    pub fn validate_current_step(&mut self) -> bool {
        self.errors = validation::validate(self.step, &self.form, &self.config);
        self.errors.is_empty()
    }

    /// Advances one step if the current one validates. Returns whether the
    /// step changed.
    pub fn go_next(&mut self) -> bool {
        if !self.validate_current_step() {
            tracing::debug!(
                step = self.step.index(),
                errors = self.errors.len(),
                "step blocked by validation"
            );
            return false;
        }

        let from = self.step;
        self.step = self.step.next();
        tracing::debug!(from = from.index(), to = self.step.index(), "step advanced");
        from != self.step
    }

    pub fn go_back(&mut self) -> bool {
        let from = self.step;
        self.step = self.step.prev();
        from != self.step
    }

    /// Starts over for the next visitor from the same link, once the current
    /// lead is recorded. School, grade, plan, consent and tags carry over.
    pub fn reset(&mut self) -> Result<(), FormError> {
        match self.status {
            SubmissionStatus::Succeeded => {}
            SubmissionStatus::Submitting => return Err(FormError::Busy),
            SubmissionStatus::Idle => return Err(FormError::NotSubmitted),
        }

        self.form.clear_visitor();
        self.step = Step::default();
        self.errors = ErrorMap::new();
        self.status = SubmissionStatus::Idle;
        self.notice = None;
        tracing::debug!("form reset for next visitor");
        Ok(())
    }

    pub fn summary(&self) -> LeadSummary {
        let or_dash = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        LeadSummary {
            nama: or_dash(&self.form.nama),
            minat: or_dash(
                self.config
                    .options
                    .faculty(&self.form.minat_bidang)
                    .map(|f| f.title.as_str())
                    .unwrap_or_default(),
            ),
            sekolah: or_dash(&self.form.sekolah),
            kelas: self.form.kelas.to_string(),
        }
    }
}

fn expected_kind(field: Field) -> &'static str {
    match field {
        Field::IzinFollowUp => "bool",
        Field::Ketertarikan => "list",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::FormStore;
    use crate::config::FormConfig;
    use crate::core::{Field, Kelas, Rencana};
    use crate::error::FormError;
    use crate::runtime::submission::SubmissionStatus;
    use crate::state::step::Step;
    use std::sync::Arc;

    fn store(query: &str) -> FormStore {
        FormStore::from_query(Arc::new(FormConfig::default()), query)
    }

    fn fill_step_one(store: &mut FormStore) {
        store.set_field(Field::Nama, "Aulia").expect("nama");
        store.set_field(Field::Sekolah, "SMA 1").expect("sekolah");
        store.set_field(Field::Wa, "081234567890").expect("wa");
    }

    #[test]
    fn link_school_seeds_and_locks_the_field() {
        let store = store("?school=SMA%20Pasundan%201&campaign=Open%20House");
        assert_eq!(store.tags().school, "SMA Pasundan 1");
        assert_eq!(store.tags().campaign, "Open House");
        assert_eq!(store.form().sekolah, "SMA Pasundan 1");
        assert!(store.sekolah_locked());
        assert!(!self::store("").sekolah_locked());
    }

    #[test]
    fn next_is_blocked_by_empty_name() {
        let mut store = store("");
        assert!(!store.go_next());
        assert_eq!(store.step(), Step::DataSingkat);
        assert!(store.errors().contains(Field::Nama));
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut store = store("");
        store.go_next();
        assert!(store.errors().contains(Field::Nama));

        store.set_field(Field::Nama, "  ").expect("set nama");
        assert!(!store.errors().contains(Field::Nama));
        assert!(store.errors().contains(Field::Wa));
        assert_eq!(store.form().nama, "  ");
    }

    #[test]
    fn next_and_back_are_clamped() {
        let mut store = store("");
        assert!(!store.go_back());
        fill_step_one(&mut store);
        assert!(store.go_next());
        store.set_field(Field::MinatBidang, "FT").expect("minat");
        assert!(store.go_next());
        assert_eq!(store.step(), Step::Preferensi);

        store.toggle_interest("pmdk").expect("toggle");
        assert!(!store.go_next());
        assert_eq!(store.step(), Step::Preferensi);
        assert!(store.errors().is_empty());

        assert!(store.go_back());
        assert!(store.go_back());
        assert!(!store.go_back());
        assert_eq!(store.step(), Step::DataSingkat);
    }

    #[test]
    fn going_back_never_validates() {
        let mut store = store("");
        fill_step_one(&mut store);
        store.go_next();
        store.go_next();
        assert!(store.errors().contains(Field::MinatBidang));
        store.go_back();
        assert_eq!(store.step(), Step::DataSingkat);
        assert!(store.errors().contains(Field::MinatBidang));
    }

    #[test]
    fn toggle_twice_restores_the_set() {
        let mut store = store("");
        store.toggle_interest("usm").expect("toggle usm");
        let before = store.form().ketertarikan.clone();

        store.toggle_interest("beasiswa").expect("toggle on");
        assert!(store.form().ketertarikan.contains("beasiswa"));
        store.toggle_interest("beasiswa").expect("toggle off");
        assert_eq!(store.form().ketertarikan, before);
    }

    #[test]
    fn toggle_clears_interest_error_and_rejects_unknown_keys() {
        let mut store = store("");
        store.step = Step::Preferensi;
        store.go_next();
        assert!(store.errors().contains(Field::Ketertarikan));

        store.toggle_interest("pmdk").expect("toggle");
        store.toggle_interest("pmdk").expect("toggle back");
        assert!(!store.errors().contains(Field::Ketertarikan));

        assert_eq!(
            store.toggle_interest("gratis"),
            Err(FormError::UnknownInterest("gratis".into()))
        );
    }

    #[test]
    fn typed_fields_are_checked() {
        let mut store = store("");
        store.set_field(Field::Kelas, "XI").expect("kelas");
        store.set_field(Field::Rencana, "Masih mempertimbangkan").expect("rencana");
        store.set_field(Field::IzinFollowUp, false).expect("izin");
        assert_eq!(store.form().kelas, Kelas::XI);
        assert_eq!(store.form().rencana, Rencana::MasihMempertimbangkan);
        assert!(!store.form().izin_follow_up);

        assert!(matches!(
            store.set_field(Field::Kelas, "X"),
            Err(FormError::InvalidChoice { .. })
        ));
        assert!(matches!(
            store.set_field(Field::IzinFollowUp, "ya"),
            Err(FormError::TypeMismatch { expected: "bool", .. })
        ));
    }

    #[test]
    fn interest_list_is_deduplicated_and_checked() {
        let mut store = store("");
        store
            .set_field(
                Field::Ketertarikan,
                vec!["pmdk".to_string(), "usm".to_string(), "pmdk".to_string()],
            )
            .expect("set list");
        assert_eq!(store.form().ketertarikan.len(), 2);

        assert!(
            store
                .set_field(Field::Ketertarikan, vec!["nope".to_string()])
                .is_err()
        );
        assert_eq!(store.form().ketertarikan.len(), 2);
    }

    #[test]
    fn reset_only_follows_a_recorded_lead() {
        let mut store = store("");
        fill_step_one(&mut store);
        assert!(store.go_next());

        assert_eq!(store.reset(), Err(FormError::NotSubmitted));
        assert_eq!(store.form().nama, "Aulia");
        assert_eq!(store.step(), Step::Minat);

        store.status = SubmissionStatus::Submitting;
        assert_eq!(store.reset(), Err(FormError::Busy));

        store.status = SubmissionStatus::Succeeded;
        store.reset().expect("reset after success");
        assert_eq!(store.status(), SubmissionStatus::Idle);
        assert_eq!(store.step(), Step::DataSingkat);
        assert!(store.form().nama.is_empty());
        assert_eq!(store.form().sekolah, "SMA 1");
    }

    #[test]
    fn summary_uses_catalog_titles() {
        let mut store = store("school=SMA+3");
        store.set_field(Field::Nama, "Aulia").expect("nama");
        store.set_field(Field::MinatBidang, "FT").expect("minat");

        let summary = store.summary();
        assert_eq!(summary.minat, "Fakultas Teknik");
        assert_eq!(summary.sekolah, "SMA 3");
        assert_eq!(summary.kelas, "XII");

        store.set_field(Field::MinatBidang, "").expect("clear");
        assert_eq!(store.summary().minat, "-");
    }
}
