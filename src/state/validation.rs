use crate::config::FormConfig;
use crate::core::phone::is_valid_wa;
use crate::core::{Field, FormState};
use crate::state::step::Step;
use indexmap::IndexMap;
use serde::Serialize;

/// Field errors in validation order. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: IndexMap<Field, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: Field) {
        self.entries.shift_remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn first_field(&self) -> Option<Field> {
        self.entries.keys().next().copied()
    }

    pub fn extend(&mut self, other: ErrorMap) {
        self.entries.extend(other.entries);
    }
}

pub fn validate(step: Step, form: &FormState, config: &FormConfig) -> ErrorMap {
    let messages = &config.messages;
    let mut errors = ErrorMap::new();

    match step {
        Step::DataSingkat => {
            if form.nama.trim().is_empty() {
                errors.set_error(Field::Nama, &messages.nama_required);
            }
            if form.sekolah.trim().is_empty() {
                errors.set_error(Field::Sekolah, &messages.sekolah_required);
            }
            if !is_valid_wa(&form.wa) {
                errors.set_error(Field::Wa, &messages.wa_invalid);
            }
        }
        Step::Minat => {
            if form.minat_bidang.is_empty() || !config.options.has_faculty(&form.minat_bidang) {
                errors.set_error(Field::MinatBidang, &messages.minat_required);
            }
        }
        Step::Preferensi => {
            if !form.izin_follow_up {
                errors.set_error(Field::IzinFollowUp, &messages.izin_required);
            }
            if form.ketertarikan.is_empty() {
                errors.set_error(Field::Ketertarikan, &messages.ketertarikan_required);
            }
        }
    }

    errors
}

/// Every step against the current values. A visitor can go back and break
/// an earlier step after passing it, so submit never trusts step history.
pub fn validate_all(form: &FormState, config: &FormConfig) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for step in Step::ALL {
        errors.extend(validate(step, form, config));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::{validate, validate_all};
    use crate::config::FormConfig;
    use crate::core::{Field, FormState};
    use crate::state::step::Step;

    fn valid_form() -> FormState {
        let mut form = FormState::default();
        form.nama = "Aulia".into();
        form.sekolah = "SMA 1".into();
        form.wa = "081234567890".into();
        form.minat_bidang = "FT".into();
        form.ketertarikan.insert("beasiswa".into());
        form.izin_follow_up = true;
        form
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate_all(&valid_form(), &FormConfig::default()).is_empty());
    }

    #[test]
    fn step_one_checks_trimmed_text_and_phone() {
        let config = FormConfig::default();
        let mut form = valid_form();
        form.nama = "   ".into();
        form.sekolah = "\t".into();
        form.wa = "12345".into();

        let errors = validate(Step::DataSingkat, &form, &config);
        assert_eq!(errors.get(Field::Nama), Some("Nama wajib diisi."));
        assert_eq!(errors.get(Field::Sekolah), Some("Nama sekolah wajib diisi."));
        assert!(errors.contains(Field::Wa));
        assert_eq!(errors.first_field(), Some(Field::Nama));
    }

    #[test]
    fn step_only_reports_its_own_fields() {
        let config = FormConfig::default();
        let form = FormState::default();

        let errors = validate(Step::Minat, &form, &config);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::MinatBidang));
    }

    #[test]
    fn faculty_must_come_from_catalog() {
        let config = FormConfig::default();
        let mut form = valid_form();
        form.minat_bidang = "teknologi".into();
        assert!(validate(Step::Minat, &form, &config).contains(Field::MinatBidang));
    }

    #[test]
    fn preferences_need_consent_and_an_interest() {
        let config = FormConfig::default();
        let mut form = valid_form();
        form.izin_follow_up = false;
        form.ketertarikan.clear();

        let errors = validate(Step::Preferensi, &form, &config);
        assert!(errors.contains(Field::IzinFollowUp));
        assert!(errors.contains(Field::Ketertarikan));
    }

    #[test]
    fn validate_all_unions_every_step() {
        let errors = validate_all(&FormState::default(), &FormConfig::default());
        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Nama,
                Field::Sekolah,
                Field::Wa,
                Field::MinatBidang,
                Field::Ketertarikan,
            ]
        );
    }

    #[test]
    fn messages_follow_config() {
        let mut config = FormConfig::default();
        config.messages.nama_required = "Name is required".into();
        let errors = validate(Step::DataSingkat, &FormState::default(), &config);
        assert_eq!(errors.get(Field::Nama), Some("Name is required"));
    }
}
