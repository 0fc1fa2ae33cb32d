use crate::core::field::Field;
use crate::error::FormError;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Kelas {
    #[default]
    #[serde(rename = "XII")]
    XII,
    #[serde(rename = "XI")]
    XI,
}

impl Kelas {
    pub const ALL: [Kelas; 2] = [Kelas::XII, Kelas::XI];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::XII => "XII",
            Self::XI => "XI",
        }
    }
}

impl FromStr for Kelas {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kelas::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::InvalidChoice {
                field: Field::Kelas,
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Kelas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rencana {
    #[default]
    #[serde(rename = "Masuk 2026")]
    Masuk2026,
    #[serde(rename = "Masih mempertimbangkan")]
    MasihMempertimbangkan,
    #[serde(rename = "Ingin info beasiswa dulu")]
    InfoBeasiswa,
}

impl Rencana {
    pub const ALL: [Rencana; 3] = [
        Rencana::Masuk2026,
        Rencana::MasihMempertimbangkan,
        Rencana::InfoBeasiswa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Masuk2026 => "Masuk 2026",
            Self::MasihMempertimbangkan => "Masih mempertimbangkan",
            Self::InfoBeasiswa => "Ingin info beasiswa dulu",
        }
    }
}

impl FromStr for Rencana {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rencana::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::InvalidChoice {
                field: Field::Rencana,
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Rencana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values entered by the visitor. Text is stored exactly as typed; trimming
/// happens in validation and phone normalization at payload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub nama: String,
    pub sekolah: String,
    pub kelas: Kelas,
    pub wa: String,
    pub minat_bidang: String,
    pub rencana: Rencana,
    pub ketertarikan: IndexSet<String>,
    pub izin_follow_up: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            nama: String::new(),
            sekolah: String::new(),
            kelas: Kelas::default(),
            wa: String::new(),
            minat_bidang: String::new(),
            rencana: Rencana::default(),
            ketertarikan: IndexSet::new(),
            izin_follow_up: true,
        }
    }
}

impl FormState {
    pub fn seeded(school: &str) -> Self {
        Self {
            sekolah: school.to_string(),
            ..Self::default()
        }
    }

    /// Clears the per-visitor fields, keeping the ones shared by everyone
    /// filling in from the same QR link.
    pub fn clear_visitor(&mut self) {
        self.nama.clear();
        self.wa.clear();
        self.minat_bidang.clear();
        self.ketertarikan.clear();
    }
}
