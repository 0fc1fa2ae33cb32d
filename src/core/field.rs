use crate::error::FormError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    #[serde(rename = "nama")]
    Nama,
    #[serde(rename = "sekolah")]
    Sekolah,
    #[serde(rename = "kelas")]
    Kelas,
    #[serde(rename = "wa")]
    Wa,
    #[serde(rename = "minatBidang")]
    MinatBidang,
    #[serde(rename = "rencana")]
    Rencana,
    #[serde(rename = "ketertarikan")]
    Ketertarikan,
    #[serde(rename = "izinFollowUp")]
    IzinFollowUp,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Nama,
        Field::Sekolah,
        Field::Kelas,
        Field::Wa,
        Field::MinatBidang,
        Field::Rencana,
        Field::Ketertarikan,
        Field::IzinFollowUp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nama => "nama",
            Self::Sekolah => "sekolah",
            Self::Kelas => "kelas",
            Self::Wa => "wa",
            Self::MinatBidang => "minatBidang",
            Self::Rencana => "rencana",
            Self::Ketertarikan => "ketertarikan",
            Self::IzinFollowUp => "izinFollowUp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nama => "Nama lengkap",
            Self::Sekolah => "Asal sekolah",
            Self::Kelas => "Kelas",
            Self::Wa => "No. WhatsApp aktif",
            Self::MinatBidang => "Minat bidang",
            Self::Rencana => "Rencana masuk kuliah",
            Self::Ketertarikan => "Yang kamu cari",
            Self::IzinFollowUp => "Izin follow-up",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| FormError::UnknownField(key.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
