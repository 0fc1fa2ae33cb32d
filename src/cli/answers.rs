use crate::core::{Field, Kelas, Rencana};
use crate::runtime::Intent;
use serde::Deserialize;

/// A visitor's answers written down ahead of time, replayed step by step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSheet {
    pub nama: Option<String>,
    pub sekolah: Option<String>,
    pub kelas: Option<Kelas>,
    pub wa: Option<String>,
    pub minat_bidang: Option<String>,
    pub rencana: Option<Rencana>,
    pub ketertarikan: Vec<String>,
    pub izin_follow_up: Option<bool>,
}

impl AnswerSheet {
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Intents that walk the three steps in order. `sekolah` is skipped when
    /// the link already fixed it.
    pub fn intents(&self, sekolah_locked: bool) -> Vec<Intent> {
        let mut intents = Vec::new();

        if let Some(nama) = &self.nama {
            intents.push(Intent::set(Field::Nama, nama.as_str()));
        }
        match &self.sekolah {
            Some(_) if sekolah_locked => {
                tracing::warn!("answer sheet sekolah ignored; the link sets the school");
            }
            Some(sekolah) => intents.push(Intent::set(Field::Sekolah, sekolah.as_str())),
            None => {}
        }
        if let Some(kelas) = self.kelas {
            intents.push(Intent::set(Field::Kelas, kelas.as_str()));
        }
        if let Some(wa) = &self.wa {
            intents.push(Intent::set(Field::Wa, wa.as_str()));
        }
        intents.push(Intent::Next);

        if let Some(minat) = &self.minat_bidang {
            intents.push(Intent::set(Field::MinatBidang, minat.as_str()));
        }
        intents.push(Intent::Next);

        if let Some(rencana) = self.rencana {
            intents.push(Intent::set(Field::Rencana, rencana.as_str()));
        }
        if !self.ketertarikan.is_empty() {
            intents.push(Intent::set(Field::Ketertarikan, self.ketertarikan.clone()));
        }
        if let Some(izin) = self.izin_follow_up {
            intents.push(Intent::set(Field::IzinFollowUp, izin));
        }

        intents
    }
}
