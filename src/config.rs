use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

pub const ENDPOINT_ENV: &str = "BUKUTAMU_LEAD_URL";

/// Everything the form needs that is not visitor input: branding, option
/// catalogs, validation texts and where leads get sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub brand: Brand,
    pub submission: SubmissionConfig,
    pub options: Catalogs,
    pub messages: Messages,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub org: String,
    pub title: String,
    pub subtitle: String,
    pub admin_whatsapp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    #[default]
    Http,
    Mock,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub mode: SubmissionMode,
    pub endpoint: Option<String>,
    pub method: String,
    pub timeout_secs: u64,
    pub include_attribution: bool,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            mode: SubmissionMode::Http,
            endpoint: None,
            method: "POST".to_string(),
            timeout_secs: 15,
            include_attribution: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Faculty {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Interest {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalogs {
    pub minat_bidang: Vec<Faculty>,
    pub ketertarikan: Vec<Interest>,
}

impl Catalogs {
    pub fn faculty(&self, key: &str) -> Option<&Faculty> {
        self.minat_bidang.iter().find(|f| f.key == key)
    }

    pub fn has_faculty(&self, key: &str) -> bool {
        self.faculty(key).is_some()
    }

    pub fn has_interest(&self, key: &str) -> bool {
        self.ketertarikan.iter().any(|i| i.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub nama_required: String,
    pub sekolah_required: String,
    pub wa_invalid: String,
    pub minat_required: String,
    pub izin_required: String,
    pub ketertarikan_required: String,
    pub submit_success: String,
    pub submit_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            nama_required: "Nama wajib diisi.".into(),
            sekolah_required: "Nama sekolah wajib diisi.".into(),
            wa_invalid: "Nomor WA tidak valid (contoh: 08xxxx atau 628xxxx).".into(),
            minat_required: "Pilih salah satu minat bidang.".into(),
            izin_required: "Agar bisa ditindaklanjuti, izinkan kami menghubungi via WhatsApp."
                .into(),
            ketertarikan_required: "Pilih minimal satu.".into(),
            submit_success: "Data berhasil dikirim".into(),
            submit_failed: "Maaf, submit gagal. Coba ulangi ya.".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Unpas,
    Compact,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpas" => Ok(Self::Unpas),
            "compact" => Ok(Self::Compact),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            org: "UNIVERSITAS PASUNDAN".into(),
            title: "Buku Tamu Digital Kunjungan Sekolah".into(),
            subtitle: "Isi singkat untuk dapat info jalur masuk, beasiswa, dan konsultasi prodi UNPAS. (± 1 menit)".into(),
            admin_whatsapp: Some("62811960193".into()),
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            minat_bidang: vec![
                faculty("FH", "Fakultas Hukum", "Ilmu Hukum"),
                faculty(
                    "FISIP",
                    "Fakultas Ilmu Sosial dan Ilmu Politik",
                    "Administrasi Publik, Ilmu Kesejahteraan Sosial, Ilmu Hubungan Internasional, Ilmu Administrasi Bisnis, Ilmu Komunikasi.",
                ),
                faculty(
                    "FT",
                    "Fakultas Teknik",
                    "Teknik Industri, Teknologi Pangan, Teknik Mesin, Teknik Informatika, Teknik Lingkungan, Perencanaan Wilayah dan Kota.",
                ),
                faculty(
                    "FEB",
                    "Fakultas Ekonomi dan Bisnis",
                    "Manajemen, Akuntansi, Ekonomi Pembangunan, Bisnis Digital.",
                ),
                faculty(
                    "FKIP",
                    "Fakultas Keguruan dan Ilmu Pendidikan",
                    "Pendidikan Pancasila dan Kewarganegaraan, Pendidikan Ekonomi, Pendidikan Bahasa dan Sastra Indonesia, Pendidikan Biologi, Pendidikan Matematika, Pendidikan Guru Sekolah Dasar.",
                ),
                faculty(
                    "FISS",
                    "Fakultas Ilmu Seni dan Sastra",
                    "Desain Komunikasi Visual, Fotografi, Seni Musik, Sastra Inggris.",
                ),
                faculty("FK", "Fakultas Kedokteran", "Kedokteran"),
                faculty("belum_tahu", "Belum tahu", "Minta arahan prodi yang cocok."),
            ],
            ketertarikan: default_interests(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::preset(Preset::Unpas)
    }
}

impl FormConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Unpas => Self {
                brand: Brand::default(),
                submission: SubmissionConfig::default(),
                options: Catalogs::default(),
                messages: Messages::default(),
            },
            Preset::Compact => Self {
                brand: Brand {
                    subtitle: "Isi singkat untuk dapat info jalur masuk, beasiswa, dan konsultasi prodi. (± 1 menit)".into(),
                    ..Brand::default()
                },
                submission: SubmissionConfig {
                    mode: SubmissionMode::Mock,
                    include_attribution: true,
                    ..SubmissionConfig::default()
                },
                options: Catalogs {
                    minat_bidang: vec![
                        faculty("soshum", "Sosial & Humaniora", "Hukum, Komunikasi, HI, Administrasi, dll."),
                        faculty("bisnis", "Ekonomi & Bisnis", "Manajemen, Akuntansi, Ekonomi, dll."),
                        faculty("teknologi", "Teknik & Teknologi", "Informatika, Teknik, Rekayasa, dll."),
                        faculty("kesehatan", "Kesehatan", "Kedokteran, Keperawatan, Farmasi, dll."),
                        faculty("pendidikan", "Pendidikan", "FKIP (pendidik & calon guru)."),
                        faculty("belum", "Belum tahu", "Minta arahan prodi yang cocok."),
                    ],
                    ketertarikan: default_interests(),
                },
                messages: Messages::default(),
            },
        }
    }

    /// Reads a YAML config; keys left out fall back to the `unpas` preset.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw)?;
        tracing::debug!(path = %path.display(), "loaded form config");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok())
    }

    fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(url) = endpoint.filter(|url| !url.trim().is_empty()) {
            self.submission.endpoint = Some(url);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.options.minat_bidang.is_empty() {
            return Err(ConfigError::Invalid("minat_bidang catalog is empty".into()));
        }
        if self.options.ketertarikan.is_empty() {
            return Err(ConfigError::Invalid("ketertarikan catalog is empty".into()));
        }
        check_unique_keys(
            "minat_bidang",
            self.options.minat_bidang.iter().map(|f| f.key.as_str()),
        )?;
        check_unique_keys(
            "ketertarikan",
            self.options.ketertarikan.iter().map(|i| i.key.as_str()),
        )?;
        if self.submission.method.trim().is_empty() {
            return Err(ConfigError::Invalid("submission method is empty".into()));
        }
        Ok(())
    }
}

fn check_unique_keys<'a>(
    catalog: &str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{catalog} has an empty key")));
        }
        if !seen.insert(key) {
            return Err(ConfigError::Invalid(format!(
                "{catalog} has duplicate key `{key}`"
            )));
        }
    }
    Ok(())
}

fn faculty(key: &str, title: &str, desc: &str) -> Faculty {
    Faculty {
        key: key.into(),
        title: title.into(),
        desc: desc.into(),
    }
}

fn default_interests() -> Vec<Interest> {
    [
        ("pmdk", "Jalur tanpa tes (PMDK)"),
        ("usm", "Jalur tes cepat"),
        ("beasiswa", "Beasiswa / potongan"),
        ("voucher", "Potongan biaya pendaftaran"),
        ("konsultasi", "Konsultasi via WhatsApp"),
    ]
    .into_iter()
    .map(|(key, label)| Interest {
        key: key.into(),
        label: label.into(),
    })
    .collect()
}
