use crate::core::Field;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(into = "u8")]
pub enum Step {
    #[default]
    DataSingkat,
    Minat,
    Preferensi,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::DataSingkat, Step::Minat, Step::Preferensi];
    pub const COUNT: u8 = 3;

    pub fn index(self) -> u8 {
        match self {
            Self::DataSingkat => 1,
            Self::Minat => 2,
            Self::Preferensi => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Step::ALL.into_iter().find(|step| step.index() == index)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::DataSingkat => "Data singkat",
            Self::Minat => "Minat kamu",
            Self::Preferensi => "Preferensi",
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::DataSingkat => &[Field::Nama, Field::Sekolah, Field::Kelas, Field::Wa],
            Self::Minat => &[Field::MinatBidang],
            Self::Preferensi => &[Field::Rencana, Field::Ketertarikan, Field::IzinFollowUp],
        }
    }

    /// Next step, saturating at the last one.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Previous step, saturating at the first one.
    pub fn prev(self) -> Self {
        Self::from_index(self.index().saturating_sub(1)).unwrap_or(self)
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::COUNT
    }

    pub fn progress_percent(self) -> u8 {
        ((u16::from(self.index()) * 100) / u16::from(Self::COUNT)) as u8
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.index()
    }
}
