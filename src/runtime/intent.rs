use crate::core::{Field, FieldValue};

/// What the presentation layer asks the form to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetField { field: Field, value: FieldValue },
    ToggleInterest(String),
    Next,
    Back,
    Submit,
    Reset,
    DismissNotice,
}

impl Intent {
    pub fn set(field: Field, value: impl Into<FieldValue>) -> Self {
        Self::SetField {
            field,
            value: value.into(),
        }
    }
}
