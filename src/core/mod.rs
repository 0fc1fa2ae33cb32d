pub mod field;
pub mod form;
pub mod phone;

pub use field::{Field, FieldValue};
pub use form::{FormState, Kelas, Rencana};
