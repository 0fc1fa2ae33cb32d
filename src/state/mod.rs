pub mod query;
pub mod step;
pub mod store;
pub mod tags;
pub mod validation;

pub use step::Step;
pub use store::{FormStore, LeadSummary};
pub use tags::Tags;
pub use validation::{ErrorMap, validate, validate_all};
