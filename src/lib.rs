//! Multi-step lead capture form for QR guest books.
//!
//! A visitor scans a campaign QR code, lands on a three-step form and leaves
//! their contact details and interests. [`state::FormStore`] owns the form,
//! [`runtime::Reducer`] applies presentation intents to it, and a
//! [`runtime::LeadSink`] receives the finished lead.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod runtime;
pub mod state;

pub use config::FormConfig;
pub use error::{ConfigError, FormError, SubmitBlocked, SubmitError};
pub use runtime::{Intent, LeadSink, Reducer, SubmissionStatus};
pub use state::{ErrorMap, FormStore, Step, Tags};
