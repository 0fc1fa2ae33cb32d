pub mod effect;
pub mod intent;
pub mod payload;
pub mod reducer;
pub mod sink;
pub mod submission;

pub use effect::Effect;
pub use intent::Intent;
pub use payload::{LeadPayload, SubmitReceipt, SubmitResponse};
pub use reducer::Reducer;
pub use sink::{HttpSink, LeadSink, MockSink, sink_for};
pub use submission::{Notice, NoticeLevel, SubmissionStatus};
