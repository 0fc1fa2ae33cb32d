use crate::runtime::submission::{Notice, SubmissionStatus};
use crate::state::step::Step;
use crate::state::validation::ErrorMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestRender,
    StepChanged { from: Step, to: Step },
    ErrorsPublished(ErrorMap),
    Notify(Notice),
    StatusChanged(SubmissionStatus),
}
