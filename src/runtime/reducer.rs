use crate::error::{FormError, SubmitBlocked};
use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::runtime::sink::LeadSink;
use crate::runtime::submission::SubmissionStatus;
use crate::state::store::FormStore;

pub struct Reducer;

impl Reducer {
    pub fn reduce(
        store: &mut FormStore,
        intent: Intent,
        sink: &dyn LeadSink,
    ) -> Result<Vec<Effect>, FormError> {
        let effects = match intent {
            Intent::SetField { field, value } => {
                store.set_field(field, value)?;
                vec![Effect::RequestRender]
            }
            Intent::ToggleInterest(key) => {
                store.toggle_interest(&key)?;
                vec![Effect::RequestRender]
            }
            Intent::Next => {
                let from = store.step();
                if store.go_next() {
                    vec![
                        Effect::StepChanged {
                            from,
                            to: store.step(),
                        },
                        Effect::RequestRender,
                    ]
                } else {
                    published_errors(store)
                }
            }
            Intent::Back => {
                let from = store.step();
                if store.go_back() {
                    vec![
                        Effect::StepChanged {
                            from,
                            to: store.step(),
                        },
                        Effect::RequestRender,
                    ]
                } else {
                    vec![]
                }
            }
            Intent::Submit => Self::handle_submit(store, sink),
            Intent::Reset => {
                let from = store.step();
                store.reset()?;
                let mut effects = vec![Effect::StatusChanged(SubmissionStatus::Idle)];
                if from != store.step() {
                    effects.push(Effect::StepChanged {
                        from,
                        to: store.step(),
                    });
                }
                effects.push(Effect::RequestRender);
                effects
            }
            Intent::DismissNotice => {
                store.dismiss_notice();
                vec![Effect::RequestRender]
            }
        };

        Ok(effects)
    }

    fn handle_submit(store: &mut FormStore, sink: &dyn LeadSink) -> Vec<Effect> {
        let payload = match store.begin_submit() {
            Ok(payload) => payload,
            Err(SubmitBlocked::Invalid(_)) => return published_errors(store),
            Err(blocked) => {
                tracing::debug!(reason = %blocked, "submit ignored");
                return vec![];
            }
        };

        let mut effects = vec![Effect::StatusChanged(SubmissionStatus::Submitting)];
        store.finish_submit(sink.send(&payload));

        effects.push(Effect::StatusChanged(store.status()));
        if let Some(notice) = store.notice() {
            effects.push(Effect::Notify(notice.clone()));
        }
        effects.push(Effect::RequestRender);
        effects
    }
}

fn published_errors(store: &FormStore) -> Vec<Effect> {
    vec![
        Effect::ErrorsPublished(store.errors().clone()),
        Effect::RequestRender,
    ]
}
