//! Presenter double recording the states and outcomes it is shown.

use passkey_handshake::{AttemptOutcome, AttemptState, Presenter};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingPresenter {
    pub states: Mutex<Vec<AttemptState>>,
    pub outcomes: Mutex<Vec<AttemptState>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome_count(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }
}

impl Presenter for RecordingPresenter {
    fn on_state_change(&self, state: AttemptState) {
        self.states.lock().unwrap().push(state);
    }

    fn on_outcome(&self, outcome: &AttemptOutcome) {
        self.outcomes.lock().unwrap().push(outcome.state());
    }
}
