use super::{
    api::ScoreApi,
    types::{RiskResult, TransactionInput},
};
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Message shown for every failed submission, whatever the cause.
pub const GENERIC_ERROR: &str = "Something went wrong scoring this transaction. Try again.";

// Form states. Exactly one is shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Loading,
    Failed(String),
    Scored(RiskResult),
}

// Form events
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit,
    Succeeded(RiskResult),
    Failed,
    Reset,
}

pub struct ScoreForm {
    state: FormState,
    pub input: TransactionInput,
}

impl ScoreForm {
    pub fn new(input: TransactionInput) -> Self {
        Self {
            state: FormState::Idle,
            input,
        }
    }

    pub fn current_state(&self) -> &FormState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FormState::Loading)
    }

    /// Submission is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn transition(&mut self, event: FormEvent) -> Result<()> {
        debug!("Form processing event {:?} in state {:?}", event, self.state);

        let new_state = match (&self.state, event) {
            (FormState::Loading, FormEvent::Submit) => {
                warn!("Ignoring submit while a request is in flight");
                return Err(Error::invalid_input("A score request is already in flight"));
            }
            (_, FormEvent::Submit) => FormState::Loading,
            (FormState::Loading, FormEvent::Succeeded(result)) => FormState::Scored(result),
            (FormState::Loading, FormEvent::Failed) => FormState::Failed(GENERIC_ERROR.to_string()),
            (FormState::Loading, FormEvent::Reset) => {
                warn!("Ignoring reset while a request is in flight");
                return Err(Error::invalid_input(
                    "Cannot reset while a score request is in flight",
                ));
            }
            (_, FormEvent::Reset) => {
                self.input = TransactionInput::default();
                FormState::Idle
            }
            (state, event) => {
                warn!("Invalid form transition from {:?} with event {:?}", state, event);
                return Err(Error::internal(format!(
                    "Invalid transition from {:?} with event {:?}",
                    state, event
                )));
            }
        };

        self.state = new_state;
        Ok(())
    }

    /// Clears both fields and any shown result or error.
    pub fn reset(&mut self) -> Result<()> {
        self.transition(FormEvent::Reset)
    }

    /// Validates the input, then runs one request to completion. Whatever the
    /// request does, the form leaves `Loading` before this returns.
    pub async fn submit(&mut self, api: &dyn ScoreApi) -> Result<&FormState> {
        validate(&self.input)?;
        self.transition(FormEvent::Submit)?;

        let event = match api.score(&self.input).await {
            Ok(result) => {
                info!(risk_score = result.risk_score, "Transaction scored");
                FormEvent::Succeeded(result)
            }
            Err(e) => {
                warn!("Scoring request failed: {}", e);
                FormEvent::Failed
            }
        };

        self.transition(event)?;
        Ok(&self.state)
    }
}

fn validate(input: &TransactionInput) -> Result<()> {
    if input.amount.trim().is_empty() {
        return Err(Error::invalid_input("amount is required"));
    }
    if input.merchant.trim().is_empty() {
        return Err(Error::invalid_input("merchant is required"));
    }
    Ok(())
}
