//! Checkout flow state machine.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// States of a checkout attempt.
///
/// `Validating` and `Submitting` are the only states in which a network call
/// is in flight. `ValidationFailed`, `Success` and `SubmitError` are outcome
/// states that settle back to `Idle` before the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    ValidationFailed,
    ValidationPassed,
    Submitting,
    Success,
    SubmitError,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Validating => "validating",
            CheckoutState::ValidationFailed => "validation_failed",
            CheckoutState::ValidationPassed => "validation_passed",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Success => "success",
            CheckoutState::SubmitError => "submit_error",
        }
    }

    /// Whether a network call is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, CheckoutState::Validating | CheckoutState::Submitting)
    }

    /// Whether this is an outcome state that settles back to `Idle`.
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            CheckoutState::ValidationFailed | CheckoutState::Success | CheckoutState::SubmitError
        )
    }

    /// Check if a direct transition is allowed.
    pub fn can_transition_to(&self, next: CheckoutState) -> bool {
        use CheckoutState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (ValidationPassed, Validating)
                | (Validating, ValidationFailed)
                | (Validating, ValidationPassed)
                | (ValidationFailed, Idle)
                | (ValidationPassed, Submitting)
                | (ValidationPassed, Idle)
                | (Submitting, Success)
                | (Submitting, SubmitError)
                | (Success, Idle)
                | (SubmitError, Idle)
        )
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the state of one cart's checkout and rejects overlapping attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// Create a flow in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Move an outcome state back to `Idle`. No-op otherwise.
    pub fn settle(&mut self) {
        if self.state.is_outcome() {
            self.state = CheckoutState::Idle;
        }
    }

    /// Enter `Validating`.
    pub fn begin_validation(&mut self) -> Result<(), CommerceError> {
        self.reject_in_flight()?;
        self.settle();
        self.transition(CheckoutState::Validating)
    }

    /// Record the stock check outcome.
    pub fn finish_validation(&mut self, passed: bool) -> Result<(), CommerceError> {
        if passed {
            self.transition(CheckoutState::ValidationPassed)
        } else {
            self.transition(CheckoutState::ValidationFailed)
        }
    }

    /// Enter `Submitting`. Only allowed right after a passing validation.
    pub fn begin_submit(&mut self) -> Result<(), CommerceError> {
        self.reject_in_flight()?;
        self.transition(CheckoutState::Submitting)
    }

    /// Record the order submission outcome.
    pub fn finish_submit(&mut self, succeeded: bool) -> Result<(), CommerceError> {
        if succeeded {
            self.transition(CheckoutState::Success)
        } else {
            self.transition(CheckoutState::SubmitError)
        }
    }

    /// Force the flow back to `Idle`, e.g. after an abandoned attempt.
    pub fn reset(&mut self) {
        self.state = CheckoutState::Idle;
    }

    fn reject_in_flight(&self) -> Result<(), CommerceError> {
        if self.state.is_in_flight() {
            return Err(CommerceError::CheckoutInProgress(
                self.state.as_str().to_string(),
            ));
        }
        Ok(())
    }

    fn transition(&mut self, next: CheckoutState) -> Result<(), CommerceError> {
        if !self.state.can_transition_to(next) {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.state.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        info!(from = %self.state, to = %next, "checkout transition");
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut flow = CheckoutFlow::new();
        flow.begin_validation().unwrap();
        flow.finish_validation(true).unwrap();
        flow.begin_submit().unwrap();
        flow.finish_submit(true).unwrap();
        assert_eq!(flow.state(), CheckoutState::Success);

        flow.settle();
        assert_eq!(flow.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_failed_validation_returns_to_idle() {
        let mut flow = CheckoutFlow::new();
        flow.begin_validation().unwrap();
        flow.finish_validation(false).unwrap();
        assert_eq!(flow.state(), CheckoutState::ValidationFailed);

        // A new attempt settles the outcome first.
        flow.begin_validation().unwrap();
        assert_eq!(flow.state(), CheckoutState::Validating);
    }

    #[test]
    fn test_submit_requires_passed_validation() {
        let mut flow = CheckoutFlow::new();
        assert!(matches!(
            flow.begin_submit(),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));

        flow.begin_validation().unwrap();
        flow.finish_validation(false).unwrap();
        assert!(flow.begin_submit().is_err());
    }

    #[test]
    fn test_rejects_overlapping_attempts() {
        let mut flow = CheckoutFlow::new();
        flow.begin_validation().unwrap();
        assert!(matches!(
            flow.begin_validation(),
            Err(CommerceError::CheckoutInProgress(_))
        ));

        flow.finish_validation(true).unwrap();
        flow.begin_submit().unwrap();
        assert!(matches!(
            flow.begin_submit(),
            Err(CommerceError::CheckoutInProgress(_))
        ));
        assert!(matches!(
            flow.begin_validation(),
            Err(CommerceError::CheckoutInProgress(_))
        ));
    }

    #[test]
    fn test_submit_error_then_retry() {
        let mut flow = CheckoutFlow::new();
        flow.begin_validation().unwrap();
        flow.finish_validation(true).unwrap();
        flow.begin_submit().unwrap();
        flow.finish_submit(false).unwrap();
        assert_eq!(flow.state(), CheckoutState::SubmitError);

        flow.begin_validation().unwrap();
        flow.finish_validation(true).unwrap();
        flow.begin_submit().unwrap();
    }

    #[test]
    fn test_reset() {
        let mut flow = CheckoutFlow::new();
        flow.begin_validation().unwrap();
        flow.reset();
        assert_eq!(flow.state(), CheckoutState::Idle);
    }
}
