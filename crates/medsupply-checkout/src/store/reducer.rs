//! The checkout reducer.

use super::action::CheckoutAction;
use super::state::{CheckoutState, ErrorEntry, ProcessingState};

/// Apply `action` to `state` and return the next snapshot.
///
/// Pure: no I/O, no clock, no randomness. Every action is accepted; unknown
/// actions return the state untouched.
pub fn reduce(mut state: CheckoutState, action: CheckoutAction) -> CheckoutState {
    match action {
        CheckoutAction::SetStep(step) => {
            state.current_step = step;
        }
        CheckoutAction::UpdateOrderData(patch) => {
            state.order_data.apply(patch);
        }
        CheckoutAction::SetPaymentValidation(patch) => {
            state.payment_validation.errors.extend(patch.errors);
        }
        CheckoutAction::StartProcessing { action } => {
            state.processing = ProcessingState {
                is_processing: true,
                progress: 0,
                current_action: action,
            };
        }
        CheckoutAction::UpdateProgress { progress, action } => {
            if let Some(progress) = progress {
                state.processing.progress = progress.min(100);
            }
            if action.is_some() {
                state.processing.current_action = action;
            }
        }
        CheckoutAction::FinishProcessing => {
            state.processing = ProcessingState {
                is_processing: false,
                progress: 100,
                current_action: None,
            };
        }
        CheckoutAction::SetError { field, message } => {
            state.processing.is_processing = false;
            state
                .payment_validation
                .errors
                .insert(field, ErrorEntry::Message(message));
        }
        CheckoutAction::IncrementAttempt { at } => {
            state.security.attempt_count = state.security.attempt_count.saturating_add(1);
            state.security.last_attempt = Some(at);
        }
        CheckoutAction::SetSecurityData(patch) => {
            if let Some(session_id) = patch.session_id {
                state.security.session_id = Some(session_id);
            }
            if let Some(csrf_token) = patch.csrf_token {
                state.security.csrf_token = Some(csrf_token);
            }
        }
        CheckoutAction::ResetState { keep_cart } => {
            let mut fresh = CheckoutState::default();
            if keep_cart {
                fresh.order_data.cart = std::mem::take(&mut state.order_data.cart);
            }
            return fresh;
        }
        CheckoutAction::Unknown => {}
    }
    state
}
