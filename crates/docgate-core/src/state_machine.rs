//! View transition table

use crate::error::StateMachineError;
use crate::types::View;

/// Validates a view transition.
///
/// Staying in the same view is not a transition and is never allowed here;
/// actions that keep the view (help, input) do not go through this check.
pub fn validate_transition(from: View, to: View) -> Result<(), StateMachineError> {
    if allowed(from, to) {
        Ok(())
    } else {
        tracing::debug!("rejected view transition {:?} -> {:?}", from, to);
        Err(StateMachineError::IllegalTransition { from, to })
    }
}

/// Views reachable from `from`
pub fn allowed_transitions(from: View) -> Vec<View> {
    use View::*;
    match from {
        Login => vec![Catalog],
        Catalog => vec![Viewer, Login],
        Viewer => vec![Catalog, Login],
    }
}

fn allowed(from: View, to: View) -> bool {
    allowed_transitions(from).into_iter().any(|v| v == to)
}
