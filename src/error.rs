//! Error types returned by the dispatcher.
//!
//! [`DispatchError`] covers both emission failures and run-loop misuse. It
//! provides helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! Emitting an event nobody registered is **not** an error; it is a no-op.

use thiserror::Error;

use crate::signature::Signature;

/// # Errors produced by the dispatcher.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A handler registered under the event does not accept the emitted
    /// argument shape.
    ///
    /// Handlers earlier in registration order have already run for this
    /// emission; remaining handlers are skipped.
    #[error("invalid argument signature for event '{event}': handler expects {expected}, emitted {actual}")]
    InvalidArgumentSignature {
        /// Event name passed to `emit`.
        event: String,
        /// Parameter types of the mismatching handler.
        expected: Signature,
        /// Parameter types of the emitted argument tuple.
        actual: Signature,
    },

    /// The run loop was entered again from a handler it is currently running.
    #[error("run loop re-entered from its own thread")]
    LoopReentered,
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use looper::DispatchError;
    ///
    /// assert_eq!(DispatchError::LoopReentered.as_label(), "loop_reentered");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::InvalidArgumentSignature { .. } => "invalid_argument_signature",
            DispatchError::LoopReentered => "loop_reentered",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::InvalidArgumentSignature {
                event,
                expected,
                actual,
            } => format!("event={event} expected={expected} actual={actual}"),
            DispatchError::LoopReentered => "run loop re-entered".to_string(),
        }
    }
}
