//! # Handlers: wrapping, type erasure and thread binding.
//!
//! ```text
//! closure Fn(T1..Tn) ──► IntoHandler ──► HandlerFn<(T1..Tn)>
//!                                             │
//!                                      ErasedHandler { signature, Arc<dyn Any> }
//!                                             │
//!                                      HandlerSlot { owner: ThreadToken, handle }
//! ```
//!
//! - [`IntoHandler`] / [`HandlerFn`]: uniform tuple-taking calling shape.
//! - [`ErasedHandler`]: signature-tagged handle, re-specialized by `attempt_as`.
//! - [`HandlerSlot`]: what the registry stores per registration.

mod erased;
mod into_handler;
mod slot;

pub use erased::ErasedHandler;
pub use into_handler::{HandlerFn, IntoHandler};
pub use slot::HandlerSlot;
