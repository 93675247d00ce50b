//! A small module runtime: named modules are registered as loader functions
//! at process start, loaded on first `require`, and expose their values
//! through named global bindings.
//!
//! This is the late-binding seam between the launcher and whatever game code
//! ships with the application. The launcher depends on module and binding
//! *names* only; the concrete game crates are wired in by the binary that
//! composes the process.

mod namespace;
mod registry;

pub use namespace::{BindingValue, Namespace, Var};
pub use registry::{Runtime, RuntimeError};
