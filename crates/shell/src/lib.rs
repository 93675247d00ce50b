//! The platform application shell: owns the window and frame loop, receives
//! the one-shot platform creation callback, and hosts whatever game object
//! the launcher hands over. With no game installed the shell stays alive and
//! visible but renders nothing.

mod app;
mod host;

pub use app::{AppShell, Lifecycle, SavedState, ShellControl};
pub use host::{HostError, ShellHost};
