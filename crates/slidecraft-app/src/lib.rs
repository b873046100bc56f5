//! Slidecraft host shell
//!
//! Wires the editor core to persistence and exposes the command-line tools.

pub mod config;
pub mod error;
pub mod session;
pub mod shortcuts;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use session::EditorSession;
pub use shortcuts::{Shortcut, ShortcutCommand, ShortcutRegistry};
