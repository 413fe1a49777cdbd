pub mod action;
#[cfg(feature = "clipboard")]
pub mod clipboard;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod format;
pub mod key;
pub mod notify;
pub mod projection;
pub mod store;
pub mod traits;
pub mod types;

pub use crate::action::Action;
#[cfg(feature = "clipboard")]
pub use crate::clipboard::SystemClipboard;
pub use crate::config::{DebounceDelay, InputKind, OtpConfig};
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::ConfigError;
pub use crate::format::{FormatSpec, Segment};
pub use crate::key::{InputEvent, KeyCode};
pub use crate::store::{ComponentId, MemoryVariables, VariableKey};
pub use crate::traits::{Clipboard, FormulaEvaluator, VariableStore};
pub use crate::types::{Command, StateFlags, TriggerEvent};
