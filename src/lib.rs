//! Engine behind an interactive billing-field extraction assistant: chat
//! with a completion service about which invoice fields to pull, scan
//! uploaded PDF text for them, and hand back an xlsx buffer for download.
//! The rendering layer is the host's business; it talks to this crate
//! through [`SessionState::dispatch`] and the accessors on [`SessionState`].

pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod matcher;
pub mod pdf_text;
pub mod session;

pub use chat::{ChatRole, ChatTurn, CompletionService, RemoteCompletion};
pub use config::Config;
pub use controller::{Outcome, SessionState, UiEvent, UploadedDocument};
pub use error::Error;
pub use matcher::{DEFAULT_FIELDS, ExtractedRow, FIELD_KEYWORDS};
pub use session::{ChatSession, derive_fields};
