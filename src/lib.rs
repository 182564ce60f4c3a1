//! Client for a LAN network-drive service spoken over HTTP.
//!
//! The service exposes three endpoints: `GET /files?folder=`, `POST /upload`
//! (multipart `file` + `folder`) and `GET /download?folder=&filename=`. This
//! crate holds the navigation and transfer state machine on top of that
//! contract; the binary in `main.rs` is a thin CLI shell over it.

pub mod core;
pub mod explorer;
pub mod models;
pub mod services;

pub use crate::core::config::Config;
pub use crate::core::errors::{Error, Result};
pub use crate::explorer::{Action, Activated, ExplorerSession, RefreshTicket};
pub use crate::models::entry::{EntryKind, FileEntry};
pub use crate::models::path::FolderPath;
pub use crate::models::transfer::{ProgressTracker, TransferStatus};
pub use crate::services::remote::RemoteClient;
