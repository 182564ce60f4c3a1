//! Navigation and transfer session: the single source of truth for where the
//! user is, what the listing shows, and whether an upload is in flight.
//!
//! Refreshes are explicit: every navigation transition returns a
//! [`RefreshTicket`] and the listing only changes when a fetch result is
//! applied with a ticket that is still current. Tickets carry a generation
//! number, so a response that lost the race against a newer transition is
//! discarded instead of overwriting newer state.

use crate::core::errors::{Error, Result};
use crate::models::entry::FileEntry;
use crate::models::path::FolderPath;
use crate::models::transfer::{ProgressTracker, TransferStatus};
use crate::services::remote::RemoteClient;
use reqwest::Url;
use std::path::Path;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Permission to replace the listing with a fetch result for one folder.
/// Stale tickets (issued before a newer transition) no longer apply.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    generation: u64,
    folder: FolderPath,
}

impl RefreshTicket {
    pub fn folder(&self) -> &FolderPath {
        &self.folder
    }
}

/// What activating (double-clicking) an entry should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnterFolder,
    Download,
}

impl Action {
    pub fn for_entry(entry: &FileEntry) -> Self {
        if entry.is_folder() {
            Action::EnterFolder
        } else {
            Action::Download
        }
    }
}

/// Result of [`ExplorerSession::activate`].
#[derive(Debug, Clone)]
pub enum Activated {
    /// Navigated into the folder and refreshed its listing.
    Entered,
    /// A file: hand this URL to the browser, nothing else to do here.
    Download(Url),
}

pub struct ExplorerSession {
    client: RemoteClient,
    folder: FolderPath,
    entries: Vec<FileEntry>,
    generation: u64,
    transfer_tx: watch::Sender<TransferStatus>,
}

impl ExplorerSession {
    pub fn new(client: RemoteClient) -> Self {
        let (transfer_tx, _) = watch::channel(TransferStatus::Idle);
        Self {
            client,
            folder: FolderPath::root(),
            entries: Vec::new(),
            generation: 0,
            transfer_tx,
        }
    }

    pub fn folder(&self) -> &FolderPath {
        &self.folder
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn find_entry(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The back affordance is only shown away from the root.
    pub fn can_go_back(&self) -> bool {
        !self.folder.is_root()
    }

    pub fn transfer_status(&self) -> TransferStatus {
        *self.transfer_tx.borrow()
    }

    pub fn subscribe_transfer(&self) -> watch::Receiver<TransferStatus> {
        self.transfer_tx.subscribe()
    }

    /// Ticket for the folder currently shown: the mount-time initial fetch
    /// and the post-upload refresh both go through here.
    pub fn refresh_current(&mut self) -> RefreshTicket {
        self.issue_ticket()
    }

    /// Descend into a folder entry. The new path is the old one with the
    /// entry's name appended; depth is unbounded.
    pub fn enter_folder(&mut self, entry: &FileEntry) -> Result<RefreshTicket> {
        if !entry.is_folder() {
            return Err(Error::NotAFolder(entry.name.clone()));
        }
        self.folder = self.folder.child(&entry.name);
        Ok(self.issue_ticket())
    }

    /// Drop the last path segment. Valid in any state; at the root this is a
    /// no-op apart from issuing a fresh ticket.
    pub fn go_back(&mut self) -> RefreshTicket {
        self.folder = self.folder.parent();
        self.issue_ticket()
    }

    /// Apply a fetch result. Replaces the listing wholesale on success and
    /// returns true; a stale ticket or a failed fetch leaves the current
    /// entries untouched (content and order) and returns false.
    pub fn apply_listing(
        &mut self,
        ticket: &RefreshTicket,
        listing: Result<Vec<FileEntry>>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(folder = %ticket.folder, "discarding stale listing response");
            return false;
        }
        match listing {
            Ok(entries) => {
                self.entries = entries;
                true
            }
            Err(err) => {
                warn!(folder = %ticket.folder, error = %err, "listing fetch failed, keeping previous view");
                false
            }
        }
    }

    /// Fetch the ticket's folder and apply the result.
    pub async fn run_refresh(&mut self, ticket: RefreshTicket) -> bool {
        let listing = self.client.fetch_listing(&ticket.folder).await;
        self.apply_listing(&ticket, listing)
    }

    /// Double-click dispatch: folders are entered and refreshed, files yield
    /// their retrieval URL. Activating a folder never builds a download URL;
    /// activating a file never touches the navigation path.
    pub async fn activate(&mut self, entry: &FileEntry) -> Result<Activated> {
        match Action::for_entry(entry) {
            Action::EnterFolder => {
                let ticket = self.enter_folder(entry)?;
                self.run_refresh(ticket).await;
                Ok(Activated::Entered)
            }
            Action::Download => Ok(Activated::Download(self.download_url(entry)?)),
        }
    }

    /// Retrieval URL for a file entry in the current folder.
    pub fn download_url(&self, entry: &FileEntry) -> Result<Url> {
        if !entry.is_file() {
            return Err(Error::NotAFile(entry.name.clone()));
        }
        self.client.download_url(&self.folder, &entry.name)
    }

    /// Upload a local file into the current folder, taking its name from the
    /// last path component.
    pub async fn upload_path(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?
            .to_string();
        let data = tokio::fs::read(path).await?;
        self.upload_bytes(&name, data).await
    }

    /// Upload a blob into the folder that is current right now (the target
    /// is not re-read mid-flight). Progress goes out on the transfer channel
    /// as a non-decreasing percent sequence; the status always ends at
    /// `Idle`, passing through `Succeeded` or `Failed` on the way. A
    /// successful upload refreshes whichever folder is current at completion
    /// time.
    pub async fn upload_bytes(&mut self, file_name: &str, data: Vec<u8>) -> Result<()> {
        let target = self.folder.clone();
        let progress_tx = self.transfer_tx.clone();
        let mut tracker = ProgressTracker::new();
        let result = self
            .client
            .upload(&target, file_name, data, move |sent, total| {
                progress_tx.send_replace(tracker.update(sent, Some(total)));
            })
            .await;

        match result {
            Ok(()) => {
                self.transfer_tx.send_replace(TransferStatus::Succeeded);
                self.transfer_tx.send_replace(TransferStatus::Idle);
                let ticket = self.refresh_current();
                self.run_refresh(ticket).await;
                Ok(())
            }
            Err(err) => {
                warn!(folder = %target, file = file_name, error = %err, "upload failed");
                self.transfer_tx.send_replace(TransferStatus::Failed);
                self.transfer_tx.send_replace(TransferStatus::Idle);
                Err(err)
            }
        }
    }

    fn issue_ticket(&mut self) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket {
            generation: self.generation,
            folder: self.folder.clone(),
        }
    }
}
