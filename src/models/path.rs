use crate::core::errors::{Error, Result};
use std::fmt;

/// Slash-delimited folder path relative to the drive root; the empty string
/// is the root itself. Segments only ever come from folder names the service
/// returned, so the path never contains empty segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FolderPath(String);

impl FolderPath {
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a user-typed path. Rejects empty segments, so `a//b`, `/a` and
    /// `a/` are all invalid; the empty string is the root.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        if s.split('/').any(|seg| seg.is_empty()) {
            return Err(Error::InvalidPath(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the named subfolder. At the root this is just the name,
    /// avoiding a leading separator.
    pub fn child(&self, name: &str) -> Self {
        debug_assert!(!name.is_empty() && !name.contains('/'));
        if self.is_root() {
            Self(name.to_string())
        } else {
            Self(format!("{}/{}", self.0, name))
        }
    }

    /// Path with the last segment removed. Split, pop, rejoin: at the root
    /// the single empty segment is popped and rejoined to the empty string,
    /// so the operation is idempotent there.
    pub fn parent(&self) -> Self {
        let mut parts: Vec<&str> = self.0.split('/').collect();
        parts.pop();
        Self(parts.join("/"))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|seg| !seg.is_empty())
    }

    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
