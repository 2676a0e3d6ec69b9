//! Navigation requests.

use serde::Serialize;
use uuid::Uuid;

/// How a committed navigation changes history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    /// Append an entry, dropping any forward entries.
    Push,
    /// Overwrite the current entry.
    Replace,
    /// Move the cursor to an existing entry (back / forward).
    Pop(usize),
}

/// One navigation action: link click, programmatic redirect, initial load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Correlation ID for logs.
    pub id: Uuid,
    pub path: String,
    pub kind: NavigationKind,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>, kind: NavigationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            kind,
        }
    }

    pub fn push(path: impl Into<String>) -> Self {
        Self::new(path, NavigationKind::Push)
    }

    pub fn replace(path: impl Into<String>) -> Self {
        Self::new(path, NavigationKind::Replace)
    }

    pub(crate) fn pop(path: impl Into<String>, index: usize) -> Self {
        Self::new(path, NavigationKind::Pop(index))
    }

    /// Reuse an existing correlation ID (e.g. an HTTP request ID).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}
