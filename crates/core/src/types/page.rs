//! Cursor-based pagination.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque pagination cursor issued by the commerce platform.
///
/// Cursors are handed back to the upstream API verbatim and are never
/// decoded or constructed locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a cursor string received from a client or from upstream.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw cursor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the raw cursor.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cursor {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Pagination state of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Cursor to request the next page with, if any.
    pub end_cursor: Option<Cursor>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_transparent() {
        let cursor = Cursor::new("eyJsYXN0X2lkIjo0Mn0=");
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(json, "\"eyJsYXN0X2lkIjo0Mn0=\"");

        let back: Cursor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cursor);
    }

    #[test]
    fn test_page_info_null_cursor() {
        let info = PageInfo {
            has_next_page: false,
            end_cursor: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"hasNextPage": false, "endCursor": null})
        );
    }
}
