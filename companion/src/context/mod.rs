//! Sources of page context that can be rendered into the system prompt.

mod dom;

pub use dom::render_dom_snapshot;

use serde::{Deserialize, Serialize};

use crate::error::{CompanionError, Result};
use crate::models::DomSnapshot;

/// A captured image of the user's viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotCapture {
    pub mime_type: String,
    pub data_base64: String,
}

/// Raw accessibility tree exported by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityTree {
    pub root: serde_json::Value,
}

/// What the client told us about the page the user is looking at.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContext {
    DomSnapshot(DomSnapshot),
    Screenshot(ScreenshotCapture),
    AccessibilityTree(AccessibilityTree),
}

impl PageContext {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DomSnapshot(_) => "dom_snapshot",
            Self::Screenshot(_) => "screenshot",
            Self::AccessibilityTree(_) => "accessibility_tree",
        }
    }

    /// Render this context as prompt text.
    ///
    /// Only DOM snapshots are rendered today; the other sources return
    /// [`CompanionError::ContextUnsupported`].
    pub fn render(&self) -> Result<String> {
        match self {
            Self::DomSnapshot(snapshot) => Ok(render_dom_snapshot(snapshot)),
            Self::Screenshot(_) | Self::AccessibilityTree(_) => {
                Err(CompanionError::ContextUnsupported(self.kind().to_string()))
            }
        }
    }
}

impl From<DomSnapshot> for PageContext {
    fn from(snapshot: DomSnapshot) -> Self {
        Self::DomSnapshot(snapshot)
    }
}
