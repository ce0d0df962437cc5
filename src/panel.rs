use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::view::{fragment_to_html, Node};

/// Identifies one submission; later submissions get strictly larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RequestToken(pub u64);

/// What the results area currently shows
#[derive(Debug, Clone)]
pub struct PanelState {
    /// Token of the submission that produced `content`, `None` before the first commit
    pub generation: Option<RequestToken>,
    pub language: Option<String>,
    pub content: Vec<Node>,
    pub updated_at: DateTime<Utc>,
}

impl PanelState {
    pub fn to_html(&self) -> String {
        fragment_to_html(&self.content)
    }
}

/// JSON view of the panel served at `/results`
#[derive(Debug, Serialize)]
pub struct PanelSnapshot {
    pub generation: Option<u64>,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub html: String,
}

impl From<&PanelState> for PanelSnapshot {
    fn from(state: &PanelState) -> Self {
        Self {
            generation: state.generation.map(|token| token.0),
            language: state.language.clone(),
            updated_at: state.updated_at,
            html: state.to_html(),
        }
    }
}

/// The results area shared by all submissions.
///
/// Each submission takes a token from [`ResultsPanel::issue`] before calling out,
/// and only the holder of the most recently issued token may replace the content.
pub struct ResultsPanel {
    latest_issued: AtomicU64,
    state: RwLock<PanelState>,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsPanel {
    /// Creates an empty panel
    pub fn new() -> Self {
        Self {
            latest_issued: AtomicU64::new(0),
            state: RwLock::new(PanelState {
                generation: None,
                language: None,
                content: Vec::new(),
                updated_at: Utc::now(),
            }),
        }
    }

    /// Hands out the next token
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest_issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` is still the newest one handed out
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest_issued.load(Ordering::SeqCst) == token.0
    }

    /// Replaces the content if `token` is still the latest issued.
    ///
    /// Returns `false` and leaves the panel untouched for a stale token.
    pub async fn commit(&self, token: RequestToken, content: Vec<Node>, language: &str) -> bool {
        let mut state = self.state.write().await;
        if !self.is_latest(token) {
            return false;
        }

        state.generation = Some(token);
        state.language = Some(language.to_string());
        state.content = content;
        state.updated_at = Utc::now();
        true
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> PanelState {
        self.state.read().await.clone()
    }
}
