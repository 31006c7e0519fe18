use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw scrape records
// ---------------------------------------------------------------------------

/// A single project as emitted by the Devpost scraper.
///
/// The scraper makes no guarantees: every field is optional, lists may be
/// missing entirely, and free-text fields can carry markdown artifacts.
/// All derivation happens in [`crate::convert`] with explicit presence checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProjectRecord {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub ai_summary: Option<String>,
    pub what_it_does: Option<String>,
    pub inspiration: Option<String>,
    pub how_we_built_it: Option<String>,
    pub challenges: Option<String>,
    pub accomplishments: Option<String>,
    pub what_we_learned: Option<String>,
    pub whats_next: Option<String>,
    pub full_description: Option<String>,
    pub built_with: Vec<String>,
    pub team: Vec<RawTeamMember>,
    pub github_links: Vec<String>,
    pub youtube_links: Vec<String>,
    pub demo_url: Option<String>,
    pub project_url: Option<String>,
    pub submitted_date: Option<String>,
    pub prizes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeamMember {
    #[serde(default)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Display projects (the dataset artifact)
// ---------------------------------------------------------------------------

/// A normalized, UI-ready project card.
///
/// Invariant: `title` and `summary` are non-empty for every record the
/// normalizer emits. Everything else is optional and rendered only when
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProject {
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
}

impl DisplayProject {
    /// Extract the YouTube video identifier from the stored URL, if any.
    ///
    /// Recognizes `watch?v=`, `youtu.be/` and `embed/` forms; the identifier
    /// ends at the first `&`, `?` or `#`.
    pub fn video_id(&self) -> Option<&str> {
        let url = self.youtube.as_deref()?;
        for marker in ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"] {
            if let Some(start) = url.find(marker) {
                let rest = &url[start + marker.len()..];
                let end = rest.find(['&', '?', '#']).unwrap_or(rest.len());
                let id = &rest[..end];
                if !id.is_empty() {
                    return Some(id);
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Swipe history
// ---------------------------------------------------------------------------

/// Direction of a dismissal gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Pass,
}

/// One entry of the view-history log synced to the account store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub action: SwipeAction,
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Remote account records
// ---------------------------------------------------------------------------

/// The per-user row in the remote `user_data` table.
///
/// Overwritten wholesale on every save; there are no merge semantics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserData {
    pub user_id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub liked_projects: Vec<DisplayProject>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub current_index: u64,
    #[serde(default)]
    pub passed_projects: Vec<DisplayProject>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for a wholesale user-data save.
#[derive(Debug, Clone, Default)]
pub struct UserDataParams {
    pub liked: Vec<DisplayProject>,
    pub history: Vec<HistoryEntry>,
    pub position: u64,
    pub passed: Vec<DisplayProject>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// The authenticated principal as reported by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}
