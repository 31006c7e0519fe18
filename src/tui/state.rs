use std::time::Instant;

use crate::client::SyncClient;
use crate::config::AppConfig;
use crate::convert;
use crate::models::{AuthUser, DisplayProject, SwipeAction, UserDataParams};
use crate::session::Session;
use crate::sync::SyncHandle;

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Loading the dataset artifact and building the shuffled queue.
    LoadingDataset,
    /// One card at a time, accepting swipe gestures.
    Swiping,
    /// Read-only gallery over the liked set.
    LikedGallery,
    /// Every card dismissed; totals and restart.
    Exhausted,
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Runtime configuration.
    pub(crate) config: AppConfig,
    /// The full dataset as loaded from disk; restarts reshuffle from here.
    pub(crate) dataset: Vec<DisplayProject>,
    /// The swipe session over the dataset.
    pub(crate) session: Session,
    /// Remote store client, present when sync is configured.
    pub(crate) client: Option<SyncClient>,
    /// The signed-in principal, if any.
    pub(crate) identity: Option<AuthUser>,
    /// Background sync channel.
    pub(crate) sync: SyncHandle,
    /// Where the current card drag started, in terminal cells.
    pub(crate) drag_origin: Option<(u16, u16)>,
    /// Last observed drag position.
    pub(crate) drag_last: Option<(u16, u16)>,
    /// Currently selected row in the liked gallery.
    pub(crate) gallery_selected: usize,
    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Non-error status message (sync results, sign-in hints).
    pub(crate) status_message: Option<String>,
    /// Error that should abort the application after terminal restore.
    pub fatal_error: Option<String>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl AppState {
    /// Create the initial application state from configuration.
    pub fn new(config: AppConfig) -> Self {
        let mut rng = rand::rng();
        Self {
            screen: AppScreen::LoadingDataset,
            config,
            dataset: Vec::new(),
            session: Session::new(&[], &mut rng),
            client: None,
            identity: None,
            sync: SyncHandle::new(),
            drag_origin: None,
            drag_last: None,
            gallery_selected: 0,
            error_message: None,
            status_message: None,
            fatal_error: None,
            should_quit: false,
        }
    }

    /// Read the dataset artifact and build the shuffled queue.
    pub(crate) fn load_dataset(&mut self) -> Result<(), String> {
        let dataset = convert::read_dataset(&self.config.dataset_path)
            .map_err(|e| format!("Failed to load dataset: {e}"))?;
        if dataset.is_empty() {
            return Err(format!(
                "Dataset '{}' contains no projects",
                self.config.dataset_path.display()
            ));
        }
        let mut rng = rand::rng();
        self.session = Session::new(&dataset, &mut rng);
        self.dataset = dataset;
        Ok(())
    }

    /// Construct the sync client and resolve the signed-in identity.
    ///
    /// Any failure here leaves the app fully local: the error only reaches
    /// the status line.
    pub(crate) fn connect_sync(&mut self) {
        let (Some(url), Some(key)) = (
            self.config.sync_url.as_deref(),
            self.config.sync_key.as_deref(),
        ) else {
            return;
        };

        let mut client = match SyncClient::new(url, key) {
            Ok(client) => client,
            Err(e) => {
                self.set_status(format!("Sync unavailable: {e}"));
                return;
            }
        };

        if let Some(token) = self.config.access_token.clone() {
            if let Err(e) = client.set_access_token(&token) {
                self.set_status(format!("Sync unavailable: {e}"));
                return;
            }
            match client.auth().user() {
                Ok(Some(user)) => {
                    let previously_liked = client
                        .user_data()
                        .load_user_data(&user.id)
                        .map(|d| d.liked_projects.len())
                        .unwrap_or(0);
                    self.set_status(format!(
                        "Signed in as {} ({previously_liked} previously liked)",
                        user.email.as_deref().unwrap_or(&user.id)
                    ));
                    self.identity = Some(user);
                }
                Ok(None) => {
                    self.set_status("Access token expired; swiping locally".to_string());
                }
                Err(e) => {
                    self.set_status(format!("Sync unavailable: {e}"));
                }
            }
        }

        self.client = Some(client);
    }

    /// Accept a dismissal gesture for the current card. Ignored while a
    /// dismissal is in flight.
    pub(crate) fn swipe(&mut self, direction: SwipeAction) {
        if self.session.swipe(direction, Instant::now()) {
            self.clear_error();
        }
    }

    /// Advance the session timer; returns `true` when the card changed.
    pub(crate) fn tick_session(&mut self) -> bool {
        self.session.tick(Instant::now())
    }

    /// Fire a background save of the whole session. No-op unless signed in.
    pub(crate) fn queue_sync(&mut self) {
        let (Some(client), Some(user)) = (self.client.as_ref(), self.identity.as_ref()) else {
            return;
        };
        let params = UserDataParams {
            liked: self.session.liked().to_vec(),
            history: self.session.history().to_vec(),
            position: self.session.position() as u64,
            passed: self.session.passed().to_vec(),
            email: user.email.clone(),
        };
        self.sync
            .spawn_save(client.clone(), user.id.clone(), params);
    }

    /// Revoke the current session token and drop the identity. The remote
    /// record stays as last synced.
    pub(crate) fn sign_out(&mut self) {
        let Some(client) = self.client.as_ref() else {
            return;
        };
        if self.identity.is_none() {
            return;
        }
        match client.auth().sign_out() {
            Ok(()) => self.set_status("Signed out; swiping locally".to_string()),
            Err(e) => self.set_status(format!("Sign-out failed: {e}")),
        }
        self.identity = None;
    }

    /// Re-shuffle and start over from the full dataset.
    pub(crate) fn restart(&mut self) {
        let mut rng = rand::rng();
        let dataset = std::mem::take(&mut self.dataset);
        self.session.restart(&dataset, &mut rng);
        self.dataset = dataset;
        self.gallery_selected = 0;
        self.screen = AppScreen::Swiping;
    }

    /// Where leaving the liked gallery should land.
    pub(crate) fn gallery_return_screen(&self) -> AppScreen {
        if self.session.is_exhausted() {
            AppScreen::Exhausted
        } else {
            AppScreen::Swiping
        }
    }

    /// Clear any error message.
    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message.
    pub(crate) fn set_error(&mut self, message: String) {
        self.status_message = None;
        self.error_message = Some(message);
    }

    /// Set a non-error status message.
    pub(crate) fn set_status(&mut self, message: String) {
        self.error_message = None;
        self.status_message = Some(message);
    }
}
