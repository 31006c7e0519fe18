//! HackSwipe core library.
//!
//! A swipe-to-rate gallery over scraped hackathon projects: a one-shot
//! dataset normalizer, a gesture-driven swipe session, and a thin client for
//! the optional remote account store.
//!
//! # Quick Start
//!
//! ```no_run
//! use hackswipe::{convert, Session};
//!
//! let dataset = convert::read_dataset("data/projects.json".as_ref()).unwrap();
//! let mut rng = rand::rng();
//! let session = Session::new(&dataset, &mut rng);
//! if let Some(project) = session.current() {
//!     println!("{}", project.title);
//! }
//! ```

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod models;
pub mod session;
pub mod sync;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::{AuthClient, SyncClient, UserDataClient};
pub use config::{AppConfig, ConvertConfig};
pub use error::{ConvertError, SyncApiError};
pub use models::{
    AuthUser, DisplayProject, HistoryEntry, RawProjectRecord, RawTeamMember, SwipeAction,
    UserData, UserDataParams,
};
pub use session::Session;
pub use sync::SyncHandle;
