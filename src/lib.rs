//! Local-first profile and reviews core for a food review app.
//!
//! One user profile plus two star-rated review collections (app reviews and
//! food reviews), held in memory and mirrored to a device-local key-value
//! store. Screens read the managers' state and mutate only through their
//! operations; a single local writer is assumed throughout.

pub mod app;
pub mod db;
pub mod error;
pub mod models;
pub mod profile;
pub mod reviews;
pub mod seed;

pub use app::App;
pub use db::RecordStore;
pub use error::Error;
pub use models::review::{Review, ReviewDraft, ReviewKind, ReviewSubject};
pub use models::user::UserData;
pub use profile::ProfileManager;
pub use reviews::ReviewManager;
pub use seed::SeedData;
