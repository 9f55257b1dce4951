/// Main application state for the profile-and-reviews core.
/// Combines the profile manager and both review collections so the screens
/// have a single thing to construct and load.
use crate::db::RecordStore;
use crate::models::review::ReviewKind;
use crate::profile::ProfileManager;
use crate::reviews::ReviewManager;
use crate::seed::SeedData;

pub struct App {
    pub profile: ProfileManager,
    pub app_reviews: ReviewManager,
    pub food_reviews: ReviewManager,
}

impl App {
    /// Wires the three managers over one shared store, seeded from `seed`.
    pub fn new(store: RecordStore, seed: SeedData) -> Self {
        App {
            profile: ProfileManager::new(store.clone(), seed.user),
            app_reviews: ReviewManager::new(store.clone(), ReviewKind::App, seed.app_reviews),
            food_reviews: ReviewManager::new(store, ReviewKind::Food, seed.food_reviews),
        }
    }

    /// Application-start reconciliation: each manager pulls its persisted
    /// record, falling back to its seed on a miss. Records are independent,
    /// so one failing load never affects the others.
    pub async fn load(&mut self) {
        self.profile.load().await;
        self.app_reviews.load().await;
        self.food_reviews.load().await;
    }
}
