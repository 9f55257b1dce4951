//! In-memory review collection state plus create/update/delete, mirrored
//! to the record store as a full snapshot after every mutation.
//!
//! A single local writer is assumed: the UI serializes user-triggered
//! mutations, so the read-current / mutate / persist-snapshot sequence
//! never races. A failed snapshot write is logged and not rolled back;
//! the in-memory state already reflects what the user did, and the
//! previous stored snapshot stays intact.

use chrono::{Local, Utc};
use tracing::{error, warn};

use crate::db::RecordStore;
use crate::error::Error;
use crate::models::review::{Review, ReviewDraft, ReviewKind, ReviewSubject};

// The original form pre-selects five stars
const DEFAULT_RATING: u8 = 5;

/// Owns one review collection (app or food) and the sole mutation surface
/// over it. Newest review is always first.
pub struct ReviewManager {
    store: RecordStore,
    kind: ReviewKind,
    reviews: Vec<Review>,
    next_id: i64,
}

impl ReviewManager {
    /// Builds a manager seeded with the given fallback list. The seed stays
    /// in effect until a successful [`load`](Self::load) replaces it.
    pub fn new(store: RecordStore, kind: ReviewKind, seed: Vec<Review>) -> Self {
        let next_id = next_id_after(&seed);
        ReviewManager {
            store,
            kind,
            reviews: seed,
            next_id,
        }
    }

    pub fn kind(&self) -> ReviewKind {
        self.kind
    }

    /// Current in-memory collection, newest first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Replaces the in-memory list with the persisted one, if any. A miss
    /// or an unreadable record keeps the current list and only logs.
    pub async fn load(&mut self) {
        match self.store.get::<Vec<Review>>(self.kind.storage_key()).await {
            Ok(Some(saved)) => {
                self.next_id = next_id_after(&saved);
                self.reviews = saved;
            }
            Ok(None) => {}
            Err(e) => warn!(
                "could not load {}, keeping current list: {}",
                self.kind.storage_key(),
                e
            ),
        }
    }

    /// Validates the draft, creates the review, and prepends it. The new
    /// record is returned; the snapshot write is best-effort and its
    /// failure is logged, never surfaced.
    pub async fn add(&mut self, draft: ReviewDraft) -> Result<Review, Error> {
        draft.validate_new(self.kind)?;

        let review = Review {
            id: self.allocate_id(),
            rating: draft.rating.unwrap_or(DEFAULT_RATING),
            comment: draft.comment.unwrap_or_default(),
            date: draft.date.unwrap_or_else(today),
            subject: match self.kind {
                ReviewKind::App => ReviewSubject::App {},
                ReviewKind::Food => ReviewSubject::Food {
                    food_name: draft.food_name.unwrap_or_default(),
                },
            },
        };

        self.reviews.insert(0, review.clone());
        self.persist().await;
        Ok(review)
    }

    /// Merges the given fields into the review with `id`. Fields the draft
    /// does not carry are left alone, as is every other element.
    pub async fn update(&mut self, id: i64, changes: ReviewDraft) -> Result<Review, Error> {
        changes.validate_changes(self.kind)?;

        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound { id })?;

        if let Some(rating) = changes.rating {
            review.rating = rating;
        }
        if let Some(comment) = changes.comment {
            review.comment = comment;
        }
        if let Some(date) = changes.date {
            review.date = date;
        }
        if let Some(food_name) = changes.food_name {
            // Only the food variant has this field; an app collection
            // silently ignores it.
            if let ReviewSubject::Food { food_name: current } = &mut review.subject {
                *current = food_name;
            }
        }

        let updated = review.clone();
        self.persist().await;
        Ok(updated)
    }

    /// Removes the review with `id` after the caller-supplied confirmation
    /// answers yes. Deleting an absent id is a no-op. Returns whether an
    /// element was actually removed.
    pub async fn delete(&mut self, id: i64, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != id);
        if self.reviews.len() == before {
            return false;
        }
        self.persist().await;
        true
    }

    // Epoch-millis stamp, bumped past every id handed out before so two
    // adds inside the same millisecond cannot collide.
    fn allocate_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.next_id);
        self.next_id = id + 1;
        id
    }

    async fn persist(&self) {
        if let Err(e) = self.store.set(self.kind.storage_key(), &self.reviews).await {
            error!("failed to save {}: {}", self.kind.storage_key(), e);
        }
    }
}

fn next_id_after(reviews: &[Review]) -> i64 {
    reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    async fn test_store() -> RecordStore {
        let store = RecordStore::open(":memory:").unwrap();
        store.create_schema().await.unwrap();
        store
    }

    async fn app_manager() -> ReviewManager {
        ReviewManager::new(
            test_store().await,
            ReviewKind::App,
            SeedData::builtin().app_reviews,
        )
    }

    async fn food_manager() -> ReviewManager {
        ReviewManager::new(
            test_store().await,
            ReviewKind::Food,
            SeedData::builtin().food_reviews,
        )
    }

    fn draft(comment: &str, rating: u8) -> ReviewDraft {
        ReviewDraft {
            comment: Some(comment.into()),
            rating: Some(rating),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_prepends_with_fresh_id_and_todays_date() {
        let mut manager =
            ReviewManager::new(test_store().await, ReviewKind::App, Vec::new());

        let created = manager.add(draft("Great!", 5)).await.unwrap();

        assert_eq!(manager.reviews().len(), 1);
        assert_eq!(manager.reviews()[0], created);
        assert_eq!(created.rating, 5);
        assert_eq!(created.comment, "Great!");
        assert_eq!(created.date, today());
    }

    #[tokio::test]
    async fn add_puts_newest_first() {
        let mut manager = app_manager().await;
        let before = manager.reviews().len();

        let created = manager.add(draft("Newest", 3)).await.unwrap();

        assert_eq!(manager.reviews().len(), before + 1);
        assert_eq!(manager.reviews()[0].id, created.id);
        // Seed entries keep their relative order behind the new one
        assert_eq!(manager.reviews()[1].comment, "Amazing app! Love the food recommendations.");
    }

    #[tokio::test]
    async fn add_ids_are_unique_under_rapid_adds() {
        let mut manager =
            ReviewManager::new(test_store().await, ReviewKind::App, Vec::new());

        let mut ids = Vec::new();
        for i in 0..20 {
            let created = manager.add(draft(&format!("review {i}"), 4)).await.unwrap();
            ids.push(created.id);
        }

        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[tokio::test]
    async fn add_rejects_invalid_input_without_mutating() {
        let mut manager = app_manager().await;
        let before = manager.reviews().to_vec();

        let err = manager.add(draft("", 5)).await.unwrap_err();
        assert!(matches!(err, Error::Validation { field: "comment", .. }));

        let err = manager.add(draft("fine", 9)).await.unwrap_err();
        assert!(matches!(err, Error::Validation { field: "rating", .. }));

        assert_eq!(manager.reviews(), before.as_slice());
    }

    #[tokio::test]
    async fn food_add_requires_food_name() {
        let mut manager = food_manager().await;
        let before = manager.reviews().len();

        let mut d = draft("ok", 5);
        d.food_name = Some("".into());
        let err = manager.add(d).await.unwrap_err();

        assert!(matches!(err, Error::Validation { field: "foodName", .. }));
        assert_eq!(manager.reviews().len(), before);
    }

    #[tokio::test]
    async fn food_add_carries_the_food_name() {
        let mut manager = food_manager().await;

        let mut d = draft("Crispy outside, soft inside.", 5);
        d.food_name = Some("Bibingka".into());
        let created = manager.add(d).await.unwrap();

        assert_eq!(created.food_name(), Some("Bibingka"));
    }

    #[tokio::test]
    async fn update_touches_only_named_fields_of_one_element() {
        let mut manager = food_manager().await;
        let untouched: Vec<_> = manager
            .reviews()
            .iter()
            .filter(|r| r.id != 2)
            .cloned()
            .collect();

        let changes = ReviewDraft {
            rating: Some(2),
            ..Default::default()
        };
        let updated = manager.update(2, changes).await.unwrap();

        assert_eq!(updated.rating, 2);
        // Unnamed fields unchanged
        assert_eq!(updated.food_name(), Some("Fried Chicken"));
        assert_eq!(updated.comment, "Juicy and well-seasoned, a must-try!");
        // Other elements unchanged, order preserved
        let survivors: Vec<_> = manager
            .reviews()
            .iter()
            .filter(|r| r.id != 2)
            .cloned()
            .collect();
        assert_eq!(survivors, untouched);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let mut manager = app_manager().await;
        let before = manager.reviews().to_vec();

        let err = manager.update(999, draft("nope", 1)).await.unwrap_err();

        assert!(matches!(err, Error::NotFound { id: 999 }));
        assert_eq!(manager.reviews(), before.as_slice());
    }

    #[tokio::test]
    async fn delete_is_confirmed_and_idempotent() {
        let mut manager = food_manager().await;
        let before = manager.reviews().len();

        // Dismissed confirmation leaves everything alone
        assert!(!manager.delete(1, || false).await);
        assert_eq!(manager.reviews().len(), before);

        // Confirmed delete removes exactly one element
        assert!(manager.delete(1, || true).await);
        assert_eq!(manager.reviews().len(), before - 1);
        assert!(manager.reviews().iter().all(|r| r.id != 1));

        // Second delete of the same id is a quiet no-op
        assert!(!manager.delete(1, || true).await);
        assert_eq!(manager.reviews().len(), before - 1);
    }

    #[tokio::test]
    async fn mutations_round_trip_through_the_store() {
        let store = test_store().await;
        let mut manager = ReviewManager::new(
            store.clone(),
            ReviewKind::Food,
            SeedData::builtin().food_reviews,
        );

        let mut d = draft("Perfectly charred.", 4);
        d.food_name = Some("Inihaw na Liempo".into());
        manager.add(d).await.unwrap();
        let in_memory = manager.reviews().to_vec();

        // A fresh manager over the same store sees the persisted snapshot
        let mut reloaded = ReviewManager::new(store, ReviewKind::Food, Vec::new());
        reloaded.load().await;
        assert_eq!(reloaded.reviews(), in_memory.as_slice());
    }

    #[tokio::test]
    async fn load_miss_keeps_the_seed() {
        let mut manager = app_manager().await;
        let seed = manager.reviews().to_vec();

        manager.load().await;

        assert_eq!(manager.reviews(), seed.as_slice());
    }

    #[tokio::test]
    async fn load_failure_keeps_the_seed() {
        let store = test_store().await;
        store.set("appReviews", &"not a review list").await.unwrap();

        let mut manager = ReviewManager::new(
            store,
            ReviewKind::App,
            SeedData::builtin().app_reviews,
        );
        let seed = manager.reviews().to_vec();
        manager.load().await;

        assert_eq!(manager.reviews(), seed.as_slice());
    }

    #[tokio::test]
    async fn persistence_failure_keeps_the_in_memory_mutation() {
        // No schema: every snapshot write will fail
        let broken = RecordStore::open(":memory:").unwrap();
        let mut manager = ReviewManager::new(broken, ReviewKind::App, Vec::new());

        let created = manager.add(draft("still here", 4)).await.unwrap();

        assert_eq!(manager.reviews().len(), 1);
        assert_eq!(manager.reviews()[0].id, created.id);
    }
}
