// src/models/review.rs
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which of the two review collections a review belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewKind {
    App,
    Food,
}

impl ReviewKind {
    /// The storage key the collection is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            ReviewKind::App => "appReviews",
            ReviewKind::Food => "foodReviews",
        }
    }
}

/// A star-rated text review.
///
/// The food-specific field lives in the flattened [`ReviewSubject`], so an
/// app review serializes as `{id, rating, comment, date}` and a food review
/// additionally carries `foodName`, the same wire shape the app has always
/// stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,      // Unique within its collection
    pub rating: u8,   // Stars, 1 through 5
    pub comment: String,
    pub date: String, // ISO date, defaults to the creation date
    #[serde(flatten)]
    pub subject: ReviewSubject,
}

/// What a review is about. Untagged on the wire: the presence of `foodName`
/// is what distinguishes a food review in stored JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ReviewSubject {
    Food {
        #[serde(rename = "foodName")]
        food_name: String,
    },
    App {},
}

impl Review {
    pub fn kind(&self) -> ReviewKind {
        match self.subject {
            ReviewSubject::App {} => ReviewKind::App,
            ReviewSubject::Food { .. } => ReviewKind::Food,
        }
    }

    pub fn food_name(&self) -> Option<&str> {
        match &self.subject {
            ReviewSubject::Food { food_name } => Some(food_name),
            ReviewSubject::App {} => None,
        }
    }
}

/// Form input for creating or editing a review. Every field is optional:
/// `add` fills in defaults for what the form left blank, `update` only
/// touches the fields that are present.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReviewDraft {
    #[serde(rename = "foodName", default, skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub date: Option<String>,
}

impl ReviewDraft {
    /// Checks the draft is complete enough to become a new review:
    /// a non-empty comment, an in-range rating (when given), and a
    /// non-empty food name for the food collection.
    pub fn validate_new(&self, kind: ReviewKind) -> Result<(), Error> {
        match &self.comment {
            Some(comment) if !comment.trim().is_empty() => {}
            _ => return Err(Error::missing("comment")),
        }
        self.validate_changes(kind)?;
        if kind == ReviewKind::Food {
            match &self.food_name {
                Some(name) if !name.trim().is_empty() => {}
                _ => return Err(Error::missing("foodName")),
            }
        }
        Ok(())
    }

    /// Checks only the fields the draft actually carries, for partial
    /// updates where omitted fields stay as they are.
    pub fn validate_changes(&self, kind: ReviewKind) -> Result<(), Error> {
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(Error::Validation {
                    field: "rating",
                    message: "must be between 1 and 5",
                });
            }
        }
        if let Some(comment) = &self.comment {
            if comment.trim().is_empty() {
                return Err(Error::missing("comment"));
            }
        }
        if kind == ReviewKind::Food {
            if let Some(name) = &self.food_name {
                if name.trim().is_empty() {
                    return Err(Error::missing("foodName"));
                }
            }
        }
        Ok(())
    }
}
