//! Built-in first-run data.
//!
//! Used only when a record has never been persisted; once the user saves
//! anything, the stored copy wins on every subsequent load.

use crate::models::review::{Review, ReviewSubject};
use crate::models::user::UserData;

/// The fallback profile and review lists handed to the managers at
/// construction. Read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub user: UserData,
    pub app_reviews: Vec<Review>,
    pub food_reviews: Vec<Review>,
}

impl SeedData {
    pub fn builtin() -> Self {
        SeedData {
            user: UserData {
                id: 1,
                name: "Alex Rivera".into(),
                username: "@alexrivera".into(),
                email: "alex.rivera@example.com".into(),
                date_of_birth: "1995-06-15".into(),
                profile_picture: "assets/images/avatar.jpg".into(),
            },
            app_reviews: vec![
                app_review(1, 5, "Amazing app! Love the food recommendations.", "2024-11-10"),
                app_review(2, 4, "Great interface, easy to use.", "2024-10-28"),
            ],
            food_reviews: vec![
                food_review(1, "Lomi", 5, "Delicious and comforting noodle soup.", "2024-11-12"),
                food_review(2, "Fried Chicken", 4, "Juicy and well-seasoned, a must-try!", "2024-11-05"),
                food_review(
                    3,
                    "Menudo",
                    3,
                    "Hearty and flavorful, but a bit too salty for my taste.",
                    "2024-10-30",
                ),
            ],
        }
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self::builtin()
    }
}

fn app_review(id: i64, rating: u8, comment: &str, date: &str) -> Review {
    Review {
        id,
        rating,
        comment: comment.into(),
        date: date.into(),
        subject: ReviewSubject::App {},
    }
}

fn food_review(id: i64, food_name: &str, rating: u8, comment: &str, date: &str) -> Review {
    Review {
        id,
        rating,
        comment: comment.into(),
        date: date.into(),
        subject: ReviewSubject::Food {
            food_name: food_name.into(),
        },
    }
}
