// src/models/user.rs
use serde::{Deserialize, Serialize};

/// The single on-device user profile.
///
/// Serialized camelCase so the stored JSON keeps the `dateOfBirth` /
/// `profilePicture` key names the app has always written. Replaced
/// wholesale through the profile edit/save flow, never patched field by
/// field outside it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,              // Stable identity, assigned once
    pub name: String,         // Display name
    pub username: String,     // Handle shown under the name (e.g. "@jane")
    pub email: String,
    pub date_of_birth: String,   // ISO date, e.g. "1995-06-15"
    pub profile_picture: String, // URI or local asset path
}
