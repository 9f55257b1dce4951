//! The user profile and its edit-buffer state machine.
//!
//! Two states: viewing (no draft) and editing (a draft copy of the
//! committed profile). Edits only touch the draft; `save` persists it and
//! commits, `cancel` throws it away. The committed profile is what screens
//! render until a save succeeds.

use tracing::warn;

use crate::db::{RecordStore, USER_DATA_KEY};
use crate::error::Error;
use crate::models::user::UserData;

pub struct ProfileManager {
    store: RecordStore,
    user: UserData,
    draft: Option<UserData>,
}

impl ProfileManager {
    /// Builds a manager seeded with the given fallback profile, in the
    /// viewing state.
    pub fn new(store: RecordStore, seed: UserData) -> Self {
        ProfileManager {
            store,
            user: seed,
            draft: None,
        }
    }

    /// The committed profile, which is what the screens should render.
    pub fn user(&self) -> &UserData {
        &self.user
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Replaces the committed profile with the persisted one, if any.
    /// A miss or an unreadable record keeps the current profile and logs.
    pub async fn load(&mut self) {
        match self.store.get::<UserData>(USER_DATA_KEY).await {
            Ok(Some(saved)) => self.user = saved,
            Ok(None) => {}
            Err(e) => warn!("could not load {}, keeping current profile: {}", USER_DATA_KEY, e),
        }
    }

    /// Enters the editing state with a copy of the committed profile and
    /// returns the draft for mutation. Calling this while already editing
    /// keeps the draft as it is.
    pub fn start_edit(&mut self) -> &mut UserData {
        let user = &self.user;
        self.draft.get_or_insert_with(|| user.clone())
    }

    /// The draft under edit, if any. Field-level edits go through here and
    /// never touch the committed profile.
    pub fn draft_mut(&mut self) -> Option<&mut UserData> {
        self.draft.as_mut()
    }

    /// Persists the draft and commits it. On a storage failure the draft is
    /// kept and the error returned, so the user can retry from where they
    /// were.
    pub async fn save(&mut self) -> Result<(), Error> {
        let Some(draft) = self.draft.take() else {
            return Ok(());
        };
        if let Err(e) = self.store.set(USER_DATA_KEY, &draft).await {
            self.draft = Some(draft);
            return Err(e);
        }
        self.user = draft;
        Ok(())
    }

    /// Discards the draft unconditionally. Nothing is persisted and the
    /// committed profile is unchanged.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
