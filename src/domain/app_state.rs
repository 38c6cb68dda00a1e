use serde::{Deserialize, Serialize};

use super::lifecycle::Actor;

/// App-wide session state. Load sets are deliberately NOT stored here:
/// each dashboard owns the set it fetched or subscribed to, so one view
/// never mutates another view's in-memory copy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Who is signed in, as picked on the login screen. `None` gates the
    /// whole UI behind the login page.
    pub session: Option<Actor>,
    /// Display name chosen at login; cosmetic only.
    pub display_name: String,
}

impl AppState {
    pub fn sign_in(&mut self, actor: Actor, display_name: String) {
        self.session = Some(actor);
        self.display_name = display_name;
    }

    pub fn sign_out(&mut self) {
        self.session = None;
        self.display_name.clear();
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.session = persisted.session;
        self.display_name = persisted.display_name;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            session: self.session.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// The slice of state worth remembering between launches.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub session: Option<Actor>,
    #[serde(default)]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;

    #[test]
    fn sign_in_and_out_round_trip_through_persistence() {
        let mut state = AppState::default();
        state.sign_in(Actor::new("drv-7", Role::Driver), "Ramesh".to_string());

        let persisted = state.to_persisted();
        let mut restored = AppState::default();
        restored.apply_persisted(persisted);
        assert_eq!(restored.session, state.session);
        assert_eq!(restored.display_name, "Ramesh");

        restored.sign_out();
        assert_eq!(restored.session, None);
        assert!(restored.display_name.is_empty());
    }
}
