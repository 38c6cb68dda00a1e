//! Load lifecycle state machine.
//!
//! - Validates who may move a load into which state, before anything is
//!   sent over the wire.
//! - Produces the partial update for the gateway, including the expected
//!   prior status used as a compare-and-swap guard against concurrent
//!   acceptors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Load, LoadStatus, Role};

/// The authenticated identity performing an operation. Always passed
/// explicitly; nothing in the engine reads ambient session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Actor-triggered transitions. `picked` has no action on purpose: the
/// timeline shows it, but `Start` drives `accepted` straight to
/// `in_transit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadAction {
    Accept,
    Start,
    Deliver,
    Complete,
}

impl LoadAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadAction::Accept => "accept",
            LoadAction::Start => "start",
            LoadAction::Deliver => "deliver",
            LoadAction::Complete => "complete",
        }
    }

    /// Toast title shown after the gateway confirms the transition.
    pub fn success_title(&self) -> &'static str {
        match self {
            LoadAction::Accept => "Load Accepted! ✅",
            LoadAction::Start => "Trip Started! 🚚",
            LoadAction::Deliver => "Delivered! 🎉",
            LoadAction::Complete => "Trip Completed! 🏁",
        }
    }

    pub fn success_description(&self) -> &'static str {
        match self {
            LoadAction::Accept => "लोड स्वीकार किया गया",
            LoadAction::Start => "यात्रा शुरू हो गई",
            LoadAction::Deliver => "माल पहुँचा दिया गया",
            LoadAction::Complete => "यात्रा पूरी हुई",
        }
    }

    /// Button label on a load card.
    pub fn label(&self) -> &'static str {
        match self {
            LoadAction::Accept => "Accept Load",
            LoadAction::Start => "Start Trip",
            LoadAction::Deliver => "Mark Delivered",
            LoadAction::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for LoadAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {} a load that is {}", action, status.as_str())]
    InvalidTransition {
        status: LoadStatus,
        action: LoadAction,
    },
    #[error("load {load_id} is assigned to another driver")]
    NotAssigned { load_id: String },
    #[error("a {} account cannot {} loads", role.as_str(), action)]
    WrongRole { role: Role, action: LoadAction },
}

/// The partial update a validated transition sends to the remote store.
/// `expected_status` is the conditional-update guard: the write only lands
/// if the stored status still matches, which is what settles a race
/// between two drivers accepting the same load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionUpdate {
    pub expected_status: LoadStatus,
    pub status: LoadStatus,
    pub driver_id: Option<String>,
}

/// Validate `action` against the precondition table and build the update.
/// The load itself is never mutated here; confirmed state arrives via
/// re-fetch or the next subscription snapshot.
pub fn plan_transition(
    load: &Load,
    action: LoadAction,
    actor: &Actor,
) -> Result<TransitionUpdate, TransitionError> {
    match action {
        LoadAction::Accept => {
            require_role(actor, Role::Driver, action)?;
            if load.status != LoadStatus::Posted || load.driver_id.is_some() {
                return Err(TransitionError::InvalidTransition {
                    status: load.status,
                    action,
                });
            }
            Ok(TransitionUpdate {
                expected_status: LoadStatus::Posted,
                status: LoadStatus::Accepted,
                driver_id: Some(actor.id.clone()),
            })
        }
        LoadAction::Start => {
            require_role(actor, Role::Driver, action)?;
            require_assigned(load, actor)?;
            if load.status != LoadStatus::Accepted {
                return Err(TransitionError::InvalidTransition {
                    status: load.status,
                    action,
                });
            }
            Ok(TransitionUpdate {
                expected_status: LoadStatus::Accepted,
                status: LoadStatus::InTransit,
                driver_id: None,
            })
        }
        LoadAction::Deliver => {
            require_role(actor, Role::Driver, action)?;
            require_assigned(load, actor)?;
            if load.status != LoadStatus::InTransit {
                return Err(TransitionError::InvalidTransition {
                    status: load.status,
                    action,
                });
            }
            Ok(TransitionUpdate {
                expected_status: LoadStatus::InTransit,
                status: LoadStatus::Delivered,
                driver_id: None,
            })
        }
        LoadAction::Complete => {
            let owns = actor.role == Role::Company && actor.id == load.company_id;
            if !owns && actor.role != Role::Admin {
                return Err(TransitionError::WrongRole {
                    role: actor.role,
                    action,
                });
            }
            if load.status != LoadStatus::Delivered {
                return Err(TransitionError::InvalidTransition {
                    status: load.status,
                    action,
                });
            }
            Ok(TransitionUpdate {
                expected_status: LoadStatus::Delivered,
                status: LoadStatus::Completed,
                driver_id: None,
            })
        }
    }
}

/// The single action `actor` could take on `load` right now, if any.
/// Drives which button a load card renders.
pub fn available_action(load: &Load, actor: &Actor) -> Option<LoadAction> {
    let mine = load.driver_id.as_deref() == Some(actor.id.as_str());
    match (actor.role, load.status) {
        (Role::Driver, LoadStatus::Posted) => Some(LoadAction::Accept),
        (Role::Driver, LoadStatus::Accepted) if mine => Some(LoadAction::Start),
        (Role::Driver, LoadStatus::InTransit) if mine => Some(LoadAction::Deliver),
        (Role::Company, LoadStatus::Delivered) if actor.id == load.company_id => {
            Some(LoadAction::Complete)
        }
        (Role::Admin, LoadStatus::Delivered) => Some(LoadAction::Complete),
        _ => None,
    }
}

fn require_role(actor: &Actor, role: Role, action: LoadAction) -> Result<(), TransitionError> {
    if actor.role == role {
        Ok(())
    } else {
        Err(TransitionError::WrongRole {
            role: actor.role,
            action,
        })
    }
}

fn require_assigned(load: &Load, actor: &Actor) -> Result<(), TransitionError> {
    if load.driver_id.as_deref() == Some(actor.id.as_str()) {
        Ok(())
    } else {
        Err(TransitionError::NotAssigned {
            load_id: load.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TruckType;
    use time::OffsetDateTime;

    fn load(status: LoadStatus, driver_id: Option<&str>) -> Load {
        Load {
            id: "load-1".to_string(),
            company_id: "co-1".to_string(),
            driver_id: driver_id.map(str::to_string),
            pickup_city: "Mumbai".to_string(),
            pickup_state: "Maharashtra".to_string(),
            drop_city: "Pune".to_string(),
            drop_state: "Maharashtra".to_string(),
            material: "Steel coils".to_string(),
            weight: 18.0,
            truck_type: TruckType::Trailer,
            price: 85000,
            pickup_date: None,
            status,
            created_at: OffsetDateTime::UNIX_EPOCH,
            company_name: None,
            distance_km: None,
        }
    }

    fn driver(id: &str) -> Actor {
        Actor::new(id, Role::Driver)
    }

    #[test]
    fn accept_assigns_the_acting_driver() {
        let update = plan_transition(
            &load(LoadStatus::Posted, None),
            LoadAction::Accept,
            &driver("drv-a"),
        )
        .unwrap();
        assert_eq!(update.status, LoadStatus::Accepted);
        assert_eq!(update.driver_id.as_deref(), Some("drv-a"));
        assert_eq!(update.expected_status, LoadStatus::Posted);
    }

    #[test]
    fn second_accept_fails_once_the_load_is_taken() {
        let taken = load(LoadStatus::Accepted, Some("drv-a"));
        let err = plan_transition(&taken, LoadAction::Accept, &driver("drv-b")).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                status: LoadStatus::Accepted,
                action: LoadAction::Accept,
            }
        );
        // The rejected request must leave the load untouched.
        assert_eq!(taken.driver_id.as_deref(), Some("drv-a"));
        assert_eq!(taken.status, LoadStatus::Accepted);
    }

    #[test]
    fn start_requires_accepted_status() {
        for status in [
            LoadStatus::Posted,
            LoadStatus::InTransit,
            LoadStatus::Delivered,
            LoadStatus::Completed,
        ] {
            let subject = load(status, Some("drv-a"));
            let err = plan_transition(&subject, LoadAction::Start, &driver("drv-a")).unwrap_err();
            assert!(
                matches!(err, TransitionError::InvalidTransition { .. }),
                "start from {status:?} should be invalid"
            );
        }
    }

    #[test]
    fn start_and_deliver_reject_a_stranger() {
        let accepted = load(LoadStatus::Accepted, Some("drv-a"));
        let err = plan_transition(&accepted, LoadAction::Start, &driver("drv-b")).unwrap_err();
        assert_eq!(
            err,
            TransitionError::NotAssigned {
                load_id: "load-1".to_string()
            }
        );

        let moving = load(LoadStatus::InTransit, Some("drv-a"));
        let err = plan_transition(&moving, LoadAction::Deliver, &driver("drv-b")).unwrap_err();
        assert!(matches!(err, TransitionError::NotAssigned { .. }));
    }

    #[test]
    fn full_forward_walk_for_the_assigned_driver() {
        let me = driver("drv-a");

        let update = plan_transition(&load(LoadStatus::Posted, None), LoadAction::Accept, &me)
            .unwrap();
        assert_eq!(update.status, LoadStatus::Accepted);

        let update = plan_transition(
            &load(LoadStatus::Accepted, Some("drv-a")),
            LoadAction::Start,
            &me,
        )
        .unwrap();
        assert_eq!(update.status, LoadStatus::InTransit);
        assert_eq!(update.driver_id, None);

        let update = plan_transition(
            &load(LoadStatus::InTransit, Some("drv-a")),
            LoadAction::Deliver,
            &me,
        )
        .unwrap();
        assert_eq!(update.status, LoadStatus::Delivered);
    }

    #[test]
    fn complete_is_for_the_owning_company_or_admin() {
        let delivered = load(LoadStatus::Delivered, Some("drv-a"));

        let owner = Actor::new("co-1", Role::Company);
        let update = plan_transition(&delivered, LoadAction::Complete, &owner).unwrap();
        assert_eq!(update.status, LoadStatus::Completed);

        let admin = Actor::new("adm-1", Role::Admin);
        assert!(plan_transition(&delivered, LoadAction::Complete, &admin).is_ok());

        let other_company = Actor::new("co-2", Role::Company);
        let err = plan_transition(&delivered, LoadAction::Complete, &other_company).unwrap_err();
        assert!(matches!(err, TransitionError::WrongRole { .. }));

        let err = plan_transition(&delivered, LoadAction::Complete, &driver("drv-a")).unwrap_err();
        assert!(matches!(err, TransitionError::WrongRole { .. }));
    }

    #[test]
    fn companies_cannot_drive_driver_actions() {
        let posted = load(LoadStatus::Posted, None);
        let company = Actor::new("co-1", Role::Company);
        let err = plan_transition(&posted, LoadAction::Accept, &company).unwrap_err();
        assert!(matches!(err, TransitionError::WrongRole { .. }));
    }

    #[test]
    fn no_action_moves_a_completed_load() {
        let done = load(LoadStatus::Completed, Some("drv-a"));
        for action in [LoadAction::Start, LoadAction::Deliver] {
            assert!(plan_transition(&done, action, &driver("drv-a")).is_err());
        }
        let owner = Actor::new("co-1", Role::Company);
        assert!(plan_transition(&done, LoadAction::Complete, &owner).is_err());
    }

    #[test]
    fn available_action_tracks_role_status_and_assignment() {
        let me = driver("drv-a");
        assert_eq!(
            available_action(&load(LoadStatus::Posted, None), &me),
            Some(LoadAction::Accept)
        );
        assert_eq!(
            available_action(&load(LoadStatus::Accepted, Some("drv-a")), &me),
            Some(LoadAction::Start)
        );
        assert_eq!(
            available_action(&load(LoadStatus::Accepted, Some("drv-b")), &me),
            None
        );
        assert_eq!(
            available_action(&load(LoadStatus::InTransit, Some("drv-a")), &me),
            Some(LoadAction::Deliver)
        );

        let owner = Actor::new("co-1", Role::Company);
        assert_eq!(
            available_action(&load(LoadStatus::Delivered, Some("drv-a")), &owner),
            Some(LoadAction::Complete)
        );
        assert_eq!(
            available_action(&load(LoadStatus::Posted, None), &owner),
            None
        );
    }
}
