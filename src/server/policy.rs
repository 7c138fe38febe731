//! Role-based authorization decisions.
//!
//! `authorize` is a pure function of the acting user, the action and a description of
//! the target; controllers build the target from loaded records and call `ensure`
//! before any mutation.

use uuid::Uuid;

use crate::server::{
    error::AppError,
    model::{
        booking::BookingStatus,
        user::{Actor, Role},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    /// Booking status changes.
    ChangeStatus,
    /// Review approval changes.
    Moderate,
}

/// What an action is applied to, carrying only the fields policies look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyTarget {
    /// Listing kind, for create.
    Listings,
    Listing {
        host_id: Uuid,
        is_active: bool,
    },
    /// Booking kind, for create.
    Bookings,
    Booking {
        guest_id: Uuid,
        host_id: Uuid,
        status: BookingStatus,
    },
    /// Review kind, for create.
    Reviews,
    Review {
        author_id: Uuid,
        is_approved: bool,
    },
    Amenity,
    /// Media owned by a listing with the given host, or by a user (`None`).
    Media {
        listing_host_id: Option<Uuid>,
    },
}

/// Decides whether `actor` may perform `action` on `target`.
///
/// `actor` is `None` for anonymous requests, which may only view public records.
pub fn authorize(actor: Option<&Actor>, action: Action, target: &PolicyTarget) -> bool {
    let is = |role: Role| actor.is_some_and(|a| a.has_role(role));
    let is_user = |id: Uuid| actor.is_some_and(|a| a.user_id == id);

    match (target, action) {
        (PolicyTarget::Listings, Action::Create) => is(Role::Host) || is(Role::Admin),
        (PolicyTarget::Listing { is_active, host_id }, Action::View) => {
            *is_active || is_user(*host_id) || is(Role::Admin)
        }
        (PolicyTarget::Listing { host_id, .. }, Action::Update | Action::Delete) => {
            is_user(*host_id) || is(Role::Admin)
        }

        (PolicyTarget::Bookings, Action::Create) => is(Role::Guest) || is(Role::Admin),
        (PolicyTarget::Booking { guest_id, host_id, .. }, Action::View) => {
            is_user(*guest_id) || is_user(*host_id) || is(Role::Admin)
        }
        (PolicyTarget::Booking { .. }, Action::Update) => is(Role::Admin),
        (PolicyTarget::Booking { host_id, .. }, Action::ChangeStatus) => {
            is_user(*host_id) || is(Role::Admin) || is(Role::Support)
        }
        (
            PolicyTarget::Booking {
                guest_id, status, ..
            },
            Action::Delete,
        ) => (is_user(*guest_id) && *status == BookingStatus::Pending) || is(Role::Admin),

        (PolicyTarget::Reviews, Action::Create) => is(Role::Guest) || is(Role::Admin),
        (
            PolicyTarget::Review {
                author_id,
                is_approved,
            },
            Action::View,
        ) => *is_approved || is_user(*author_id) || is(Role::Admin),
        (PolicyTarget::Review { author_id, .. }, Action::Update) => is_user(*author_id),
        (PolicyTarget::Review { author_id, .. }, Action::Delete) => {
            is_user(*author_id) || is(Role::Admin) || is(Role::Support)
        }
        (PolicyTarget::Review { .. }, Action::Moderate) => is(Role::Admin) || is(Role::Support),

        (PolicyTarget::Amenity, Action::View) => true,
        (PolicyTarget::Amenity, Action::Create | Action::Update | Action::Delete) => {
            is(Role::Admin)
        }

        (PolicyTarget::Media { .. }, Action::View) => true,
        (PolicyTarget::Media { listing_host_id }, Action::Create | Action::Delete) => {
            is(Role::Admin) || listing_host_id.is_some_and(is_user)
        }

        _ => false,
    }
}

/// Like `authorize`, but returns `AppError::Forbidden` on denial.
pub fn ensure(
    actor: Option<&Actor>,
    action: Action,
    target: &PolicyTarget,
) -> Result<(), AppError> {
    if authorize(actor, action, target) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{:?} denied {:?} on {:?}",
            actor.map(|a| a.user_id),
            action,
            target
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(roles: &[Role]) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn inactive_listing_visible_to_owner_and_admin_only() {
        let host = actor(&[Role::Host]);
        let target = PolicyTarget::Listing {
            host_id: host.user_id,
            is_active: false,
        };

        assert!(authorize(Some(&host), Action::View, &target));
        assert!(authorize(Some(&actor(&[Role::Admin])), Action::View, &target));
        assert!(!authorize(Some(&actor(&[Role::Guest])), Action::View, &target));
        assert!(!authorize(None, Action::View, &target));
    }

    #[test]
    fn only_hosts_and_admins_create_listings() {
        assert!(authorize(Some(&actor(&[Role::Host])), Action::Create, &PolicyTarget::Listings));
        assert!(!authorize(Some(&actor(&[Role::Guest])), Action::Create, &PolicyTarget::Listings));
        assert!(!authorize(None, Action::Create, &PolicyTarget::Listings));
    }

    #[test]
    fn guest_deletes_own_booking_only_while_pending() {
        let guest = actor(&[Role::Guest]);
        let pending = PolicyTarget::Booking {
            guest_id: guest.user_id,
            host_id: Uuid::new_v4(),
            status: BookingStatus::Pending,
        };
        let confirmed = PolicyTarget::Booking {
            guest_id: guest.user_id,
            host_id: Uuid::new_v4(),
            status: BookingStatus::Confirmed,
        };

        assert!(authorize(Some(&guest), Action::Delete, &pending));
        assert!(!authorize(Some(&guest), Action::Delete, &confirmed));
        assert!(authorize(Some(&actor(&[Role::Admin])), Action::Delete, &confirmed));
    }

    #[test]
    fn status_changes_by_host_admin_or_support() {
        let host = actor(&[Role::Host]);
        let guest = actor(&[Role::Guest]);
        let target = PolicyTarget::Booking {
            guest_id: guest.user_id,
            host_id: host.user_id,
            status: BookingStatus::Pending,
        };

        assert!(authorize(Some(&host), Action::ChangeStatus, &target));
        assert!(authorize(Some(&actor(&[Role::Support])), Action::ChangeStatus, &target));
        assert!(!authorize(Some(&guest), Action::ChangeStatus, &target));
        assert!(!authorize(Some(&actor(&[Role::Host])), Action::ChangeStatus, &target));
    }

    #[test]
    fn reviews_moderated_by_admin_or_support() {
        let author = actor(&[Role::Guest]);
        let target = PolicyTarget::Review {
            author_id: author.user_id,
            is_approved: false,
        };

        assert!(!authorize(Some(&author), Action::Moderate, &target));
        assert!(authorize(Some(&actor(&[Role::Support])), Action::Moderate, &target));
        assert!(authorize(Some(&author), Action::View, &target));
        assert!(!authorize(None, Action::View, &target));
    }

    #[test]
    fn user_media_managed_by_admin_only() {
        let user = actor(&[Role::Host]);
        let target = PolicyTarget::Media {
            listing_host_id: None,
        };

        assert!(!authorize(Some(&user), Action::Create, &target));
        assert!(authorize(Some(&actor(&[Role::Admin])), Action::Delete, &target));
    }

    #[test]
    fn ensure_maps_denial_to_forbidden() {
        let result = ensure(None, Action::Create, &PolicyTarget::Amenity);

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
