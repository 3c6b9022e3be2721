//! Booking lifecycle transition table
//!
//! Every permitted move and the roles that may drive it, auditable in one
//! place. Date, ownership and payment guards need live context and are
//! enforced by the manager next to the transition they protect.

use shared::actor::Role;
use shared::models::BookingStatus;

use super::error::BookingError;

/// One permitted lifecycle move
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub roles: &'static [Role],
}

/// The complete transition table
///
/// Guests appear only on the cancellation row; their ownership guard is
/// enforced by the manager on top of the role gate.
pub const TRANSITION_TABLE: &[TransitionRule] = &[
    TransitionRule {
        from: BookingStatus::Upcoming,
        to: BookingStatus::CheckedIn,
        roles: &[Role::Receptionist, Role::Admin],
    },
    TransitionRule {
        from: BookingStatus::Upcoming,
        to: BookingStatus::Cancelled,
        roles: &[Role::Receptionist, Role::Admin, Role::Guest],
    },
    TransitionRule {
        from: BookingStatus::CheckedIn,
        to: BookingStatus::CheckedOut,
        roles: &[Role::Receptionist, Role::Admin],
    },
];

/// Look up the rule for a `(from, to)` pair
pub fn find_rule(from: BookingStatus, to: BookingStatus) -> Option<&'static TransitionRule> {
    TRANSITION_TABLE
        .iter()
        .find(|rule| rule.from == from && rule.to == to)
}

/// Authorize a lifecycle move for the given role
///
/// Re-invoking a terminal transition on an already-terminal booking yields
/// the distinct benign [`BookingError::AlreadyInState`] signal; an
/// unpermitted pair is a hard conflict; a known pair with the wrong role is
/// forbidden.
pub fn authorize(
    from: BookingStatus,
    to: BookingStatus,
    role: Role,
) -> Result<&'static TransitionRule, BookingError> {
    if from.is_terminal() && to.is_terminal() {
        return Err(BookingError::AlreadyInState(from));
    }
    let rule = find_rule(from, to).ok_or(BookingError::IllegalTransition { from, to })?;
    if !rule.roles.contains(&role) {
        return Err(BookingError::Forbidden(format!(
            "role {} may not move a booking from {} to {}",
            role, from, to
        )));
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_status_transitions() {
        // The table must agree with BookingStatus::can_transition_to
        for rule in TRANSITION_TABLE {
            assert!(rule.from.can_transition_to(rule.to));
        }
    }

    #[test]
    fn test_staff_can_check_in() {
        assert!(authorize(BookingStatus::Upcoming, BookingStatus::CheckedIn, Role::Receptionist).is_ok());
        assert!(authorize(BookingStatus::Upcoming, BookingStatus::CheckedIn, Role::Admin).is_ok());
    }

    #[test]
    fn test_guest_may_cancel_but_never_check_in_or_out() {
        assert!(authorize(BookingStatus::Upcoming, BookingStatus::Cancelled, Role::Guest).is_ok());
        assert!(matches!(
            authorize(BookingStatus::Upcoming, BookingStatus::CheckedIn, Role::Guest),
            Err(BookingError::Forbidden(_))
        ));
        assert!(matches!(
            authorize(BookingStatus::CheckedIn, BookingStatus::CheckedOut, Role::Guest),
            Err(BookingError::Forbidden(_))
        ));
    }

    #[test]
    fn test_cleaner_never_drives_the_lifecycle() {
        for rule in TRANSITION_TABLE {
            assert!(matches!(
                authorize(rule.from, rule.to, Role::Cleaner),
                Err(BookingError::Forbidden(_))
            ));
        }
    }

    #[test]
    fn test_terminal_reinvocation_is_benign() {
        assert!(matches!(
            authorize(BookingStatus::CheckedOut, BookingStatus::CheckedOut, Role::Admin),
            Err(BookingError::AlreadyInState(BookingStatus::CheckedOut))
        ));
        assert!(matches!(
            authorize(BookingStatus::Cancelled, BookingStatus::Cancelled, Role::Guest),
            Err(BookingError::AlreadyInState(BookingStatus::Cancelled))
        ));
        // Cancelling a checked-out booking is also a terminal re-invocation
        assert!(matches!(
            authorize(BookingStatus::CheckedOut, BookingStatus::Cancelled, Role::Admin),
            Err(BookingError::AlreadyInState(BookingStatus::CheckedOut))
        ));
    }

    #[test]
    fn test_unlisted_moves_conflict() {
        assert!(matches!(
            authorize(BookingStatus::Upcoming, BookingStatus::CheckedOut, Role::Admin),
            Err(BookingError::IllegalTransition { .. })
        ));
        assert!(matches!(
            authorize(BookingStatus::CheckedIn, BookingStatus::Cancelled, Role::Admin),
            Err(BookingError::IllegalTransition { .. })
        ));
        // Double check-in is a conflict, not a benign no-op
        assert!(matches!(
            authorize(BookingStatus::CheckedIn, BookingStatus::CheckedIn, Role::Admin),
            Err(BookingError::IllegalTransition { .. })
        ));
        // A terminal booking never returns to life
        assert!(matches!(
            authorize(BookingStatus::Cancelled, BookingStatus::CheckedIn, Role::Admin),
            Err(BookingError::IllegalTransition { .. })
        ));
    }
}
