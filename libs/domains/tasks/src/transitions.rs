//! Status transition policy.
//!
//! The lifecycle is strictly forward: `NEW -> IN_PROGRESS -> COMPLETED`,
//! no skips and no reopening. A request for the current status is treated
//! as a no-op by the service and never reaches this check.

use crate::models::TaskStatus;

const ALLOWED_TRANSITIONS: &[(TaskStatus, TaskStatus)] = &[
    (TaskStatus::New, TaskStatus::InProgress),
    (TaskStatus::InProgress, TaskStatus::Completed),
];

/// True when moving a task from `from` to `to` is allowed by the policy.
///
/// Self-transitions return `false`; short-circuiting them is the caller's
/// responsibility.
pub fn is_transition_allowed(from: TaskStatus, to: TaskStatus) -> bool {
    ALLOWED_TRANSITIONS.contains(&(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus::{Completed, InProgress, New};

    #[test]
    fn test_full_transition_matrix() {
        let cases = [
            (New, New, false),
            (New, InProgress, true),
            (New, Completed, false),
            (InProgress, New, false),
            (InProgress, InProgress, false),
            (InProgress, Completed, true),
            (Completed, New, false),
            (Completed, InProgress, false),
            (Completed, Completed, false),
        ];

        for (from, to, expected) in cases {
            assert_eq!(
                is_transition_allowed(from, to),
                expected,
                "transition {} -> {}",
                from,
                to
            );
        }
    }
}
