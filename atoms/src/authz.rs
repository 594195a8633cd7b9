//! Authorization gate. Pure predicates over (user, resource owner, action),
//! consulted before every mutation against the store. The client-side check
//! mirrors what the table policies enforce; it is an affordance, not the
//! security boundary.

use crate::error::AuthError;
use crate::users::model::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

/// Admins see everything; everyone else only their own records.
pub fn can_view(user: &User, owner_user_id: &str) -> bool {
    user.user_type == Role::Admin || user.user_id == owner_user_id
}

/// Create is allowed for records the caller owns; creating on behalf of
/// another owner (capacitaciones, problemas) is admin-only. Update and
/// delete are admin-only for every entity.
pub fn can_mutate(user: &User, owner_user_id: &str, action: Action) -> bool {
    match action {
        Action::Create => user.user_type == Role::Admin || user.user_id == owner_user_id,
        Action::Update | Action::Delete => user.user_type == Role::Admin,
    }
}

/// Gate for whole route groups (administración, NBU, problemas).
pub fn require_role(user: Option<&User>, role: Role) -> Result<(), AuthError> {
    match user {
        None => Err(AuthError::Unauthenticated),
        Some(u) if u.user_type == role => Ok(()),
        Some(_) => Err(AuthError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            user_id: id.to_string(),
            user_name: format!("user-{id}"),
            user_type: role,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn admin_views_any_record() {
        let admin = user("a1", Role::Admin);
        assert!(can_view(&admin, "someone-else"));
        assert!(can_view(&admin, "a1"));
    }

    #[test]
    fn staff_views_only_own_records() {
        let staff = user("b1", Role::Bioquimica);
        assert!(can_view(&staff, "b1"));
        assert!(!can_view(&staff, "b2"));
    }

    #[test]
    fn staff_creates_own_records_only() {
        let staff = user("b1", Role::Bioquimica);
        assert!(can_mutate(&staff, "b1", Action::Create));
        assert!(!can_mutate(&staff, "b2", Action::Create));
    }

    #[test]
    fn update_and_delete_are_admin_only() {
        let staff = user("b1", Role::Bioquimica);
        let admin = user("a1", Role::Admin);
        // Staff user A on a record owned by staff user B, and on their own.
        assert!(!can_mutate(&staff, "b2", Action::Delete));
        assert!(!can_mutate(&staff, "b1", Action::Update));
        assert!(can_mutate(&admin, "b2", Action::Delete));
        assert!(can_mutate(&admin, "b2", Action::Update));
    }

    #[test]
    fn require_role_distinguishes_missing_and_mismatched() {
        let staff = user("b1", Role::Bioquimica);
        let admin = user("a1", Role::Admin);
        assert_eq!(require_role(None, Role::Admin), Err(AuthError::Unauthenticated));
        assert_eq!(require_role(Some(&staff), Role::Admin), Err(AuthError::Forbidden));
        assert_eq!(require_role(Some(&admin), Role::Admin), Ok(()));
    }
}
