//! Well-known role name constants.
//!
//! These must match the `role` claim issued by the identity provider.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Whether a role name grants administrator privileges.
pub fn is_admin_role(role: &str) -> bool {
    role == ROLE_ADMIN
}
