use crate::jwt::Claims;

/// Ownership filter derived from validated claims.
///
/// Every read or write of a per-user resource goes through a scope. A
/// resource outside the scope must be reported as absent, never as
/// forbidden, so its existence does not leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipScope {
    /// Only resources owned by this user id
    Owner(i64),
    /// Privileged role: ownership filtering is waived
    Unrestricted,
}

impl OwnershipScope {
    pub fn for_claims(claims: &Claims) -> Self {
        if claims.role.is_admin() {
            Self::Unrestricted
        } else {
            Self::Owner(claims.user_id)
        }
    }

    /// Whether a resource owned by `owner_id` is visible in this scope.
    pub fn permits(&self, owner_id: i64) -> bool {
        match self {
            Self::Owner(user_id) => *user_id == owner_id,
            Self::Unrestricted => true,
        }
    }

    /// Owner id to bind into queries; `None` means no filter.
    pub fn owner_filter(&self) -> Option<i64> {
        match self {
            Self::Owner(user_id) => Some(*user_id),
            Self::Unrestricted => None,
        }
    }
}
