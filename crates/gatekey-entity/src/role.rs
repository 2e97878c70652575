//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A role with its numeric trust level.
///
/// Trust levels are totally ordered: a higher level implies broader
/// permission. Lookups by id and by name resolve against the same table,
/// so the two views always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name, e.g. `"user"` or `"admin"`.
    pub name: String,
    /// Numeric trust level (higher = more privileged).
    pub level: i32,
}

impl Role {
    /// Check whether this role satisfies the given required level.
    ///
    /// Equal levels are sufficient: access is denied only when
    /// `level < required`.
    pub fn satisfies(&self, required_level: i32) -> bool {
        self.level >= required_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundary() {
        let role = Role {
            id: Uuid::new_v4(),
            name: "moderator".to_string(),
            level: 50,
        };
        assert!(role.satisfies(10));
        assert!(role.satisfies(50));
        assert!(!role.satisfies(51));
    }
}
