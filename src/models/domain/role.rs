use serde::{Deserialize, Serialize};

/// An authorization role ("profil"). Role names are unique and a role must
/// exist before a user can reference it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub archived: bool,
}

impl Role {
    pub fn new(id: i64, name: &str) -> Self {
        Role {
            id,
            name: name.to_string(),
            archived: false,
        }
    }
}

pub const ROLE_STUDENT: &str = "Etudiant";
pub const ROLE_TEACHER: &str = "Enseignant";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_creation() {
        let role = Role::new(1, ROLE_STUDENT);
        assert_eq!(role.name, "Etudiant");
        assert!(!role.archived);
    }
}
