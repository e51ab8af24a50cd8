// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Community member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Request to create a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: String,

    #[validate(url)]
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn new(id: Uuid, req: NewUser) -> Self {
        User {
            id,
            username: req.username,
            display_name: req.display_name,
            avatar_url: req.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_validation() {
        let ok = NewUser {
            username: "nomad".to_string(),
            display_name: "Nomad".to_string(),
            avatar_url: Some("https://cdn.example.com/a.png".to_string()),
        };
        assert!(ok.validate().is_ok());

        let bad = NewUser {
            username: String::new(),
            display_name: "Nomad".to_string(),
            avatar_url: Some("not a url".to_string()),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("avatar_url"));
    }
}
