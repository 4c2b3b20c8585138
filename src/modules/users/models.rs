use serde::{Deserialize, Serialize};

use crate::store::{FieldValue, Record};

/// Role given to users created without one.
pub const DEFAULT_ROLE: &str = "student";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl Record for User {
    const KIND: &'static str = "User";
    const FIELDS: &'static [&'static str] = &["id", "username", "email", "role"];

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as i64)),
            "username" => Some(FieldValue::Text(&self.username)),
            "email" => Some(FieldValue::Text(&self.email)),
            "role" => Some(FieldValue::Text(&self.role)),
            _ => None,
        }
    }
}

/// Request body for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}
