use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{require_email, require_text, EntityRecord, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Driver,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

/// Пользователь приложения (пассажир или водитель)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub city_id: Option<Uuid>,
}

impl User {
    pub fn new_for_insert(full_name: String, email: String) -> Self {
        Self {
            meta: RecordMeta::new(),
            full_name,
            email,
            phone: String::new(),
            role: UserRole::User,
            status: UserStatus::Active,
            city_id: None,
        }
    }

    pub fn is_driver(&self) -> bool {
        self.role == UserRole::Driver
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new_for_insert(String::new(), String::new())
    }
}

impl EntityRecord for User {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.full_name, "Full name")?;
        require_email(&self.email)
    }

    fn entity_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "user"
    }

    fn element_name() -> &'static str {
        "User"
    }

    fn list_name() -> &'static str {
        "Users"
    }
}
