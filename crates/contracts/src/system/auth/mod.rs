use serde::{Deserialize, Serialize};

use crate::shared::sections::AdminSection;

pub mod session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub admin: AdminInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Текущий администратор (`auth.me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_super_admin: bool,
    /// Идентификаторы доступных разделов
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AdminInfo {
    pub fn can_access(&self, section: AdminSection) -> bool {
        self.is_super_admin || self.permissions.iter().any(|p| p == section.id())
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // admin_id
    pub username: String,
    pub is_super_admin: bool,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_access() {
        let mut admin = AdminInfo {
            id: "1".into(),
            username: "ops".into(),
            full_name: None,
            email: None,
            is_super_admin: false,
            permissions: vec!["rides".into()],
        };
        assert!(admin.can_access(AdminSection::Rides));
        assert!(!admin.can_access(AdminSection::Pricing));
        admin.is_super_admin = true;
        assert!(admin.can_access(AdminSection::Pricing));
        assert_eq!(admin.display_name(), "ops");
    }
}
