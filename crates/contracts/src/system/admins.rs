use serde::{Deserialize, Serialize};

use crate::domain::a007_role::aggregate::Role;
use crate::shared::sections::AdminSection;

/// Учётная запись оператора админ-панели (не сущность `entities.*`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role_id: Option<String>,
    pub is_super_admin: bool,
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAdminDto {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAdminDto {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role_id: Option<String>,
    pub is_active: bool,
    /// Новый пароль; None оставляет текущий
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncAdminsResponse {
    pub synced: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRolesResponse {
    pub created: usize,
}

/// Права администратора по его роли; супер-админ получает все разделы
pub fn effective_permissions(is_super_admin: bool, role: Option<&Role>) -> Vec<String> {
    if is_super_admin {
        return AdminSection::all()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
    }
    role.map(|r| r.permissions.clone()).unwrap_or_default()
}

/// Повышение до супер-админа: его делает супер-админ, либо любой, пока супер-админов нет
pub fn can_upgrade_to_super_admin(caller_is_super_admin: bool, super_admin_count: usize) -> bool {
    caller_is_super_admin || super_admin_count == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_permissions() {
        let role = Role::new_for_insert("Support".into(), String::new(), &[AdminSection::Rides]);
        assert_eq!(effective_permissions(false, Some(&role)), vec!["rides"]);
        assert!(effective_permissions(false, None).is_empty());
        assert_eq!(
            effective_permissions(true, None).len(),
            AdminSection::all().len()
        );
    }

    #[test]
    fn test_upgrade_rule() {
        assert!(can_upgrade_to_super_admin(true, 3));
        assert!(can_upgrade_to_super_admin(false, 0));
        assert!(!can_upgrade_to_super_admin(false, 1));
    }
}
