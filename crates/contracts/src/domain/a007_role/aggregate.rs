use serde::{Deserialize, Serialize};

use crate::domain::common::{require_text, EntityRecord, RecordMeta};
use crate::shared::sections::AdminSection;

/// Роль администратора с набором доступных разделов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Идентификаторы разделов (`AdminSection::id`)
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Системные роли создаются `Role.seed` и не удаляются из UI
    #[serde(default)]
    pub is_system: bool,
}

impl Role {
    pub fn new_for_insert(name: String, description: String, sections: &[AdminSection]) -> Self {
        Self {
            meta: RecordMeta::new(),
            name,
            description,
            permissions: sections.iter().map(|s| s.id().to_string()).collect(),
            is_system: false,
        }
    }

    pub fn allows(&self, section: AdminSection) -> bool {
        self.permissions.iter().any(|p| p == section.id())
    }

    pub fn toggle_permission(&mut self, section: AdminSection) {
        if self.allows(section) {
            self.permissions.retain(|p| p != section.id());
        } else {
            self.permissions.push(section.id().to_string());
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::new_for_insert(String::new(), String::new(), &[AdminSection::Dashboard])
    }
}

impl EntityRecord for Role {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        require_text(&self.name, "Role name")?;
        if let Some(unknown) = self
            .permissions
            .iter()
            .find(|p| AdminSection::from_id(p).is_none())
        {
            return Err(format!("Unknown permission: {}", unknown));
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "role"
    }

    fn element_name() -> &'static str {
        "Role"
    }

    fn list_name() -> &'static str {
        "Roles"
    }
}

/// Роли, которые устанавливает `Role.seed`
pub fn default_roles() -> Vec<Role> {
    use AdminSection::*;

    let specs: [(&str, &str, Vec<AdminSection>); 4] = [
        (
            "Super Admin",
            "Full access to every section",
            AdminSection::all().to_vec(),
        ),
        (
            "Operations Manager",
            "Day-to-day fleet and trip operations",
            vec![
                Dashboard, Analytics, Rides, Users, Drivers, DriverTracking, Cities, Zones,
                ServiceTypes, TypeCity, Pricing,
            ],
        ),
        (
            "Support Agent",
            "Rider and driver support",
            vec![Dashboard, Rides, Users, Drivers],
        ),
        (
            "Finance",
            "Payments, payouts and promotions",
            vec![Dashboard, Analytics, Transactions, PromoCodes, Corporate, Hotels],
        ),
    ];

    specs
        .into_iter()
        .map(|(name, description, sections)| {
            let mut role = Role::new_for_insert(name.to_string(), description.to_string(), &sections);
            role.is_system = true;
            role
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roles_are_valid_system_roles() {
        let roles = default_roles();
        assert_eq!(roles.len(), 4);
        assert!(roles.iter().all(|r| r.is_system && r.validate().is_ok()));
        assert!(roles[0].allows(AdminSection::Admins));
        assert!(!roles[2].allows(AdminSection::Pricing));
    }

    #[test]
    fn test_toggle_permission() {
        let mut role = Role::new_for_insert("Ops".into(), String::new(), &[]);
        role.toggle_permission(AdminSection::Rides);
        assert!(role.allows(AdminSection::Rides));
        role.toggle_permission(AdminSection::Rides);
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn test_unknown_permission_rejected() {
        let mut role = Role::new_for_insert("Ops".into(), String::new(), &[]);
        role.permissions.push("launch_rockets".into());
        assert!(role.validate().is_err());
    }
}
