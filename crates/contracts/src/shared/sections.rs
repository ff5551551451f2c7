use serde::{Deserialize, Serialize};

/// Раздел админ-панели; id используется в правах ролей и в навигации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminSection {
    Dashboard,
    Analytics,
    Rides,
    Users,
    Drivers,
    DriverTracking,
    Transactions,
    Countries,
    Cities,
    Zones,
    ServiceTypes,
    TypeCity,
    Pricing,
    PromoCodes,
    Corporate,
    Hotels,
    Dispatchers,
    Roles,
    Admins,
    Appearance,
    Integrations,
}

/// Группа разделов в боковом меню
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionGroup {
    Overview,
    Operations,
    Geography,
    Pricing,
    Partners,
    Access,
    Settings,
}

impl SectionGroup {
    pub fn all() -> [SectionGroup; 7] {
        [
            SectionGroup::Overview,
            SectionGroup::Operations,
            SectionGroup::Geography,
            SectionGroup::Pricing,
            SectionGroup::Partners,
            SectionGroup::Access,
            SectionGroup::Settings,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            SectionGroup::Overview => "overview",
            SectionGroup::Operations => "operations",
            SectionGroup::Geography => "geography",
            SectionGroup::Pricing => "pricing",
            SectionGroup::Partners => "partners",
            SectionGroup::Access => "access",
            SectionGroup::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionGroup::Overview => "Overview",
            SectionGroup::Operations => "Operations",
            SectionGroup::Geography => "Geography",
            SectionGroup::Pricing => "Pricing",
            SectionGroup::Partners => "Partners",
            SectionGroup::Access => "Access",
            SectionGroup::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SectionGroup::Overview => "bar-chart",
            SectionGroup::Operations => "car",
            SectionGroup::Geography => "globe",
            SectionGroup::Pricing => "dollar-sign",
            SectionGroup::Partners => "briefcase",
            SectionGroup::Access => "shield",
            SectionGroup::Settings => "settings",
        }
    }

    pub fn sections(&self) -> Vec<AdminSection> {
        AdminSection::all()
            .into_iter()
            .filter(|s| s.group() == *self)
            .collect()
    }
}

impl AdminSection {
    pub fn all() -> [AdminSection; 21] {
        use AdminSection::*;
        [
            Dashboard,
            Analytics,
            Rides,
            Users,
            Drivers,
            DriverTracking,
            Transactions,
            Countries,
            Cities,
            Zones,
            ServiceTypes,
            TypeCity,
            Pricing,
            PromoCodes,
            Corporate,
            Hotels,
            Dispatchers,
            Roles,
            Admins,
            Appearance,
            Integrations,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "dashboard",
            AdminSection::Analytics => "analytics",
            AdminSection::Rides => "rides",
            AdminSection::Users => "users",
            AdminSection::Drivers => "drivers",
            AdminSection::DriverTracking => "driver_tracking",
            AdminSection::Transactions => "transactions",
            AdminSection::Countries => "countries",
            AdminSection::Cities => "cities",
            AdminSection::Zones => "zones",
            AdminSection::ServiceTypes => "service_types",
            AdminSection::TypeCity => "type_city",
            AdminSection::Pricing => "pricing",
            AdminSection::PromoCodes => "promo_codes",
            AdminSection::Corporate => "corporate",
            AdminSection::Hotels => "hotels",
            AdminSection::Dispatchers => "dispatchers",
            AdminSection::Roles => "roles",
            AdminSection::Admins => "admins",
            AdminSection::Appearance => "appearance",
            AdminSection::Integrations => "integrations",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Analytics => "Analytics",
            AdminSection::Rides => "Trips",
            AdminSection::Users => "Users",
            AdminSection::Drivers => "Drivers",
            AdminSection::DriverTracking => "Driver Tracking",
            AdminSection::Transactions => "Transactions",
            AdminSection::Countries => "Countries",
            AdminSection::Cities => "Cities",
            AdminSection::Zones => "Zones",
            AdminSection::ServiceTypes => "Service Types",
            AdminSection::TypeCity => "Type & City",
            AdminSection::Pricing => "Price Configuration",
            AdminSection::PromoCodes => "Promo Codes",
            AdminSection::Corporate => "Corporate",
            AdminSection::Hotels => "Hotels",
            AdminSection::Dispatchers => "Dispatchers",
            AdminSection::Roles => "Roles & Permissions",
            AdminSection::Admins => "Admins",
            AdminSection::Appearance => "Appearance",
            AdminSection::Integrations => "Integrations",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "home",
            AdminSection::Analytics => "trending-up",
            AdminSection::Rides => "navigation",
            AdminSection::Users => "users",
            AdminSection::Drivers => "truck",
            AdminSection::DriverTracking => "map-pin",
            AdminSection::Transactions => "credit-card",
            AdminSection::Countries => "flag",
            AdminSection::Cities => "map",
            AdminSection::Zones => "layers",
            AdminSection::ServiceTypes => "grid",
            AdminSection::TypeCity => "link",
            AdminSection::Pricing => "dollar-sign",
            AdminSection::PromoCodes => "tag",
            AdminSection::Corporate => "briefcase",
            AdminSection::Hotels => "building",
            AdminSection::Dispatchers => "phone",
            AdminSection::Roles => "shield",
            AdminSection::Admins => "user-check",
            AdminSection::Appearance => "palette",
            AdminSection::Integrations => "plug",
        }
    }

    pub fn group(&self) -> SectionGroup {
        use AdminSection::*;
        match self {
            Dashboard | Analytics => SectionGroup::Overview,
            Rides | Users | Drivers | DriverTracking | Transactions => SectionGroup::Operations,
            Countries | Cities | Zones => SectionGroup::Geography,
            ServiceTypes | TypeCity | Pricing | PromoCodes => SectionGroup::Pricing,
            Corporate | Hotels | Dispatchers => SectionGroup::Partners,
            Roles | Admins => SectionGroup::Access,
            Appearance | Integrations => SectionGroup::Settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_and_unique() {
        let mut ids: Vec<&str> = AdminSection::all().iter().map(|s| s.id()).collect();
        for s in AdminSection::all() {
            assert_eq!(AdminSection::from_id(s.id()), Some(s));
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), AdminSection::all().len());
    }

    #[test]
    fn test_every_section_has_a_group() {
        let grouped: usize = SectionGroup::all().iter().map(|g| g.sections().len()).sum();
        assert_eq!(grouped, AdminSection::all().len());
    }

    #[test]
    fn test_serde_matches_id() {
        let json = serde_json::to_string(&AdminSection::DriverTracking).unwrap();
        assert_eq!(json, format!("\"{}\"", AdminSection::DriverTracking.id()));
    }
}
