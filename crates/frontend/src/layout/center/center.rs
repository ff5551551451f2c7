use crate::dashboards::d400_today_summary::ui::DashboardHome;
use crate::dashboards::d401_ride_analytics::ui::RideAnalyticsDashboard;
use crate::domain::a001_country::ui::CountriesManagement;
use crate::domain::a002_city::ui::CitiesManagement;
use crate::domain::a003_service_type::ui::{ServiceTypesManagement, TypeCityAssociation};
use crate::domain::a004_price_configuration::ui::PriceConfigurationScreen;
use crate::domain::a005_zone::ui::ZonesManagement;
use crate::domain::a006_promo_code::ui::PromoCodesManagement;
use crate::domain::a007_role::ui::RolesManagement;
use crate::domain::a008_corporate_profile::ui::CorporateManagement;
use crate::domain::a009_hotel_profile::ui::HotelsManagement;
use crate::domain::a010_dispatcher_profile::ui::DispatchersManagement;
use crate::domain::a011_driver_profile::ui::{DriverTracker, DriversManagement};
use crate::domain::a012_user::ui::UsersManagement;
use crate::domain::a013_ride::ui::TripsMonitor;
use crate::domain::a014_transaction::ui::TransactionsList;
use crate::layout::global_context::use_panel;
use crate::system::admins::ui::AdminsManagement;
use crate::system::auth::guard::RequireSection;
use crate::system::settings::ui::{AppearanceSettingsPage, IntegrationsSettingsPage};
use contracts::shared::sections::AdminSection;
use leptos::prelude::*;

fn section_view(section: AdminSection) -> AnyView {
    match section {
        AdminSection::Dashboard => view! { <DashboardHome /> }.into_any(),
        AdminSection::Analytics => view! { <RideAnalyticsDashboard /> }.into_any(),
        AdminSection::Rides => view! { <TripsMonitor /> }.into_any(),
        AdminSection::Users => view! { <UsersManagement /> }.into_any(),
        AdminSection::Drivers => view! { <DriversManagement /> }.into_any(),
        AdminSection::DriverTracking => view! { <DriverTracker /> }.into_any(),
        AdminSection::Transactions => view! { <TransactionsList /> }.into_any(),
        AdminSection::Countries => view! { <CountriesManagement /> }.into_any(),
        AdminSection::Cities => view! { <CitiesManagement /> }.into_any(),
        AdminSection::Zones => view! { <ZonesManagement /> }.into_any(),
        AdminSection::ServiceTypes => view! { <ServiceTypesManagement /> }.into_any(),
        AdminSection::TypeCity => view! { <TypeCityAssociation /> }.into_any(),
        AdminSection::Pricing => view! { <PriceConfigurationScreen /> }.into_any(),
        AdminSection::PromoCodes => view! { <PromoCodesManagement /> }.into_any(),
        AdminSection::Corporate => view! { <CorporateManagement /> }.into_any(),
        AdminSection::Hotels => view! { <HotelsManagement /> }.into_any(),
        AdminSection::Dispatchers => view! { <DispatchersManagement /> }.into_any(),
        AdminSection::Roles => view! { <RolesManagement /> }.into_any(),
        AdminSection::Admins => view! { <AdminsManagement /> }.into_any(),
        AdminSection::Appearance => view! { <AppearanceSettingsPage /> }.into_any(),
        AdminSection::Integrations => view! { <IntegrationsSettingsPage /> }.into_any(),
    }
}

/// Активный раздел; экран пересоздаётся при смене раздела
#[component]
pub fn SectionContent() -> impl IntoView {
    let ctx = use_panel();

    move || {
        let section = ctx.active.get();
        view! {
            <RequireSection section=section>
                {section_view(section)}
            </RequireSection>
        }
    }
}
