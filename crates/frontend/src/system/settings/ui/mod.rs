pub mod appearance;
pub mod integrations;

pub use appearance::AppearanceSettingsPage;
pub use integrations::IntegrationsSettingsPage;
