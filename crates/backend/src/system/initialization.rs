use anyhow::Result;

use crate::shared::data::db::get_connection;
use crate::system::admins::service as admin_service;
use crate::system::settings::service as settings_service;

/// Первый запуск: администратор по умолчанию и настройки внешнего вида
pub async fn ensure_bootstrap_data() -> Result<()> {
    let db = get_connection();

    if let Some(admin) = admin_service::ensure_default_admin(db).await? {
        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default super admin created!");
        tracing::warn!("  Username: admin");
        tracing::warn!("  Password: admin");
        tracing::warn!("  Admin ID: {}", admin.id);
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    let settings = settings_service::get(db).await?;
    tracing::info!(
        "Appearance: {} ({}, {} theme)",
        settings.appearance.app_name,
        settings.appearance.primary_color,
        settings.appearance.default_theme
    );

    Ok(())
}
