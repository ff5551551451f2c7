use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::shared::config;
use crate::system::auth::middleware::{require_auth, require_super_admin};
use crate::{handlers, system};

const UPLOAD_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Публичные маршруты входа
fn auth_routes() -> Router {
    Router::new()
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
}

/// Маршруты для любого вошедшего администратора
fn admin_routes() -> Router {
    Router::new()
        .route("/api/system/auth/me", get(system::handlers::auth::current_admin))
        // ========================================
        // ENTITIES
        // ========================================
        .route(
            "/api/entities/:entity",
            get(handlers::entities::list).post(handlers::entities::create),
        )
        .route(
            "/api/entities/:entity/:id",
            get(handlers::entities::get)
                .put(handlers::entities::update)
                .delete(handlers::entities::delete)
                .post(handlers::entities::action),
        )
        .route(
            "/api/countries",
            get(handlers::countries::list).post(handlers::countries::create),
        )
        .route("/api/countries/:id", put(handlers::countries::update))
        // ========================================
        // FUNCTIONS
        // ========================================
        .route(
            "/api/functions/r2Upload",
            post(handlers::functions::r2_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/functions/:name", post(handlers::functions::invoke))
        .route(
            "/api/system/admins/:id/upgrade",
            post(system::handlers::admins::upgrade_to_super_admin),
        )
        .route(
            "/api/system/settings",
            get(system::handlers::settings::get).put(system::handlers::settings::update),
        )
        .route(
            "/api/system/settings/status",
            get(system::handlers::settings::status),
        )
        .route_layer(middleware::from_fn(require_auth))
}

/// Управление администраторами
fn super_admin_routes() -> Router {
    Router::new()
        .route(
            "/api/system/admins",
            get(system::handlers::admins::list).post(system::handlers::admins::create),
        )
        .route("/api/system/admins/sync", post(system::handlers::admins::sync))
        .route(
            "/api/system/admins/:id",
            get(system::handlers::admins::get)
                .put(system::handlers::admins::update)
                .delete(system::handlers::admins::delete),
        )
        .route_layer(middleware::from_fn(require_super_admin))
}

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let cfg = config::current();
    let uploads = ServeDir::new(config::get_uploads_dir(cfg));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(super_admin_routes())
        .nest_service(&cfg.uploads.public_base, uploads)
        .fallback_service(ServeDir::new("dist"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds_with_auth_layers() {
        let _public = auth_routes();
        let _admin = admin_routes();
        let _super_admin = super_admin_routes();
        let _app = configure_routes();
    }
}
