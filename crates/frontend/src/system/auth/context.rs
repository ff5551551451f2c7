use chrono::Utc;
use contracts::system::auth::session::{AdminSession, SessionState};
use contracts::system::auth::AdminInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// Состояние входа администратора
///
/// Сессия живёт 12 часов; за 5 минут до конца access token обновляется.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Option<AdminSession>>,
    /// true, пока сессия восстанавливается из localStorage
    pub restoring: RwSignal<bool>,
}

impl AuthContext {
    fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            restoring: RwSignal::new(true),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    pub fn admin(&self) -> Option<AdminInfo> {
        self.session.with(|s| s.as_ref().map(|s| s.admin.clone()))
    }

    fn set_session(&self, session: AdminSession) {
        storage::save_session(&session);
        self.session.set(Some(session));
    }

    fn drop_session(&self) {
        storage::clear_session();
        self.session.set(None);
    }

    /// Вход по логину и паролю
    pub async fn login(&self, username: String, password: String) -> Result<(), String> {
        let response = api::login(username, password).await?;
        log::info!("Admin '{}' signed in", response.admin.username);
        self.set_session(AdminSession::from_login(response, Utc::now()));
        Ok(())
    }

    /// Выход: refresh token отзывается на сервере, локальная сессия удаляется всегда
    pub async fn logout(&self) {
        let refresh = self
            .session
            .with_untracked(|s| s.as_ref().map(|s| s.refresh_token.clone()));
        if let Some(refresh_token) = refresh {
            if let Err(e) = api::logout(refresh_token).await {
                log::warn!("Logout request failed: {}", e);
            }
        }
        self.drop_session();
    }

    /// Проверка срока: обновить токен или завершить сессию
    pub async fn ensure_fresh(&self) {
        let Some(session) = self.session.get_untracked() else {
            return;
        };
        match session.state(Utc::now()) {
            SessionState::Valid => {}
            SessionState::Expired => {
                log::info!("Admin session expired");
                self.drop_session();
            }
            SessionState::NeedsRefresh => {
                match api::refresh_token(session.refresh_token.clone()).await {
                    Ok(response) => {
                        self.set_session(session.refreshed(response.access_token, Utc::now()));
                    }
                    Err(e) => {
                        log::warn!("Token refresh failed: {}", e);
                        self.drop_session();
                    }
                }
            }
        }
    }

    /// Восстановление сессии и сверка профиля с `auth.me`
    async fn restore(&self) {
        let restored = storage::load_session_raw()
            .and_then(|raw| AdminSession::restore(&raw, Utc::now()));
        let Some(session) = restored else {
            storage::clear_session();
            return;
        };
        self.set_session(session);
        self.ensure_fresh().await;
        if !self.is_authenticated() {
            return;
        }
        match api::get_current_admin().await {
            Ok(admin) => self.session.update(|s| {
                if let Some(s) = s {
                    s.admin = admin;
                    storage::save_session(s);
                }
            }),
            Err(e) => {
                log::warn!("Stored session rejected: {}", e);
                self.drop_session();
            }
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    spawn_local(async move {
        auth.restore().await;
        auth.restoring.set(false);
    });

    // Проверка срока сессии раз в минуту
    crate::shared::polling::use_interval(60_000, move || {
        spawn_local(async move { auth.ensure_fresh().await });
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
