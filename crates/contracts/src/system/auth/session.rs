//! Сессия администратора на клиенте с явным сроком жизни.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{AdminInfo, LoginResponse};

/// Срок жизни сессии
pub const SESSION_TTL_HOURS: i64 = 12;
/// За сколько до истечения обновлять access token
pub const REFRESH_WINDOW_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub admin: AdminInfo,
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Valid,
    /// Скоро истекает, нужен вызов refresh
    NeedsRefresh,
    Expired,
}

impl AdminSession {
    pub fn from_login(response: LoginResponse, now: DateTime<Utc>) -> Self {
        Self {
            admin: response.admin,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            issued_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        if now >= self.expires_at {
            SessionState::Expired
        } else if self.expires_at - now <= Duration::minutes(REFRESH_WINDOW_MINUTES) {
            SessionState::NeedsRefresh
        } else {
            SessionState::Valid
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.state(now) == SessionState::Expired
    }

    /// Новый access token продлевает сессию на полный срок
    pub fn refreshed(mut self, access_token: String, now: DateTime<Utc>) -> Self {
        self.access_token = access_token;
        self.issued_at = now;
        self.expires_at = now + Duration::hours(SESSION_TTL_HOURS);
        self
    }

    /// Сессия из хранилища; просроченная или повреждённая считается отсутствующей
    pub fn restore(raw: &str, now: DateTime<Utc>) -> Option<Self> {
        let session: Self = serde_json::from_str(raw).ok()?;
        (!session.is_expired(now)).then_some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> LoginResponse {
        LoginResponse {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            admin: AdminInfo {
                id: "1".into(),
                username: "admin".into(),
                full_name: Some("Administrator".into()),
                email: None,
                is_super_admin: true,
                permissions: vec![],
            },
        }
    }

    #[test]
    fn test_state_over_lifetime() {
        let now = Utc::now();
        let session = AdminSession::from_login(login(), now);
        assert_eq!(session.state(now), SessionState::Valid);
        assert_eq!(
            session.state(now + Duration::hours(SESSION_TTL_HOURS) - Duration::minutes(2)),
            SessionState::NeedsRefresh
        );
        assert!(session.is_expired(now + Duration::hours(SESSION_TTL_HOURS)));
    }

    #[test]
    fn test_restore_drops_expired() {
        let now = Utc::now();
        let session = AdminSession::from_login(login(), now);
        let raw = serde_json::to_string(&session).unwrap();
        assert_eq!(AdminSession::restore(&raw, now), Some(session));
        assert_eq!(
            AdminSession::restore(&raw, now + Duration::hours(SESSION_TTL_HOURS + 1)),
            None
        );
        assert_eq!(AdminSession::restore("{not json", now), None);
    }

    #[test]
    fn test_refresh_extends() {
        let now = Utc::now();
        let later = now + Duration::hours(11);
        let session = AdminSession::from_login(login(), now).refreshed("next".into(), later);
        assert_eq!(session.access_token, "next");
        assert_eq!(session.state(later + Duration::hours(2)), SessionState::Valid);
    }
}
