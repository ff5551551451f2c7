use contracts::system::auth::{
    AdminInfo, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
};

use crate::shared::api::http;

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    http::post_json("/api/system/auth/login", &request).await
}

/// Refresh access token using refresh token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let request = RefreshRequest { refresh_token };
    http::post_json("/api/system/auth/refresh", &request).await
}

/// Logout (revoke refresh token)
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let request = RefreshRequest { refresh_token };
    http::post_no_content("/api/system/auth/logout", &request).await
}

/// `auth.me`: текущий администратор по токену из хранилища
pub async fn get_current_admin() -> Result<AdminInfo, String> {
    http::get_json("/api/system/auth/me").await
}
