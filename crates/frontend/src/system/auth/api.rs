use contracts::shared::api_error::{describe_login_error, NO_RESPONSE_MESSAGE};
use contracts::system::auth::profile::{
    DeleteAccountRequest, MessageResponse, PasswordChangeRequest, ProfileUpdate, UserProfile,
};
use contracts::system::auth::{
    AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, UserInfo,
    VerifyResponse,
};
use gloo_net::http::Request;
use web_sys::File;

use crate::shared::api_utils::{
    api_url, delete_json, get_json, patch_form, patch_json, post_json, post_json_discard, Upload,
};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<AuthResponse, String> {
    let request = LoginRequest { email, password };

    let response = Request::post(&api_url("/auth/login/"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| {
            log::error!("login request failed: {}", e);
            NO_RESPONSE_MESSAGE.to_string()
        })?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(describe_login_error(status, &text));
    }

    response
        .json::<AuthResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Create an account; the answer carries tokens like login
pub async fn register(request: &RegisterRequest) -> Result<AuthResponse, String> {
    post_json("/auth/register/", request).await
}

/// Exchange the refresh token for a new access token
pub async fn refresh_token(refresh: String) -> Result<RefreshResponse, String> {
    post_json("/auth/token/refresh/", &RefreshRequest { refresh }).await
}

/// Blacklist the refresh token server-side
pub async fn logout(refresh: String) -> Result<(), String> {
    post_json_discard("/auth/logout/", &RefreshRequest { refresh }).await
}

/// Check the stored access token and get the current user
pub async fn verify_token() -> Result<UserInfo, String> {
    get_json::<VerifyResponse>("/auth/verify-token/")
        .await
        .map(|body| body.user)
}

pub async fn fetch_profile() -> Result<UserProfile, String> {
    get_json("/auth/profile/").await
}

/// Partial profile update; multipart when a new picture is attached.
pub async fn update_profile(update: &ProfileUpdate, picture: Option<File>) -> Result<UserProfile, String> {
    match picture {
        Some(file) => {
            let upload = Upload { field: "profile_picture", file: &file };
            patch_form("/auth/profile/", &update.form_fields(), Some(upload)).await
        }
        None => patch_json("/auth/profile/", update).await,
    }
}

pub async fn change_password(request: &PasswordChangeRequest) -> Result<MessageResponse, String> {
    post_json("/auth/change-password/", request).await
}

pub async fn delete_account(request: &DeleteAccountRequest) -> Result<(), String> {
    delete_json("/auth/account/", request).await
}
