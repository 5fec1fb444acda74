//! Process-wide session.
//!
//! `AuthProvider` owns the one [`Session`] signal. It starts as
//! `Session::loading()` while stored tokens are checked, and only the
//! functions in this module replace it.

use contracts::system::auth::profile::DeleteAccountRequest;
use contracts::system::auth::session::Session;
use contracts::system::auth::{RegisterRequest, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(Session::loading());

    // Try to restore the session from storage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            session.set(restore_session().await);
        });
    });

    provide_context(session);

    children()
}

/// Verify the stored token, refreshing it once if needed.
async fn restore_session() -> Session {
    if storage::get_access_token().is_none() {
        return Session::anonymous();
    }

    match api::verify_token().await {
        Ok(user) => return Session::signed_in(user),
        Err(e) => log::warn!("stored access token rejected: {}", e),
    }

    let Some(refresh) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return Session::anonymous();
    };

    match api::refresh_token(refresh).await {
        Ok(response) => {
            storage::save_access_token(&response.access);
            match api::verify_token().await {
                Ok(user) => Session::signed_in(user),
                Err(e) => {
                    log::warn!("token refresh did not restore the session: {}", e);
                    storage::clear_tokens();
                    Session::anonymous()
                }
            }
        }
        Err(e) => {
            log::warn!("token refresh failed: {}", e);
            storage::clear_tokens();
            Session::anonymous()
        }
    }
}

/// Hook to access the session signal
pub fn use_auth() -> RwSignal<Session> {
    use_context::<RwSignal<Session>>().expect("AuthProvider not found in component tree")
}

/// Log in and store the tokens.
pub async fn do_login(
    session: RwSignal<Session>,
    email: String,
    password: String,
    remember: bool,
) -> Result<(), String> {
    session.update(|s| *s = s.busy());
    match api::login(email, password).await {
        Ok(response) => {
            storage::save_tokens(&response.tokens.access, &response.tokens.refresh, remember);
            session.set(Session::signed_in(response.user));
            Ok(())
        }
        Err(e) => {
            session.update(|s| *s = s.settled());
            Err(e)
        }
    }
}

/// Create an account and sign straight in.
pub async fn do_register(
    session: RwSignal<Session>,
    request: RegisterRequest,
    remember: bool,
) -> Result<(), String> {
    session.update(|s| *s = s.busy());
    match api::register(&request).await {
        Ok(response) => {
            storage::save_tokens(&response.tokens.access, &response.tokens.refresh, remember);
            session.set(Session::signed_in(response.user));
            Ok(())
        }
        Err(e) => {
            session.update(|s| *s = s.settled());
            Err(e)
        }
    }
}

/// Log out. Local tokens are cleared even if the server call fails.
pub async fn do_logout(session: RwSignal<Session>) {
    session.update(|s| *s = s.busy());
    if let Some(refresh) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh).await {
            log::warn!("logout request failed: {}", e);
        }
    }
    storage::clear_tokens();
    session.set(Session::anonymous());
}

/// Swap the signed-in user after a profile edit.
pub fn replace_user(session: RwSignal<Session>, user: UserInfo) {
    if session.with_untracked(|s| s.is_authenticated()) {
        session.set(Session::signed_in(user));
    }
}

/// Delete the account, then drop every stored token.
pub async fn do_delete_account(
    session: RwSignal<Session>,
    request: DeleteAccountRequest,
) -> Result<(), String> {
    api::delete_account(&request).await?;
    storage::clear_tokens();
    session.set(Session::anonymous());
    Ok(())
}
