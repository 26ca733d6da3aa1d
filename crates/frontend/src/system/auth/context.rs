use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Session restore from localStorage has finished (successfully or not)
    pub checked: bool,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_info.as_ref().map(|u| u.id.clone())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Try to restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let restored = restore_session().await;
            if restored.is_none() {
                storage::clear_tokens();
            }
            let (access_token, user_info) = restored.unzip();
            set_auth_state.set(AuthState {
                access_token,
                user_info,
                checked: true,
            });
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

async fn restore_session() -> Option<(String, UserInfo)> {
    let access_token = storage::get_access_token()?;
    match api::get_current_user(&access_token).await {
        Ok(user_info) => Some((access_token, user_info)),
        Err(e) => {
            log::warn!("Access token rejected, trying refresh: {}", e);
            let refresh_token = storage::get_refresh_token()?;
            let response = api::refresh_token(refresh_token).await.ok()?;
            storage::save_access_token(&response.access_token);
            let user_info = api::get_current_user(&response.access_token).await.ok()?;
            Some((response.access_token, user_info))
        }
    }
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}
