use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for a restored session
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=move || {
                if auth_state.get().checked {
                    view! { <div class="alert alert--error">"Требуется вход в систему"</div> }.into_any()
                } else {
                    view! { <div class="page__loading">"Загрузка..."</div> }.into_any()
                }
            }
        >
            {children()}
        </Show>
    }
}
