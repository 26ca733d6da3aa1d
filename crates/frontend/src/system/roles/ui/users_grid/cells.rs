//! Ячейки сетки пользователей роли.

use contracts::system::users::UserProfile;
use leptos::prelude::*;
use thaw::*;

use super::rows::{UserGridRow, FIELD_NAME, FIELD_NEW, FIELD_REMOVE};
use crate::shared::components::ui::{Badge, BadgeVariant};

pub fn render_user_cell(
    row: UserGridRow,
    field: &'static str,
    on_remove: Callback<UserProfile>,
) -> AnyView {
    match field {
        FIELD_NAME => view! { <UserGridName user=row.user /> }.into_any(),
        FIELD_NEW if row.is_new => {
            view! { <Badge variant=BadgeVariant::Primary>"Новый"</Badge> }.into_any()
        }
        FIELD_REMOVE => view! {
            <UserGridRemove user=row.user disabled=row.remove_disabled on_remove=on_remove />
        }
        .into_any(),
        _ => ().into_any(),
    }
}

/// Display name with `@username` and email underneath
#[component]
pub fn UserGridName(user: UserProfile) -> impl IntoView {
    let display_name = user.display_name().to_string();
    let username =
        (display_name != user.username).then(|| format!("@{}", user.username));

    view! {
        <div class="user-grid-name">
            <span class="user-grid-name__display">{display_name}</span>
            {username.map(|username| view! { <span class="user-grid-name__username">{username}</span> })}
            {user.email.map(|email| view! { <span class="user-grid-name__email">{email}</span> })}
        </div>
    }
}

#[component]
pub fn UserGridRemove(
    user: UserProfile,
    disabled: bool,
    on_remove: Callback<UserProfile>,
) -> impl IntoView {
    view! {
        <Button
            appearance=ButtonAppearance::Subtle
            disabled=disabled
            on_click=move |_| on_remove.run(user.clone())
        >
            "Удалить"
        </Button>
    }
}
