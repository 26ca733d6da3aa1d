use contracts::system::roles::Role;
use contracts::system::users::UserProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::system::auth::context::use_auth;
use crate::system::roles::api;
use crate::system::roles::pending::{pending_update, stage_additions, stage_removal, PendingUsers};
use crate::system::roles::ui::users_grid::SystemRoleUsers;

/// Страница системной роли: описание и состав участников.
///
/// Owns the staged additions/removals. They are sent in one request on
/// save and dropped on cancel; either way the users grid is remounted so it
/// reloads the committed membership.
#[component]
pub fn RoleDetailsPage(#[prop(into)] role_name: String) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let role_name = StoredValue::new(role_name);
    let role: RwSignal<Option<Role>> = RwSignal::new(None);
    let users_to_add: RwSignal<PendingUsers> = RwSignal::new(PendingUsers::new());
    let users_to_remove: RwSignal<PendingUsers> = RwSignal::new(PendingUsers::new());
    let grid_epoch = RwSignal::new(0u32);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let name = role_name.get_value();
        spawn_local(async move {
            match api::fetch_role(&name).await {
                Ok(r) => role.set(Some(r)),
                Err(e) => {
                    log::error!("failed to load role '{}': {}", name, e);
                    set_error.set(Some(format!("Не удалось загрузить роль: {}", e)));
                }
            }
        });
    });

    let read_only = Signal::derive(move || !auth_state.with(|s| s.is_admin()));
    let current_user_id = Signal::derive(move || auth_state.with(|s| s.user_id()));

    let on_add = Callback::new(move |users: Vec<UserProfile>| {
        users_to_add.update(|to_add| {
            users_to_remove.update(|to_remove| stage_additions(to_add, to_remove, users))
        });
    });
    let on_remove = Callback::new(move |user: UserProfile| {
        users_to_add.update(|to_add| {
            users_to_remove.update(|to_remove| stage_removal(to_add, to_remove, user))
        });
    });

    let pending_count =
        move || users_to_add.with(|a| a.len()) + users_to_remove.with(|r| r.len());

    let discard = move || {
        users_to_add.set(PendingUsers::new());
        users_to_remove.set(PendingUsers::new());
        grid_epoch.update(|e| *e += 1);
    };

    let save = move || {
        let dto = users_to_add.with_untracked(|a| users_to_remove.with_untracked(|r| pending_update(a, r)));
        if dto.is_empty() {
            return;
        }
        set_saving.set(true);
        set_error.set(None);
        let name = role_name.get_value();
        spawn_local(async move {
            match api::update_role_members(&name, &dto).await {
                Ok(()) => {
                    log::info!(
                        "role '{}' updated: +{} -{}",
                        name,
                        dto.add_user_ids.len(),
                        dto.remove_user_ids.len()
                    );
                    discard();
                }
                Err(e) => {
                    log::error!("failed to update role '{}': {}", name, e);
                    set_error.set(Some(format!("Ошибка сохранения: {}", e)));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div id="sys_roles--detail" class="page page--detail" data-page-category="system">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || role.with(|r| {
                            r.as_ref()
                                .map(|r| r.display_name.clone())
                                .unwrap_or_else(|| role_name.get_value())
                        })}
                    </h1>
                    <Show when=move || { pending_count() > 0 }>
                        <span class="badge badge--warning">
                            {move || format!("Не сохранено: {}", pending_count())}
                        </span>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| discard()
                        disabled=Signal::derive(move || saving.get() || pending_count() == 0)
                    >
                        "Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| save()
                        disabled=Signal::derive(move || saving.get() || pending_count() == 0)
                    >
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {move || role.with(|r| {
                    r.as_ref()
                        .and_then(|r| r.description.clone())
                        .map(|d| view! { <p class="page__description">{d}</p> })
                })}

                {move || {
                    grid_epoch.track();
                    view! {
                        <SystemRoleUsers
                            role_name=role_name.get_value()
                            users_to_add=users_to_add
                            users_to_remove=users_to_remove
                            read_only=read_only
                            current_user_id=current_user_id
                            on_add_callback=on_add
                            on_remove_callback=on_remove
                        />
                    }
                }}
            </div>
        </div>
    }
}
