use contracts::system::users::{SearchProfilesRequest, UserProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;
use std::sync::Arc;
use thaw::*;

use crate::shared::modal::Modal;
use crate::system::roles::pending::PendingUsers;
use crate::system::roles::ui::users_grid::UserGridName;
use crate::system::users::api;

const SEARCH_LIMIT: usize = 50;

/// Диалог выбора пользователей для добавления в роль.
///
/// Offers users outside the role that are not staged yet; the chosen ones
/// go to `on_add` and the dialog closes.
#[component]
pub fn AddUsersToRoleModal(
    role_name: String,
    /// Already staged additions, hidden from the results
    #[prop(into)]
    staged: Signal<PendingUsers>,
    on_add: Callback<Vec<UserProfile>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let role_name = StoredValue::new(role_name);
    let term = RwSignal::new(String::new());
    let results: RwSignal<Vec<UserProfile>> = RwSignal::new(Vec::new());
    let selected: RwSignal<BTreeMap<String, UserProfile>> = RwSignal::new(BTreeMap::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let run_search = move || {
        let request = SearchProfilesRequest {
            term: term.get_untracked().trim().to_string(),
            not_in_role: Some(role_name.get_value()),
            limit: Some(SEARCH_LIMIT),
            ..Default::default()
        };
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::search_profiles(&request).await {
                Ok(users) => results.set(users),
                Err(e) => {
                    log::error!("add users search failed: {}", e);
                    set_error.set(Some(format!("Ошибка поиска: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| run_search());

    let visible = Memo::new(move |_| {
        let staged = staged.get();
        results.with(|users| {
            users
                .iter()
                .filter(|u| !staged.contains_key(&u.id))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let toggle = move |user: UserProfile, checked: bool| {
        selected.update(|s| {
            if checked {
                s.insert(user.id.clone(), user);
            } else {
                s.remove(&user.id);
            }
        });
    };

    let submit = move || {
        let users: Vec<UserProfile> = selected.get_untracked().into_values().collect();
        if users.is_empty() {
            return;
        }
        on_add.run(users);
        on_close.run(());
    };

    let footer: ChildrenFn = Arc::new(move || {
        view! {
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Отмена"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| submit()
                disabled=Signal::derive(move || selected.with(|s| s.is_empty()))
            >
                {move || format!("Добавить ({})", selected.with(|s| s.len()))}
            </Button>
        }
        .into_any()
    });

    view! {
        <Modal title=format!("Добавить пользователей в роль {}", role_name.get_value()) on_close=on_close footer=footer>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <div style="flex: 1;">
                    <Input value=term placeholder="Логин, ФИО или Email..." />
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| run_search()
                    disabled=Signal::derive(move || loading.get())
                >
                    "Найти"
                </Button>
            </Flex>

            <div class="add-users__list">
                <For
                    each=move || visible.get()
                    key=|user| user.id.clone()
                    children=move |user: UserProfile| {
                        let id = user.id.clone();
                        let user_for_toggle = user.clone();
                        view! {
                            <label class="add-users__item">
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    prop:checked=move || selected.with(|s| s.contains_key(&id))
                                    on:change=move |ev| {
                                        toggle(user_for_toggle.clone(), event_target_checked(&ev))
                                    }
                                />
                                <UserGridName user=user />
                            </label>
                        }
                    }
                />
                <Show when=move || !loading.get() && visible.with(|v| v.is_empty())>
                    <div class="add-users__empty">"Пользователи не найдены"</div>
                </Show>
            </div>
        </Modal>
    }
}
