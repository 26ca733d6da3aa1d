//! Сетка пользователей системной роли.
//!
//! Lists the role's members page by page, merged with the changes the role
//! page has staged but not saved yet. The grid never edits the staged sets
//! itself: additions and removals are reported through the callbacks.

mod cells;
pub mod controller;
pub mod debounce;
pub mod pagination;
pub mod rows;
pub mod state;

use contracts::system::users::UserProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::data_grid::DataGrid;
use crate::shared::icons::icon;
use crate::system::roles::pending::PendingUsers;
use crate::system::roles::ui::add_users::AddUsersToRoleModal;
use crate::system::users::search_state::use_user_grid_search;
use crate::system::users::source::HttpProfileSource;
pub use cells::{UserGridName, UserGridRemove};
use controller::{GridConfig, RoleUsersController};
use debounce::GlooTimer;
use rows::{build_grid_page, user_grid_columns, UserGridRow};

#[component]
pub fn SystemRoleUsers(
    #[prop(into)] role_name: String,
    #[prop(into)] users_to_add: Signal<PendingUsers>,
    #[prop(into)] users_to_remove: Signal<PendingUsers>,
    /// No staging at all, e.g. for viewers without admin rights
    #[prop(into)]
    read_only: Signal<bool>,
    /// The acting administrator, who cannot remove themselves
    #[prop(into)]
    current_user_id: Signal<Option<String>>,
    on_add_callback: Callback<Vec<UserProfile>>,
    on_remove_callback: Callback<UserProfile>,
) -> impl IntoView {
    let grid_search = use_user_grid_search();
    let controller = RoleUsersController::new(
        role_name.clone(),
        HttpProfileSource::new(grid_search),
        GlooTimer,
        GridConfig::default(),
    );
    let state = controller.state();
    let per_page = controller.config().per_page;
    let (show_add, set_show_add) = signal(false);

    {
        let controller = controller.clone();
        spawn_local(async move { controller.mount().await });
    }

    // Only changes of the term matter, not its value at mount time
    {
        let controller = controller.clone();
        Effect::new(move |prev: Option<String>| {
            let term = grid_search.term.get();
            if prev.is_some_and(|prev| prev != term) {
                let controller = controller.clone();
                let term = term.clone();
                spawn_local(async move { controller.on_term_change(term).await });
            }
            term
        });
    }

    let grid_page = Memo::new(move |_| {
        let to_add = users_to_add.get();
        let to_remove = users_to_remove.get();
        let read_only = read_only.get();
        let current_user_id = current_user_id.get();
        state.with(|s| {
            build_grid_page(
                s,
                per_page,
                &to_add,
                &to_remove,
                read_only,
                current_user_id.as_deref(),
            )
        })
    });

    let next_page = {
        let controller = controller.clone();
        Callback::new(move |_: ()| {
            let controller = controller.clone();
            spawn_local(async move { controller.next_page().await });
        })
    };
    let previous_page = Callback::new(move |_: ()| controller.previous_page());

    let render_cell = Callback::new(move |(row, field): (UserGridRow, &'static str)| {
        cells::render_user_cell(row, field, on_remove_callback)
    });

    view! {
        <div class="role-users">
            <div class="role-users__header">
                <h2 class="role-users__title">
                    {icon("users")}
                    " Пользователи роли"
                </h2>
                <Show when=move || !read_only.get()>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_add.set(true)
                    >
                        {icon("plus")}
                        " Добавить"
                    </Button>
                </Show>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <DataGrid
                rows=Signal::derive(move || grid_page.with(|p| p.rows.clone()))
                columns=user_grid_columns()
                row_key=Callback::new(|row: UserGridRow| row.user.id.clone())
                render_cell=render_cell
                page=Signal::derive(move || state.with(|s| s.page))
                start_count=Signal::derive(move || grid_page.with(|p| p.window.start_count))
                end_count=Signal::derive(move || grid_page.with(|p| p.window.end_count))
                total=Signal::derive(move || grid_page.with(|p| p.window.total))
                loading=Signal::derive(move || state.with(|s| s.loading))
                term=grid_search.term
                search=Callback::new(move |term: String| grid_search.set(&term))
                next_page=next_page
                previous_page=previous_page
                placeholder="Поиск по пользователям роли..."
                empty_text="В роли нет пользователей"
            />

            {move || show_add.get().then(|| view! {
                <AddUsersToRoleModal
                    role_name=role_name.clone()
                    staged=users_to_add
                    on_add=on_add_callback
                    on_close=Callback::new(move |_: ()| set_show_add.set(false))
                />
            })}
        </div>
    }
}
