//! Projection of the visible page into grid rows and the fixed column set.

use contracts::system::users::UserProfile;

use super::pagination::{page_window, visible_total, window_rows, PageWindow};
use super::state::RoleUsersGridState;
use crate::shared::components::data_grid::{DataGridColumn, TextAlign};
use crate::system::roles::pending::PendingUsers;

pub const FIELD_NAME: &str = "name";
pub const FIELD_NEW: &str = "new";
pub const FIELD_REMOVE: &str = "remove";

#[derive(Clone, Debug, PartialEq)]
pub struct UserGridRow {
    pub user: UserProfile,
    /// Staged for addition, shows the "new" badge
    pub is_new: bool,
    pub remove_disabled: bool,
}

/// Everything the grid needs for one render
#[derive(Clone, Debug, PartialEq)]
pub struct UserGridPage {
    pub rows: Vec<UserGridRow>,
    pub window: PageWindow,
}

pub fn user_grid_columns() -> Vec<DataGridColumn> {
    vec![
        DataGridColumn {
            field: FIELD_NAME,
            title: "Пользователь",
            width: Some(4),
            fixed: true,
            text_align: TextAlign::Left,
        },
        DataGridColumn {
            field: FIELD_NEW,
            title: "",
            width: None,
            fixed: true,
            text_align: TextAlign::Left,
        },
        DataGridColumn {
            field: FIELD_REMOVE,
            title: "",
            width: None,
            fixed: true,
            text_align: TextAlign::Right,
        },
    ]
}

pub fn project_rows(
    users: Vec<UserProfile>,
    to_add: &PendingUsers,
    read_only: bool,
    current_user_id: Option<&str>,
) -> Vec<UserGridRow> {
    users
        .into_iter()
        .map(|user| {
            let is_self = current_user_id == Some(user.id.as_str());
            UserGridRow {
                is_new: to_add.contains_key(&user.id),
                remove_disabled: read_only || is_self,
                user,
            }
        })
        .collect()
}

pub fn build_grid_page(
    state: &RoleUsersGridState,
    per_page: usize,
    to_add: &PendingUsers,
    to_remove: &PendingUsers,
    read_only: bool,
    current_user_id: Option<&str>,
) -> UserGridPage {
    let loaded = state.loaded_users();
    let total = visible_total(&state.term, state.server_total, &loaded, to_add, to_remove);
    let window = page_window(state.page, per_page, total);
    let users = window_rows(&loaded, to_add, to_remove, window);
    UserGridPage {
        rows: project_rows(users, to_add, read_only, current_user_id),
        window,
    }
}
