use leptos::prelude::*;
use serde::Deserialize;
use web_sys::window;

use crate::system::auth::context::AuthProvider;
use crate::system::auth::guard::RequireAuth;
use crate::system::roles::ui::details::RoleDetailsPage;
use crate::system::users::search_state::UserGridSearch;

const DEFAULT_ROLE: &str = "system_admin";

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    role: Option<String>,
}

/// Role to show, from `?role=...`
pub fn role_from_query(search: &str) -> String {
    serde_qs::from_str::<PageQuery>(search.trim_start_matches('?'))
        .ok()
        .and_then(|q| q.role)
        .map(|role| role.trim().to_string())
        .filter(|role| !role.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

#[component]
pub fn App() -> impl IntoView {
    // Search term of user grids is shared across the console
    provide_context(UserGridSearch::new());

    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let role_name = StoredValue::new(role_from_query(&search));
    log::debug!("opening role page for '{}'", role_name.get_value());

    view! {
        <AuthProvider>
            <RequireAuth>
                <RoleDetailsPage role_name=role_name.get_value() />
            </RequireAuth>
        </AuthProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_query() {
        assert_eq!(role_from_query("?role=system_user_manager"), "system_user_manager");
        assert_eq!(role_from_query("?active=tab1&role=system_read_only_admin"), "system_read_only_admin");
    }

    #[test]
    fn test_role_defaults_when_missing_or_blank() {
        assert_eq!(role_from_query(""), DEFAULT_ROLE);
        assert_eq!(role_from_query("?active=tab1"), DEFAULT_ROLE);
        assert_eq!(role_from_query("?role=%20"), DEFAULT_ROLE);
    }
}
