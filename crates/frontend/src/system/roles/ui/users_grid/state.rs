use contracts::system::users::UserProfile;
use leptos::prelude::*;

use crate::system::users::source::ProfilePageCache;

#[derive(Clone, Debug)]
pub struct RoleUsersGridState {
    pub loading: bool,
    pub page: usize,
    /// Role member count reported by the stats endpoint
    pub server_total: u64,
    pub pages: ProfilePageCache,
    /// Results of the last search that was still current when it finished
    pub search_results: Vec<UserProfile>,
    /// Term the grid is showing results for; empty means plain listing
    pub term: String,
    pub error: Option<String>,
}

impl Default for RoleUsersGridState {
    fn default() -> Self {
        Self {
            loading: true,
            page: 0,
            server_total: 0,
            pages: ProfilePageCache::default(),
            search_results: Vec::new(),
            term: String::new(),
            error: None,
        }
    }
}

impl RoleUsersGridState {
    /// Users currently loaded for the grid: cached role pages, or the
    /// search results while a term is active.
    pub fn loaded_users(&self) -> Vec<UserProfile> {
        if self.term.is_empty() {
            self.pages.profiles()
        } else {
            self.search_results.clone()
        }
    }
}

pub fn create_state() -> RwSignal<RoleUsersGridState> {
    RwSignal::new(RoleUsersGridState::default())
}
