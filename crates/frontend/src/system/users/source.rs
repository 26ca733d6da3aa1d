//! Источник профилей для сеток пользователей.
//!
//! `ProfileSource` is the contract the role users grid is written against;
//! `HttpProfileSource` is the browser implementation on top of [`super::api`].
//! Fetched pages are kept in a [`ProfilePageCache`] by the caller, which is
//! what lets the grid step back a page without asking the server again.

use async_trait::async_trait;
use contracts::system::users::{
    ProfilesQuery, SearchProfilesRequest, UserFilters, UserProfile, UsersStats,
};
use std::collections::{BTreeMap, HashSet};

use super::api;
use super::search_state::UserGridSearch;
use crate::shared::api_utils::ApiError;

#[async_trait(?Send)]
pub trait ProfileSource {
    async fn get_profiles(
        &self,
        page: usize,
        per_page: usize,
        role: &str,
    ) -> Result<Vec<UserProfile>, ApiError>;

    async fn search_profiles(&self, term: &str, role: &str) -> Result<Vec<UserProfile>, ApiError>;

    async fn get_filtered_users_stats(&self, filters: &UserFilters) -> Result<UsersStats, ApiError>;

    /// Updates the console-wide grid search term
    async fn set_user_grid_search(&self, term: &str) -> Result<(), ApiError>;
}

#[derive(Clone, Copy)]
pub struct HttpProfileSource {
    search: UserGridSearch,
}

impl HttpProfileSource {
    pub fn new(search: UserGridSearch) -> Self {
        Self { search }
    }
}

#[async_trait(?Send)]
impl ProfileSource for HttpProfileSource {
    async fn get_profiles(
        &self,
        page: usize,
        per_page: usize,
        role: &str,
    ) -> Result<Vec<UserProfile>, ApiError> {
        let query = ProfilesQuery {
            page,
            per_page,
            role: Some(role.to_string()),
        };
        api::fetch_profiles(&query).await
    }

    async fn search_profiles(&self, term: &str, role: &str) -> Result<Vec<UserProfile>, ApiError> {
        let request = SearchProfilesRequest {
            term: term.to_string(),
            role: Some(role.to_string()),
            ..Default::default()
        };
        api::search_profiles(&request).await
    }

    async fn get_filtered_users_stats(&self, filters: &UserFilters) -> Result<UsersStats, ApiError> {
        api::fetch_users_stats(filters).await
    }

    async fn set_user_grid_search(&self, term: &str) -> Result<(), ApiError> {
        self.search.set(term);
        Ok(())
    }
}

/// Pages fetched so far, keyed by page index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilePageCache {
    pages: BTreeMap<usize, Vec<UserProfile>>,
}

impl ProfilePageCache {
    pub fn insert(&mut self, page: usize, profiles: Vec<UserProfile>) {
        self.pages.insert(page, profiles);
    }

    pub fn has_page(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    /// All cached profiles in page order, each id once
    pub fn profiles(&self) -> Vec<UserProfile> {
        let mut seen = HashSet::new();
        let mut profiles = Vec::new();
        for profile in self.pages.values().flatten() {
            if seen.insert(profile.id.as_str()) {
                profiles.push(profile.clone());
            }
        }
        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserProfile {
        UserProfile {
            id: id.into(),
            username: format!("user_{}", id),
            email: None,
            full_name: None,
            nickname: None,
            roles: vec![],
            is_active: true,
        }
    }

    #[test]
    fn test_cache_keeps_page_order() {
        let mut cache = ProfilePageCache::default();
        cache.insert(1, vec![user("c"), user("d")]);
        cache.insert(0, vec![user("a"), user("b")]);

        let ids: Vec<_> = cache.profiles().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert!(cache.has_page(1));
        assert!(!cache.has_page(2));
    }

    #[test]
    fn test_cache_dedups_users_shifted_between_pages() {
        let mut cache = ProfilePageCache::default();
        cache.insert(0, vec![user("a"), user("b")]);
        cache.insert(1, vec![user("b"), user("c")]);

        let ids: Vec<_> = cache.profiles().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_refetch_replaces_page() {
        let mut cache = ProfilePageCache::default();
        cache.insert(0, vec![user("a")]);
        cache.insert(0, vec![user("z")]);
        assert_eq!(cache.profiles(), vec![user("z")]);
    }
}
