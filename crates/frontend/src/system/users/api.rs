use contracts::system::users::{
    ProfilesQuery, SearchProfilesRequest, UserFilters, UserProfile, UsersStats,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, auth_header, read_json, ApiError};

/// Page of profiles, optionally restricted to one role
pub async fn fetch_profiles(query: &ProfilesQuery) -> Result<Vec<UserProfile>, ApiError> {
    let auth_header = auth_header()?;
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Request(e.to_string()))?;

    let response = Request::get(&api_url(&format!("/api/system/users/profiles?{}", qs)))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    read_json(response).await
}

pub async fn search_profiles(request: &SearchProfilesRequest) -> Result<Vec<UserProfile>, ApiError> {
    let auth_header = auth_header()?;

    let response = Request::post(&api_url("/api/system/users/profiles/search"))
        .header("Authorization", &auth_header)
        .json(request)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    read_json(response).await
}

/// Aggregate counters for the given filter
pub async fn fetch_users_stats(filters: &UserFilters) -> Result<UsersStats, ApiError> {
    let auth_header = auth_header()?;

    let response = Request::post(&api_url("/api/system/users/stats"))
        .header("Authorization", &auth_header)
        .json(filters)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    read_json(response).await
}
