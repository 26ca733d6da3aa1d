use contracts::system::roles::{Role, UpdateRoleMembersDto};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, auth_header, ensure_ok, read_json, ApiError};

fn role_path(role_name: &str) -> String {
    format!("/api/system/roles/{}", urlencoding::encode(role_name))
}

pub async fn fetch_role(role_name: &str) -> Result<Role, ApiError> {
    let auth_header = auth_header()?;

    let response = Request::get(&api_url(&role_path(role_name)))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    read_json(response).await
}

/// Commits staged additions/removals of the role in one request
pub async fn update_role_members(
    role_name: &str,
    dto: &UpdateRoleMembersDto,
) -> Result<(), ApiError> {
    let auth_header = auth_header()?;

    let response = Request::post(&api_url(&format!("{}/members", role_path(role_name))))
        .header("Authorization", &auth_header)
        .json(dto)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    ensure_ok(&response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_path_is_encoded() {
        assert_eq!(role_path("system_admin"), "/api/system/roles/system_admin");
        assert_eq!(role_path("a b/c"), "/api/system/roles/a%20b%2Fc");
    }
}
