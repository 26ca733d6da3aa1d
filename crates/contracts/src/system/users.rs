use serde::{Deserialize, Serialize};

/// Профиль пользователя, как его отдаёт `/api/system/users/profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Names of the system roles assigned to the user
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    /// Full name, then nickname, then username.
    pub fn display_name(&self) -> &str {
        [self.full_name.as_deref(), self.nickname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Фильтр для агрегированной статистики пользователей
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilters {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl UserFilters {
    pub fn for_role(role_name: &str) -> Self {
        Self {
            roles: vec![role_name.to_string()],
            include_inactive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersStats {
    pub total_users_count: u64,
}

/// Query-string parameters of the paged profile listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilesQuery {
    pub page: usize,
    pub per_page: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProfilesRequest {
    pub term: String,
    /// Only users holding this role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Only users NOT holding this role (add-users dialog)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_in_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}
