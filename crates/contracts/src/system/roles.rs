use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub built_in: bool,
}

/// Пакет изменений состава роли, накопленный на странице роли до сохранения.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRoleMembersDto {
    pub add_user_ids: Vec<String>,
    pub remove_user_ids: Vec<String>,
}

impl UpdateRoleMembersDto {
    pub fn is_empty(&self) -> bool {
        self.add_user_ids.is_empty() && self.remove_user_ids.is_empty()
    }
}
