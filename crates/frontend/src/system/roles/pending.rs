//! Staged (not yet saved) changes to a role's member list.
//!
//! The role page owns both maps; the users grid only reads them and asks
//! for changes through callbacks.

use contracts::system::roles::UpdateRoleMembersDto;
use contracts::system::users::UserProfile;
use std::collections::BTreeMap;

/// user id → profile
pub type PendingUsers = BTreeMap<String, UserProfile>;

/// Stages users for addition. Re-adding a user staged for removal just
/// cancels the removal.
pub fn stage_additions(
    to_add: &mut PendingUsers,
    to_remove: &mut PendingUsers,
    users: Vec<UserProfile>,
) {
    for user in users {
        if to_remove.remove(&user.id).is_none() {
            to_add.insert(user.id.clone(), user);
        }
    }
}

/// Stages a member for removal; removing a staged addition un-stages it.
pub fn stage_removal(to_add: &mut PendingUsers, to_remove: &mut PendingUsers, user: UserProfile) {
    if to_add.remove(&user.id).is_none() {
        to_remove.insert(user.id.clone(), user);
    }
}

pub fn pending_update(to_add: &PendingUsers, to_remove: &PendingUsers) -> UpdateRoleMembersDto {
    UpdateRoleMembersDto {
        add_user_ids: to_add.keys().cloned().collect(),
        remove_user_ids: to_remove.keys().cloned().collect(),
    }
}
