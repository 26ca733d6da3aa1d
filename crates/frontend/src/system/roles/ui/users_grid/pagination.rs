//! Расчёт окна страницы и счётчиков для сетки пользователей роли.

use contracts::system::users::UserProfile;

use crate::system::roles::pending::PendingUsers;

pub const USERS_PER_PAGE: usize = 10;

/// 1-based inclusive counters shown by the pager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub start_count: usize,
    pub end_count: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        (self.end_count + 1).saturating_sub(self.start_count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Total the pager shows after applying staged changes.
///
/// Without a term the server's role count is the base. While searching the
/// server does not count matches, so the loaded results are the base and
/// only removals among them are subtracted.
pub fn visible_total(
    term: &str,
    server_total: u64,
    loaded: &[UserProfile],
    to_add: &PendingUsers,
    to_remove: &PendingUsers,
) -> usize {
    let (base, removed) = if term.is_empty() {
        (
            usize::try_from(server_total).unwrap_or(usize::MAX),
            to_remove.len(),
        )
    } else {
        let removed = loaded
            .iter()
            .filter(|u| to_remove.contains_key(&u.id))
            .count();
        (loaded.len(), removed)
    };
    base.saturating_add(to_add.len()).saturating_sub(removed)
}

pub fn page_window(page: usize, per_page: usize, total: usize) -> PageWindow {
    let start_count = page * per_page + 1;
    let end_count = ((page + 1) * per_page).min(total);
    PageWindow {
        start_count,
        end_count,
        total,
    }
}

/// Rows of one page: removals dropped, staged additions first, then sliced
/// to the window.
pub fn window_rows(
    loaded: &[UserProfile],
    to_add: &PendingUsers,
    to_remove: &PendingUsers,
    window: PageWindow,
) -> Vec<UserProfile> {
    if window.is_empty() {
        return Vec::new();
    }
    to_add
        .values()
        .chain(loaded.iter().filter(|u| !to_remove.contains_key(&u.id)))
        .skip(window.start_count - 1)
        .take(window.len())
        .cloned()
        .collect()
}
