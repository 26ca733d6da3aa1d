//! Контроллер сетки пользователей роли.
//!
//! Owns the transient grid state (loading flag, page, fetched pages,
//! search results) and drives the profile source. All methods are meant
//! to be spawned on the single-threaded UI executor; the loading flag is
//! the only guard between overlapping page requests.

use contracts::system::users::UserFilters;
use leptos::prelude::*;

use super::debounce::{GlooTimer, SearchDebounce, Timer, SEARCH_DEBOUNCE_MS};
use super::pagination::USERS_PER_PAGE;
use super::state::{create_state, RoleUsersGridState};
use crate::shared::api_utils::ApiError;
use crate::system::users::source::ProfileSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub per_page: usize,
    pub search_debounce_ms: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            per_page: USERS_PER_PAGE,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
        }
    }
}

#[derive(Clone)]
pub struct RoleUsersController<S, T = GlooTimer> {
    role_name: String,
    state: RwSignal<RoleUsersGridState>,
    source: S,
    timer: T,
    debounce: SearchDebounce,
    config: GridConfig,
}

impl<S: ProfileSource, T: Timer> RoleUsersController<S, T> {
    pub fn new(role_name: impl Into<String>, source: S, timer: T, config: GridConfig) -> Self {
        Self {
            role_name: role_name.into(),
            state: create_state(),
            source,
            timer,
            debounce: SearchDebounce::default(),
            config,
        }
    }

    pub fn state(&self) -> RwSignal<RoleUsersGridState> {
        self.state
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn is_loading(&self) -> bool {
        self.state.with_untracked(|s| s.loading)
    }

    pub fn page(&self) -> usize {
        self.state.with_untracked(|s| s.page)
    }

    /// Resets the shared search term and loads the first page together with
    /// the role's member count. Loading ends once all three calls are back.
    pub async fn mount(&self) {
        log::debug!("role users grid: loading role '{}'", self.role_name);
        let filters = UserFilters::for_role(&self.role_name);

        let (search, profiles, stats) = futures::join!(
            self.source.set_user_grid_search(""),
            self.source
                .get_profiles(0, self.config.per_page, &self.role_name),
            self.source.get_filtered_users_stats(&filters),
        );

        self.state.update(|s| {
            s.error = None;
            match profiles {
                Ok(users) => s.pages.insert(0, users),
                Err(e) => report(s, "Не удалось загрузить пользователей роли", e),
            }
            match stats {
                Ok(stats) => s.server_total = stats.total_users_count,
                Err(e) => report(s, "Не удалось получить количество пользователей", e),
            }
            if let Err(e) = search {
                report(s, "Не удалось сбросить строку поиска", e);
            }
            s.loading = false;
        });
    }

    /// Reacts to a new shared search term.
    ///
    /// An empty term cancels the pending search and ends loading at once.
    /// Otherwise the grid goes back to the first page and the search runs
    /// after the debounce delay, unless a newer term arrived in the
    /// meantime; only the latest search may clear the loading flag or
    /// replace the results.
    pub async fn on_term_change(&self, term: String) {
        if term.is_empty() {
            self.debounce.cancel();
            self.state.update(|s| {
                s.term.clear();
                s.search_results.clear();
                s.loading = false;
            });
            return;
        }

        self.state.update(|s| {
            s.term = term.clone();
            s.page = 0;
            s.loading = true;
        });
        let token = self.debounce.begin();

        self.timer.sleep(self.config.search_debounce_ms).await;
        if !self.debounce.is_current(token) {
            return;
        }

        log::debug!("role users grid: searching '{}'", term);
        let result = self.source.search_profiles(&term, &self.role_name).await;
        if !self.debounce.is_current(token) {
            log::debug!("role users grid: search '{}' superseded, result dropped", term);
            return;
        }

        self.state.update(|s| {
            match result {
                Ok(users) => {
                    s.search_results = users;
                    s.error = None;
                }
                Err(e) => report(s, "Ошибка поиска пользователей", e),
            }
            s.loading = false;
        });
    }

    /// Fetches the following page; ignored while anything is loading.
    pub async fn next_page(&self) {
        if self.is_loading() {
            return;
        }
        let page = self.page() + 1;
        self.state.update(|s| s.loading = true);

        let result = self
            .source
            .get_profiles(page, self.config.per_page, &self.role_name)
            .await;

        self.state.update(|s| {
            match result {
                Ok(users) => {
                    s.pages.insert(page, users);
                    s.page = page;
                    s.error = None;
                }
                Err(e) => report(s, "Не удалось загрузить страницу", e),
            }
            s.loading = false;
        });
    }

    /// Steps back over an already fetched page, no request is made.
    pub fn previous_page(&self) {
        self.state.update(|s| {
            if s.loading || s.page == 0 || !s.pages.has_page(s.page - 1) {
                return;
            }
            s.page -= 1;
        });
    }
}

fn report(state: &mut RoleUsersGridState, context: &str, error: ApiError) {
    log::error!("{}: {}", context, error);
    state.error = Some(format!("{}: {}", context, error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::roles::pending::PendingUsers;
    use crate::system::roles::ui::users_grid::rows::build_grid_page;
    use async_trait::async_trait;
    use contracts::system::users::{UserProfile, UsersStats};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::time::sleep;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        SetSearch(String),
        Profiles(usize),
        Stats(Vec<String>),
        Search(String),
    }

    #[derive(Clone, Default)]
    struct MockSource {
        calls: Rc<RefCell<Vec<Call>>>,
        members: Rc<Vec<UserProfile>>,
        reset_delay: u64,
        profiles_delay: u64,
        stats_delay: u64,
        search_delay: u64,
        fail_stats: bool,
        fail_page: Option<usize>,
        flaky_page: Rc<Cell<Option<usize>>>,
    }

    impl MockSource {
        fn with_members(count: usize) -> Self {
            let members = (0..count)
                .map(|i| UserProfile {
                    id: format!("u{:02}", i),
                    username: format!("admin{:02}", i),
                    email: None,
                    full_name: None,
                    nickname: None,
                    roles: vec!["system_admin".into()],
                    is_active: true,
                })
                .collect();
            Self {
                members: Rc::new(members),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }

        fn searches(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Search(term) => Some(term),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }
    }

    fn failure() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "boom".into(),
        }
    }

    #[async_trait(?Send)]
    impl ProfileSource for MockSource {
        async fn get_profiles(
            &self,
            page: usize,
            per_page: usize,
            _role: &str,
        ) -> Result<Vec<UserProfile>, ApiError> {
            self.record(Call::Profiles(page));
            sleep(Duration::from_millis(self.profiles_delay)).await;
            if self.fail_page == Some(page) {
                return Err(failure());
            }
            if self.flaky_page.get() == Some(page) {
                self.flaky_page.set(None);
                return Err(failure());
            }
            Ok(self
                .members
                .iter()
                .skip(page * per_page)
                .take(per_page)
                .cloned()
                .collect())
        }

        async fn search_profiles(&self, term: &str, _role: &str) -> Result<Vec<UserProfile>, ApiError> {
            self.record(Call::Search(term.to_string()));
            sleep(Duration::from_millis(self.search_delay)).await;
            Ok(self
                .members
                .iter()
                .filter(|u| u.username.contains(term))
                .cloned()
                .collect())
        }

        async fn get_filtered_users_stats(&self, filters: &UserFilters) -> Result<UsersStats, ApiError> {
            self.record(Call::Stats(filters.roles.clone()));
            sleep(Duration::from_millis(self.stats_delay)).await;
            if self.fail_stats {
                return Err(failure());
            }
            Ok(UsersStats {
                total_users_count: self.members.len() as u64,
            })
        }

        async fn set_user_grid_search(&self, term: &str) -> Result<(), ApiError> {
            self.record(Call::SetSearch(term.to_string()));
            sleep(Duration::from_millis(self.reset_delay)).await;
            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    struct TokioTimer;

    #[async_trait(?Send)]
    impl Timer for TokioTimer {
        async fn sleep(&self, ms: u32) {
            sleep(Duration::from_millis(u64::from(ms))).await;
        }
    }

    fn controller(source: MockSource) -> RoleUsersController<MockSource, TokioTimer> {
        RoleUsersController::new("system_admin", source, TokioTimer, GridConfig::default())
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn owner() -> Owner {
        let owner = Owner::new();
        owner.set();
        owner
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_fans_out_and_waits_for_all_calls() {
        let _owner = owner();
        let source = MockSource {
            reset_delay: 10,
            profiles_delay: 30,
            stats_delay: 80,
            ..MockSource::with_members(25)
        };
        let ctrl = controller(source.clone());
        assert!(ctrl.is_loading());

        let probe = async {
            sleep(ms(50)).await;
            // profiles and reset are back, stats still pending
            assert!(ctrl.is_loading());
        };
        tokio::join!(ctrl.mount(), probe);

        assert!(!ctrl.is_loading());
        assert_eq!(source.count(|c| *c == Call::SetSearch(String::new())), 1);
        assert_eq!(source.count(|c| matches!(c, Call::Profiles(_))), 1);
        assert_eq!(
            source.count(|c| *c == Call::Stats(vec!["system_admin".into()])),
            1
        );
        ctrl.state().with_untracked(|s| {
            assert_eq!(s.server_total, 25);
            assert_eq!(s.pages.profiles().len(), USERS_PER_PAGE);
            assert!(s.error.is_none());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_failure_is_reported_and_loading_ends() {
        let _owner = owner();
        let source = MockSource {
            fail_stats: true,
            ..MockSource::with_members(3)
        };
        let ctrl = controller(source);
        ctrl.mount().await;

        ctrl.state().with_untracked(|s| {
            assert!(!s.loading);
            assert!(s.error.as_deref().unwrap_or("").contains("boom"));
            assert_eq!(s.pages.profiles().len(), 3);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_debounce_clears_loading() {
        let _owner = owner();
        let source = MockSource {
            search_delay: 20,
            ..MockSource::with_members(12)
        };
        let ctrl = controller(source.clone());
        ctrl.mount().await;

        let first = ctrl.on_term_change("admin0".into());
        let second = async {
            sleep(ms(50)).await;
            ctrl.on_term_change("admin1".into()).await;
        };
        let probe = async {
            sleep(ms(320)).await;
            // the first timer has expired, but it was superseded
            assert!(ctrl.is_loading());
            sleep(ms(60)).await;
            assert!(!ctrl.is_loading());
        };
        tokio::join!(first, second, probe);

        assert_eq!(source.searches(), ["admin1"]);
        ctrl.state().with_untracked(|s| {
            assert_eq!(s.term, "admin1");
            assert_eq!(s.search_results.len(), 2);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_search_in_flight_is_ignored() {
        let _owner = owner();
        let source = MockSource {
            search_delay: 500,
            ..MockSource::with_members(12)
        };
        let ctrl = controller(source.clone());
        ctrl.mount().await;

        // first search goes out at 300 and returns at 800,
        // second goes out at 700 and returns at 1200
        let first = ctrl.on_term_change("admin0".into());
        let second = async {
            sleep(ms(400)).await;
            ctrl.on_term_change("admin1".into()).await;
        };
        let probe = async {
            sleep(ms(900)).await;
            assert!(ctrl.is_loading());
            ctrl.state()
                .with_untracked(|s| assert!(s.search_results.is_empty()));
        };
        tokio::join!(first, second, probe);

        assert_eq!(source.searches(), ["admin0", "admin1"]);
        assert!(!ctrl.is_loading());
        ctrl.state().with_untracked(|s| {
            let ids: Vec<_> = s.search_results.iter().map(|u| u.id.as_str()).collect();
            assert_eq!(ids, ["u10", "u11"]);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_term_cancels_pending_search() {
        let _owner = owner();
        let source = MockSource::with_members(5);
        let ctrl = controller(source.clone());
        ctrl.mount().await;

        let typed = ctrl.on_term_change("adm".into());
        let cleared = async {
            sleep(ms(100)).await;
            ctrl.on_term_change(String::new()).await;
            assert!(!ctrl.is_loading());
        };
        tokio::join!(typed, cleared);

        assert!(source.searches().is_empty());
        assert!(!ctrl.is_loading());
        ctrl.state().with_untracked(|s| assert!(s.term.is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_page_is_ignored_while_loading() {
        let _owner = owner();
        let source = MockSource::with_members(25);
        let ctrl = controller(source.clone());
        // not mounted yet: the grid starts in the loading state
        assert!(ctrl.is_loading());

        ctrl.next_page().await;

        assert!(source.calls().is_empty());
        assert_eq!(ctrl.page(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paging_forward_fetches_and_back_uses_cache() {
        let _owner = owner();
        let source = MockSource::with_members(25);
        let ctrl = controller(source.clone());
        ctrl.mount().await;

        ctrl.previous_page();
        assert_eq!(ctrl.page(), 0);
        assert_eq!(source.count(|c| matches!(c, Call::Profiles(_))), 1);

        ctrl.next_page().await;
        assert_eq!(ctrl.page(), 1);
        assert_eq!(source.count(|c| *c == Call::Profiles(1)), 1);

        let page = ctrl.state().with_untracked(|s| {
            build_grid_page(s, USERS_PER_PAGE, &PendingUsers::new(), &PendingUsers::new(), false, None)
        });
        let ids: Vec<_> = page.rows.iter().map(|r| r.user.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"u10"));
        assert_eq!(ids.len(), 10);
        assert_eq!((page.window.start_count, page.window.end_count), (11, 20));

        ctrl.previous_page();
        assert_eq!(ctrl.page(), 0);
        assert_eq!(source.count(|c| matches!(c, Call::Profiles(_))), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_page_is_ignored_while_loading() {
        let _owner = owner();
        let source = MockSource::with_members(25);
        let ctrl = controller(source);
        ctrl.mount().await;
        ctrl.next_page().await;

        ctrl.state().update(|s| s.loading = true);
        ctrl.previous_page();
        assert_eq!(ctrl.page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_page_keeps_position() {
        let _owner = owner();
        let source = MockSource {
            fail_page: Some(1),
            ..MockSource::with_members(25)
        };
        let ctrl = controller(source);
        ctrl.mount().await;

        ctrl.next_page().await;

        assert_eq!(ctrl.page(), 0);
        ctrl.state().with_untracked(|s| {
            assert!(!s.loading);
            assert!(s.error.is_some());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_from_later_page_starts_at_first_page() {
        let _owner = owner();
        let source = MockSource::with_members(35);
        let ctrl = controller(source);
        ctrl.mount().await;
        ctrl.next_page().await;
        ctrl.next_page().await;
        assert_eq!(ctrl.page(), 2);

        ctrl.on_term_change("admin0".into()).await;

        assert_eq!(ctrl.page(), 0);
        let page = ctrl.state().with_untracked(|s| {
            build_grid_page(s, USERS_PER_PAGE, &PendingUsers::new(), &PendingUsers::new(), false, None)
        });
        assert_eq!(page.rows.len(), 10);
        assert_eq!((page.window.start_count, page.window.end_count, page.window.total), (1, 10, 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failed_page_clears_error() {
        let _owner = owner();
        let source = MockSource {
            flaky_page: Rc::new(Cell::new(Some(1))),
            ..MockSource::with_members(25)
        };
        let ctrl = controller(source);
        ctrl.mount().await;

        ctrl.next_page().await;
        assert_eq!(ctrl.page(), 0);
        ctrl.state().with_untracked(|s| assert!(s.error.is_some()));

        ctrl.next_page().await;
        assert_eq!(ctrl.page(), 1);
        ctrl.state().with_untracked(|s| assert!(s.error.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_search_clears_previous_error() {
        let _owner = owner();
        let source = MockSource {
            fail_page: Some(1),
            ..MockSource::with_members(12)
        };
        let ctrl = controller(source);
        ctrl.mount().await;
        ctrl.next_page().await;
        ctrl.state().with_untracked(|s| assert!(s.error.is_some()));

        ctrl.on_term_change("admin1".into()).await;

        ctrl.state().with_untracked(|s| {
            assert!(s.error.is_none());
            assert_eq!(s.search_results.len(), 2);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_page_needs_cached_page() {
        let _owner = owner();
        let source = MockSource::with_members(25);
        let ctrl = controller(source);
        ctrl.mount().await;

        // page 1 is current but page 0 was never fetched
        ctrl.state().update(|s| {
            s.pages = Default::default();
            s.page = 1;
        });
        ctrl.previous_page();
        assert_eq!(ctrl.page(), 1);
    }
}
