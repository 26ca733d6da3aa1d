use leptos::prelude::*;

/// Строка поиска сетки пользователей, общая для всей консоли.
///
/// Lives in context so the term survives switching between role pages.
#[derive(Clone, Copy)]
pub struct UserGridSearch {
    pub term: RwSignal<String>,
}

impl UserGridSearch {
    pub fn new() -> Self {
        Self {
            term: RwSignal::new(String::new()),
        }
    }

    pub fn set(&self, term: &str) {
        self.term.set(term.to_string());
    }
}

impl Default for UserGridSearch {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_user_grid_search() -> UserGridSearch {
    use_context::<UserGridSearch>().expect("UserGridSearch not provided in context")
}
