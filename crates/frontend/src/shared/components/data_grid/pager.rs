use crate::shared::icons::icon;
use leptos::prelude::*;

/// Пагинатор сетки: "start - end из total" и кнопки назад/вперёд.
///
/// The grid does not know the page count; "next" is offered while the
/// visible window ends before the total.
#[component]
pub fn DataGridPager(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] start_count: Signal<usize>,
    #[prop(into)] end_count: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
    #[prop(into)] loading: Signal<bool>,
    next_page: Callback<()>,
    previous_page: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <span class="pagination-info">
                {move || pager_label(start_count.get(), end_count.get(), total.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| previous_page.run(())
                disabled=move || { loading.get() || page.get() == 0 }
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| next_page.run(())
                disabled=move || { loading.get() || end_count.get() >= total.get() }
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}

pub fn pager_label(start_count: usize, end_count: usize, total: usize) -> String {
    if total == 0 {
        return "0 из 0".to_string();
    }
    format!("{} - {} из {}", start_count, end_count, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pager_label() {
        assert_eq!(pager_label(11, 20, 43), "11 - 20 из 43");
        assert_eq!(pager_label(1, 0, 0), "0 из 0");
    }
}
