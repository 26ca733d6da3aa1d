//! Универсальная сетка данных: поиск, таблица, пагинатор.
//!
//! The grid renders whatever its owner projects into rows; it owns no
//! data and no paging state. Cells are produced by `render_cell`, called
//! with the row and the column's `field`.
//!
//! ```ignore
//! <DataGrid
//!     rows=rows
//!     columns=columns()
//!     row_key=Callback::new(|row: MyRow| row.id.clone())
//!     render_cell=Callback::new(|(row, field): (MyRow, &'static str)| render(row, field))
//!     ...
//! />
//! ```

pub mod column;
pub mod pager;

use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
pub use column::{DataGridColumn, TextAlign};
use pager::DataGridPager;

#[component]
pub fn DataGrid<T>(
    #[prop(into)] rows: Signal<Vec<T>>,
    columns: Vec<DataGridColumn>,
    row_key: Callback<T, String>,
    render_cell: Callback<(T, &'static str), AnyView>,
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] start_count: Signal<usize>,
    #[prop(into)] end_count: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
    #[prop(into)] loading: Signal<bool>,
    /// Current search term (owned by the caller)
    #[prop(into)]
    term: Signal<String>,
    search: Callback<String>,
    next_page: Callback<()>,
    previous_page: Callback<()>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] empty_text: Option<&'static str>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let total_weight = column::total_weight(&columns);
    let header_columns = columns.clone();
    let empty_text = empty_text.unwrap_or("Нет данных");

    view! {
        <div class=move || if loading.get() { "data-grid data-grid--loading" } else { "data-grid" }>
            <div class="data-grid__toolbar">
                <div class="data-grid__search">
                    {icon("search")}
                    <input
                        type="search"
                        class="data-grid__search-input"
                        placeholder=placeholder.unwrap_or("Поиск...")
                        prop:value=move || term.get()
                        on:input=move |ev| search.run(event_target_value(&ev))
                    />
                </div>
                <DataGridPager
                    page=page
                    start_count=start_count
                    end_count=end_count
                    total=total
                    loading=loading
                    next_page=next_page
                    previous_page=previous_page
                />
            </div>

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {header_columns
                                .into_iter()
                                .map(|col| {
                                    view! {
                                        <TableHeaderCell
                                            resizable=false
                                            class=col.class()
                                            attr:style=col.style(total_weight)
                                        >
                                            {col.title}
                                        </TableHeaderCell>
                                    }
                                })
                                .collect_view()}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || rows.get()
                            key=move |row: &T| row_key.run(row.clone())
                            children=move |row: T| {
                                let cells = columns
                                    .iter()
                                    .map(|col| {
                                        let cell = render_cell.run((row.clone(), col.field));
                                        view! {
                                            <TableCell class=col.class()>
                                                <TableCellLayout>{cell}</TableCellLayout>
                                            </TableCell>
                                        }
                                    })
                                    .collect_view();
                                view! { <TableRow>{cells}</TableRow> }
                            }
                        />
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                    <div class="data-grid__empty">{empty_text}</div>
                </Show>
                <Show when=move || loading.get()>
                    <div class="data-grid__loading">"Загрузка..."</div>
                </Show>
            </div>
        </div>
    }
}
