use crate::core::CatalogTable;
use crate::ui::{Icon, icons};
use leptos::prelude::*;

/// Catalog browser: pick a table to place it on the canvas.
#[component]
pub fn Sidebar(
    tables: Vec<CatalogTable>,
    /// Ids of tables already on the canvas
    #[prop(into)]
    placed: Signal<Vec<String>>,
    #[prop(into)] strict: Signal<bool>,
    #[prop(into)] on_select: Callback<String>,
    #[prop(into)] on_strict_change: Callback<bool>,
) -> impl IntoView {
    let (search_query, set_search_query) = signal(String::new());
    let total_tables = tables.len();
    let tables = StoredValue::new(tables);

    let visible_tables = Memo::new(move |_| {
        let query = search_query.get().to_lowercase();
        tables.with_value(|tables| {
            tables
                .iter()
                .filter(|t| query.is_empty() || t.name.to_lowercase().contains(&query))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2 class="sidebar-title">"Tables"</h2>
                <span class="sidebar-stats">
                    {move || format!("{} / {} placed", placed.with(|p| p.len()), total_tables)}
                </span>
            </div>

            <input
                class="sidebar-search"
                type="text"
                placeholder="Search tables..."
                prop:value=move || search_query.get()
                on:input=move |ev| set_search_query.set(event_target_value(&ev))
            />

            <ul class="sidebar-list">
                <For
                    each=move || visible_tables.get()
                    key=|table| table.id.clone()
                    children=move |table| {
                        let id = table.id.clone();
                        let is_placed = {
                            let id = id.clone();
                            Signal::derive(move || placed.with(|p| p.contains(&id)))
                        };
                        view! {
                            <li>
                                <button
                                    class="sidebar-item"
                                    class:placed=move || is_placed.get()
                                    title=format!("{} columns", table.columns.len())
                                    on:click=move |_| on_select.run(id.clone())
                                >
                                    <Icon name=icons::TABLE class="icon-sm"/>
                                    <span class="sidebar-item-name">{table.name.clone()}</span>
                                    <Show when=move || is_placed.get()>
                                        <Icon name=icons::CHECK class="icon-xs"/>
                                    </Show>
                                </button>
                            </li>
                        }
                    }
                />
            </ul>

            <label class="sidebar-option">
                <input
                    type="checkbox"
                    prop:checked=move || strict.get()
                    on:change=move |ev| on_strict_change.run(event_target_checked(&ev))
                />
                "Validate relationships"
            </label>
        </aside>
    }
}
