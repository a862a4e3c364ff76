use crate::core::{BlockDimensions, EditorEvent, Position};
use crate::ui::{Icon, icons};
use leptos::prelude::*;
use leptos::web_sys;

/// A placed table drawn at its model position.
///
/// The header starts a block drag; every column row is both a drag source
/// and a drop target for linking. The block is sized to `dimensions` so its
/// drawn box matches the footprint placement reserves; extra columns scroll.
#[component]
pub fn TableBlockView(
    id: String,
    name: String,
    columns: Vec<String>,
    #[prop(into)] position: Signal<Position>,
    #[prop(into)] dragging: Signal<bool>,
    dimensions: BlockDimensions,
    #[prop(into)] on_event: Callback<EditorEvent>,
) -> impl IntoView {
    let header_id = id.clone();
    let remove_id = id.clone();

    view! {
        <div
            class="table-block"
            class:dragging=move || dragging.get()
            style:left=move || format!("{}px", position.get().x)
            style:top=move || format!("{}px", position.get().y)
            style:width=format!("{}px", dimensions.width)
            style:height=format!("{}px", dimensions.height)
            on:contextmenu=move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
            }
        >
            <div
                class="table-block-header"
                style:height=format!("{}px", dimensions.header_bar_height())
                on:mousedown=move |ev: web_sys::MouseEvent| {
                    if ev.button() != 0 {
                        return;
                    }
                    ev.prevent_default();
                    ev.stop_propagation();
                    on_event.run(EditorEvent::BlockPointerDown {
                        id: header_id.clone(),
                        pointer: Position::new(ev.client_x() as f64, ev.client_y() as f64),
                    });
                }
            >
                <span class="table-block-name">{name}</span>
                <button
                    class="table-block-remove"
                    title="Remove table"
                    on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:click=move |_| {
                        on_event.run(EditorEvent::RemoveTable { id: remove_id.clone() })
                    }
                >
                    <Icon name=icons::X class="icon-sm"/>
                </button>
            </div>

            <div class="table-block-columns">
                {columns.into_iter().map(|column| {
                    view! { <ColumnRow table_id=id.clone() column=column on_event=on_event /> }
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ColumnRow(table_id: String, column: String, on_event: Callback<EditorEvent>) -> impl IntoView {
    let (is_drop_target, set_is_drop_target) = signal(false);
    let label = column.clone();
    let source = (table_id.clone(), column.clone());
    let target = (table_id, column);

    view! {
        <div
            class="column-row"
            class:drop-target=move || is_drop_target.get()
            draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| {
                ev.stop_propagation();
                #[cfg(feature = "hydrate")]
                {
                    // Some browsers refuse to start a drag without data
                    if let Some(transfer) = ev.data_transfer() {
                        let payload = format!("{}.{}", source.0, source.1);
                        let _ = transfer.set_data("text/plain", &payload);
                    }
                }
                on_event.run(EditorEvent::ColumnDragStart {
                    table_id: source.0.clone(),
                    column: source.1.clone(),
                });
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                // Marks the row as a valid drop target
                ev.prevent_default();
                if !is_drop_target.get_untracked() {
                    set_is_drop_target.set(true);
                }
            }
            on:dragleave=move |_| set_is_drop_target.set(false)
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                set_is_drop_target.set(false);
                on_event.run(EditorEvent::ColumnDrop {
                    table_id: target.0.clone(),
                    column: target.1.clone(),
                });
            }
            on:dragend=move |_| on_event.run(EditorEvent::ColumnDragEnd)
        >
            <Icon name=icons::GRIP class="icon-xs column-handle"/>
            <span class="column-name">{label}</span>
        </div>
    }
}
