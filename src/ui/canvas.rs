use crate::core::{
    Catalog, DiagramConfig, EditorEvent, EditorOutcome, Position, RelationshipPolicy, SchemaEditor,
};
use crate::ui::notifications::{NotificationManager, NotificationsContainer};
use crate::ui::pointer::{ListenerSlot, SignalCapture};
use crate::ui::sidebar::Sidebar;
use crate::ui::table::TableBlockView;
use leptos::prelude::*;
use leptos::{ev, html};

type Editor = SchemaEditor<SignalCapture>;

#[component]
pub fn SchemaCanvas(catalog: Catalog, #[prop(optional)] config: DiagramConfig) -> impl IntoView {
    let capture = SignalCapture::new();
    let live = capture.live();
    let dimensions = config.dimensions;
    let catalog_tables = catalog.tables().to_vec();
    let editor: RwSignal<Editor> = RwSignal::new(SchemaEditor::new(catalog, config, capture));
    let notifications = NotificationManager::new();

    let canvas_ref = NodeRef::<html::Div>::new();

    // Every user action goes through here
    let dispatch = Callback::new(move |event: EditorEvent| {
        let outcome = editor.update_untracked(|editor| editor.dispatch(event));
        match outcome {
            EditorOutcome::Changed => editor.notify(),
            EditorOutcome::Notify(notification) => notifications.notify(notification),
            EditorOutcome::Unchanged => {}
        }
    });

    let blocks = Memo::new(move |_| editor.with(|e| e.block_views()));
    let block_ids = Memo::new(move |_| {
        blocks.with(|b| b.iter().map(|v| v.id.clone()).collect::<Vec<_>>())
    });
    let lines = Memo::new(move |_| editor.with(|e| e.relationship_lines()));
    let strict = Memo::new(move |_| editor.with(|e| e.config().relationship_policy.is_strict()));

    // The canvas area decides where new tables go
    let measure_viewport = move || {
        if let Some(canvas) = canvas_ref.get_untracked() {
            dispatch.run(EditorEvent::ResizeViewport {
                width: canvas.client_width() as f64,
                height: canvas.client_height() as f64,
            });
        }
    };
    Effect::new(move || {
        if canvas_ref.get().is_some() {
            measure_viewport();
        }
    });
    let resize_handle = window_event_listener(ev::resize, move |_| measure_viewport());
    on_cleanup(move || resize_handle.remove());

    // Window-level pointer listeners, attached while a block holds the capture
    let pointer_listeners = ListenerSlot::<(WindowListenerHandle, WindowListenerHandle)>::new();
    Effect::new({
        let pointer_listeners = pointer_listeners.clone();
        move || {
            if live.get() == 0 {
                pointer_listeners.clear();
                return;
            }
            if pointer_listeners.is_attached() {
                return;
            }

            let on_move = window_event_listener(ev::mousemove, move |ev| {
                ev.prevent_default();
                dispatch.run(EditorEvent::PointerMove {
                    pointer: Position::new(ev.client_x() as f64, ev.client_y() as f64),
                });
            });
            let on_up = window_event_listener(ev::mouseup, move |_| {
                dispatch.run(EditorEvent::PointerUp);
            });
            pointer_listeners.replace(Some((on_move, on_up)));
        }
    });
    on_cleanup(move || pointer_listeners.clear());

    let placed = Signal::derive(move || block_ids.get());

    view! {
        <div class="editor">
            <Sidebar
                tables=catalog_tables
                placed=placed
                strict=strict
                on_select=move |id: String| dispatch.run(EditorEvent::SelectTable { id })
                on_strict_change=move |on: bool| {
                    let policy = if on {
                        RelationshipPolicy::Strict
                    } else {
                        RelationshipPolicy::Permissive
                    };
                    dispatch.run(EditorEvent::SetRelationshipPolicy(policy));
                }
            />

            <div node_ref=canvas_ref class="canvas">
                <div class="canvas-grid"></div>

                <Show when=move || block_ids.with(|ids| ids.is_empty())>
                    <div class="canvas-empty">"Pick a table from the sidebar to start"</div>
                </Show>

                <svg class="canvas-links">
                    <defs>
                        <marker
                            id="arrowhead"
                            markerWidth="10"
                            markerHeight="10"
                            refX="9"
                            refY="3"
                            orient="auto"
                        >
                            <polygon points="0 0, 10 3, 0 6" fill="#4B5563" />
                        </marker>
                    </defs>
                    {move || {
                        lines.get()
                            .into_iter()
                            .map(|line| {
                                let title = format!(
                                    "{}.{} → {}.{}",
                                    line.relationship.source_table_id,
                                    line.relationship.source_column,
                                    line.relationship.target_table_id,
                                    line.relationship.target_column
                                );
                                view! {
                                    <path
                                        class="canvas-link"
                                        d=line.svg_path()
                                        marker-end="url(#arrowhead)"
                                    >
                                        <title>{title}</title>
                                    </path>
                                }
                            })
                            .collect_view()
                    }}
                </svg>

                <For
                    each=move || block_ids.get()
                    key=|id| id.clone()
                    children=move |id| {
                        let Some(block) = blocks
                            .with_untracked(|b| b.iter().find(|v| v.id == id).cloned())
                        else {
                            return ().into_any();
                        };
                        let position = {
                            let id = id.clone();
                            Signal::derive(move || {
                                blocks.with(|b| {
                                    b.iter()
                                        .find(|v| v.id == id)
                                        .map(|v| v.position)
                                        .unwrap_or(block.position)
                                })
                            })
                        };
                        let dragging = {
                            let id = id.clone();
                            Signal::derive(move || {
                                blocks.with(|b| b.iter().any(|v| v.id == id && v.dragging))
                            })
                        };

                        view! {
                            <TableBlockView
                                id=block.id
                                name=block.name
                                columns=block.columns
                                position=position
                                dragging=dragging
                                dimensions=dimensions
                                on_event=dispatch
                            />
                        }
                        .into_any()
                    }
                />
            </div>

            <NotificationsContainer manager=notifications/>
        </div>
    }
}
