use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};

use crate::core::{Catalog, DiagramConfig};
use crate::ui::SchemaCanvas;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Diagram settings the server provided for this render, or the defaults
pub fn session_config() -> DiagramConfig {
    use_context::<DiagramConfig>().unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Resolved on the server, serialized for hydration
    let config = SharedValue::new(session_config).into_inner();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/schemasketch.css"/>

        <Title text="SchemaSketch - Schema Diagram Editor"/>

        <SchemaCanvas catalog=Catalog::demo() config=config />
    }
}
