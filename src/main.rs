#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::logging::log;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use schemasketch::app::*;
    use schemasketch::core::DiagramConfig;
    use tower_http::compression::{CompressionLayer, CompressionLevel};
    use tower_http::services::ServeDir;

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Diagram settings from environment variables
    let config = DiagramConfig::from_env();
    tracing::info!(
        "Diagram config: viewport={}x{}, relationships={:?}",
        config.viewport.width,
        config.viewport.height,
        config.relationship_policy
    );

    // Load configuration from Cargo.toml [package.metadata.leptos]
    // Can be overridden via LEPTOS_SITE_ADDR env var
    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(err) => {
            tracing::error!("Invalid Leptos configuration: {}", err);
            std::process::exit(1);
        }
    };
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let routes = generate_route_list(App);

    // Serves .br and .gz variants of /pkg assets when present
    let pkg_service = ServeDir::new(format!("{}/pkg", leptos_options.site_root))
        .precompressed_br()
        .precompressed_gzip();

    let app = Router::new()
        .nest_service("/pkg", pkg_service)
        // Every render gets the diagram settings; the client reads them back
        // from the hydration payload
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_context(config),
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler_with_context(
            move || provide_context(config),
            shell,
        ))
        .with_state(leptos_options)
        .layer(
            CompressionLayer::new()
                .br(true)
                .gzip(true)
                .quality(CompressionLevel::Best),
        );

    log!("listening on http://{}", &addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };
    if let Err(err) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", err);
    }
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
