pub mod config;
pub mod discounts;
pub mod movies;
pub mod prices;
pub mod pricing;
pub mod reviews;

use std::path::Path;

use async_graphql::SDLExportOptions;
use async_graphql_axum::GraphQL;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post_service},
    Router,
};
use moviegraph_source::RestSource;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::SubgraphsConfig;

async fn health_check_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("shutdown signal received");
}

/// Serves the three subgraph listeners until ctrl-c. Reviews shares the
/// prices listener (both are deployed on 4002), mounted under `/reviews`.
pub async fn run(config: SubgraphsConfig) -> std::io::Result<()> {
    let source = RestSource::new(&config.source_url);

    let movies_app = Router::new()
        .route(
            "/",
            post_service(GraphQL::new(movies::build_schema(source.clone()))),
        )
        .route("/health", get(health_check_handler));

    let prices_app = Router::new()
        .route(
            "/",
            post_service(GraphQL::new(prices::build_schema(source.clone()))),
        )
        .route(
            "/reviews",
            post_service(GraphQL::new(reviews::build_schema(source.clone()))),
        )
        .route("/health", get(health_check_handler));

    let discounts_app = Router::new()
        .route(
            "/",
            post_service(GraphQL::new(discounts::build_schema(source.clone()))),
        )
        .route("/health", get(health_check_handler));

    let movies_listener =
        TcpListener::bind(format!("{}:{}", config.host, config.movies_port)).await?;
    info!(port = config.movies_port, "movies subgraph listening");

    let prices_listener =
        TcpListener::bind(format!("{}:{}", config.host, config.prices_port)).await?;
    info!(
        port = config.prices_port,
        "prices subgraph listening (reviews at /reviews)"
    );

    let discounts_listener =
        TcpListener::bind(format!("{}:{}", config.host, config.discounts_port)).await?;
    info!(port = config.discounts_port, "discounts subgraph listening");

    tokio::try_join!(
        axum::serve(movies_listener, movies_app).with_graceful_shutdown(shutdown_signal()),
        axum::serve(prices_listener, prices_app).with_graceful_shutdown(shutdown_signal()),
        axum::serve(discounts_listener, discounts_app).with_graceful_shutdown(shutdown_signal()),
    )?;

    Ok(())
}

/// Writes each subgraph's federation SDL into `out_dir`, for supergraph
/// composition (see `gateway/supergraph.yaml`).
pub fn export_sdl(config: &SubgraphsConfig, out_dir: &Path) -> std::io::Result<()> {
    let source = RestSource::new(&config.source_url);
    let federation = || SDLExportOptions::new().federation();

    let exports = [
        (
            "movies.graphql",
            movies::build_schema(source.clone()).sdl_with_options(federation()),
        ),
        (
            "prices.graphql",
            prices::build_schema(source.clone()).sdl_with_options(federation()),
        ),
        (
            "discounts.graphql",
            discounts::build_schema(source.clone()).sdl_with_options(federation()),
        ),
        (
            "reviews.graphql",
            reviews::build_schema(source).sdl_with_options(federation()),
        ),
    ];

    std::fs::create_dir_all(out_dir)?;
    for (file_name, sdl) in exports {
        let path = out_dir.join(file_name);
        std::fs::write(&path, sdl)?;
        info!(path = %path.display(), "exported subgraph SDL");
    }
    Ok(())
}
