#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod api;
mod config;
mod error;
mod fetch;
mod parse;
mod report;

use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, on, post, MethodFilter},
    Extension, Router,
};

use crate::{
    api::{App, Query},
    config::Config,
};
use juniper::{EmptyMutation, EmptySubscription, RootNode};
use juniper_axum::{graphiql, graphql, playground};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::{compression::CompressionLayer, cors::Any};

type Schema = RootNode<'static, Query, EmptyMutation, EmptySubscription>;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env();
    log::info!("{config:?}");
    let addr = config.addr;
    let app = Arc::new(App::new(config));
    let schema = Schema::new(
        Query(Arc::clone(&app)),
        EmptyMutation::new(),
        EmptySubscription::new(),
    );
    let comression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true);
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    let router = Router::new()
        .route("/api/menu", post(api::menu))
        .route("/api/favorites", post(api::favorites))
        .route(
            "/graphql",
            on(
                MethodFilter::GET.or(MethodFilter::POST),
                graphql::<Arc<Schema>>,
            ),
        )
        .route("/graphiql", get(graphiql("/graphql", None::<&str>)))
        .route("/playground", get(playground("/graphql", None::<&str>)))
        .with_state(app)
        .layer(cors_layer)
        .layer(Extension(Arc::new(schema)))
        .layer(comression_layer);
    let listener = TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to listen on {addr}: {e}"));
    log::info!("listening on http://{addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
