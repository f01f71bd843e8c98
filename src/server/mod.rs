mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/parcels", get(handlers::list_parcels).post(handlers::create_parcel))
        .route("/parcels/import", post(handlers::import_parcels))
        .route("/parcels/stats/counts", get(handlers::parcel_counts))
        .route(
            "/parcels/{tracking}",
            get(handlers::get_parcel)
                .put(handlers::update_parcel)
                .delete(handlers::delete_parcel),
        )
        .route("/parcels/{tracking}/route", get(handlers::parcel_route))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, state: Arc<AppState>) {
    let app = build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  Parceltrack server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        });
}
