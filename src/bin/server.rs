use std::sync::Arc;

use darts::server::{create_router, shutdown_signal};
use darts::types::DartsContext;

#[tokio::main]
async fn main() {
    let port = darts::env_config::server_port();
    println!("Starting darts API server...");

    let ctx = Arc::new(DartsContext::new());
    println!("Checkout chart loaded: {} finishes", ctx.checkouts.len());

    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    println!("Server is running on port {}. Press Ctrl+C to stop.", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("\nStopping server...");
}
