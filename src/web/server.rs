use std::sync::Arc;

use anyhow::Result;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::ChatService;
use crate::web::routes;

pub async fn run_server(service: Arc<ChatService>, host: &str, port: u16) -> Result<()> {
    // Create the router with all routes
    let app = routes::create_routes(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Bind to the address
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Print startup message
    println!("💬 RecallChat service running at http://{addr}");
    println!("🏥 Health check: http://{addr}/health");
    println!();
    println!("Press Ctrl+C to stop the server");

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
