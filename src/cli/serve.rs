use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::services::ChatService;

pub async fn handle_serve_command(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("Loading corpus and embedding model...");
    let service = Arc::new(ChatService::from_config(&config)?);

    let stats = service.stats().await;
    println!("✓ Indexed {} entries with {}", stats.entries, stats.model);
    println!();

    crate::web::run_server(service, &host, port).await
}
