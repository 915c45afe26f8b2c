use anyhow::Result;

use crate::config::Config;
use crate::services::ChatService;

pub async fn handle_ask_command(query: String) -> Result<()> {
    let config = Config::load()?;
    let service = ChatService::from_config(&config)?;

    let reply = service.submit_query(&query).await;

    match reply.response {
        Some(response) => {
            println!("{response}");
            if let Some(score) = reply.score {
                println!("  (confidence: {score:.3})");
            }
        }
        None => {
            println!("I don't know that one yet. Teach me with:");
            println!(
                "  recallchat teach \"{}\" \"<response>\"",
                query.trim().to_lowercase()
            );
        }
    }

    Ok(())
}
