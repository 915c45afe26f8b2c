use anyhow::Result;

use crate::config::Config;
use crate::services::ChatService;

pub async fn handle_teach_command(query: String, response: String) -> Result<()> {
    let config = Config::load()?;
    let service = ChatService::from_config(&config)?;

    let before = service.corpus_len().await;
    let confirmation = service.teach(&query, &response).await;
    let after = service.corpus_len().await;

    if after > before {
        println!("✓ Learned: {}", confirmation.response);
        println!("  Corpus now holds {after} entries");
    } else {
        println!("Nothing stored. {}", confirmation.response);
    }

    Ok(())
}
