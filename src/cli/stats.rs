use anyhow::Result;

use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::embedding::{EmbeddingConfig, ModelInfo};

/// Corpus statistics without initializing the embedding backend.
pub async fn handle_stats_command() -> Result<()> {
    let config = Config::load()?;
    let corpus_path = config.resolve_corpus_path()?;
    let store = CorpusStore::load(&corpus_path)?;

    let embedding_config = EmbeddingConfig::from_settings(&config.embedding)?;
    let info = ModelInfo::from(embedding_config.model);

    println!("Corpus: {}", corpus_path.display());
    println!("  Entries: {}", store.len());
    if let Some(entry) = store.safest_entry() {
        println!("  Fallback response: {}", entry.response);
    }
    println!();
    println!("Model: {} ({} dimensions)", info.name, info.dimensions);
    println!(
        "  Confidence threshold: {}",
        config.matcher.confidence_threshold
    );
    println!("  Teaching enabled: {}", config.matcher.teaching_enabled);
    println!("  Moderation enabled: {}", config.moderation.enabled);

    Ok(())
}
