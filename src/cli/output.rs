//! CLI output formatting utilities

use crate::models::Document;
use crate::models::StoreStats;
use crate::text::truncate_chars;
use crate::AppConfig;

/// Print a document list
pub fn print_document_list(documents: &[Document], total: usize) {
    println!("📋 Showing {} of {} documents:", documents.len(), total);
    for (i, doc) in documents.iter().enumerate() {
        println!(
            "  {}. {} | {} chars | embedded: {}",
            i + 1,
            truncate_chars(&doc.url, 80),
            doc.char_len(),
            if doc.has_embedding() { "yes" } else { "no" }
        );
    }
}

pub fn print_stats(stats: &StoreStats) {
    println!("📊 Knowledge Base Statistics");
    println!("============================");
    println!("  Documents:          {}", stats.documents);
    println!("  With embeddings:    {}", stats.embedded_documents);
    println!("  Retrieval method:   {}", stats.retrieval_method);
    println!("  Embedding provider: {}", stats.embedding_provider);
    println!("  Embedding model:    {}", stats.embedding_model);
}

/// Print configuration with secrets masked
pub fn print_config(config: &AppConfig) {
    println!("📋 kbrag Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Address: {}", config.bind_addr());
    println!("  CORS: {}", config.server.enable_cors);
    println!("  Static dir: {}", config.server.static_dir.display());
    println!();

    println!("🗄️  Storage:");
    println!("  Sources: {}", config.sources_path().display());
    println!();

    println!("🧠 Embeddings:");
    println!("  Provider: {}", config.embeddings.provider);
    println!("  Model: {}", config.embedding_model());
    println!("  Dimension: {}", config.embedding_dimension());
    println!("  Endpoint: {}", config.embeddings.endpoint);
    println!(
        "  API key: {}",
        config.masked_api_key().unwrap_or_else(|| "(not set)".to_string())
    );
    println!();

    println!("🔍 Retrieval:");
    println!("  Method: {}", config.retrieval.method);
    println!("  Top K: {}", config.retrieval.top_k);
    println!("  Related threshold: {}", config.retrieval.related_threshold);
    println!();

    println!("📥 Fetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Offline fallback: {}", config.fetch.offline_fallback);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  File output: {}", config.logging.file_output);
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
