//! Command handlers

use crate::api::serve_api;
use crate::cli::output::*;
use crate::rag::KnowledgeBase;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve(
    config: &mut AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) -> Result<()> {
    // Command line flags take priority over config
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if no_cors {
        config.server.enable_cors = false;
    }

    println!("🚀 Starting kbrag API Server");
    println!("============================\n");
    println!("📍 Host: {}", config.server.host);
    println!("🔌 Port: {}", config.server.port);
    println!(
        "🌐 CORS: {}",
        if config.server.enable_cors {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("🗄️  Sources: {}\n", config.sources_path().display());

    serve_api(config).await
}

pub async fn handle_ingest(config: &AppConfig, url: &str) -> Result<()> {
    let kb = KnowledgeBase::new(config).await?;
    print_info(&format!("Fetching {}", url.trim()));

    let count = kb.ingest(url).await?;
    print_success(&format!("Ingested. Knowledge base now holds {count} documents"));
    Ok(())
}

pub async fn handle_ask(config: &AppConfig, query: &[String]) -> Result<()> {
    let kb = KnowledgeBase::new(config).await?;
    let query = query.join(" ");

    println!("🤔 {query}\n");
    println!("{}", kb.answer(&query).await?);
    Ok(())
}

pub async fn handle_list(config: &AppConfig, limit: usize) -> Result<()> {
    let kb = KnowledgeBase::new(config).await?;
    let store = kb.store().await;

    if store.is_empty() {
        print_warning("Knowledge base is empty. Run `kbrag ingest <URL>` first.");
        return Ok(());
    }

    let shown = &store.documents()[..limit.min(store.len())];
    print_document_list(shown, store.len());
    Ok(())
}

pub async fn handle_stats(config: &AppConfig) -> Result<()> {
    let kb = KnowledgeBase::new(config).await?;
    print_stats(&kb.stats().await);
    Ok(())
}

pub fn handle_config(config: &AppConfig) -> Result<()> {
    print_config(config);
    Ok(())
}
