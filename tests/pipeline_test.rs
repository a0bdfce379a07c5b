mod common;

use kbrag::config::AppConfig;
use kbrag::rag::KnowledgeBase;
use kbrag::KbRagError;
use kbrag::Result;

#[tokio::test]
async fn test_ingest_two_pages_and_pick_the_right_one() -> Result<()> {
    let pages = common::spawn_page_server().await;
    let (_dir, kb) = common::knowledge_base(false)?;

    let desert = format!("http://{pages}/desert");
    let gifting = format!("http://{pages}/gifting");
    assert_eq!(kb.ingest(&desert).await?, 1);
    assert_eq!(kb.ingest(&gifting).await?, 2);

    let answer = kb
        .answer("is gifting unconditional, do gifts expect anything in return")
        .await?;
    assert!(answer.starts_with("gifting gifting is unconditional and gifts are given"));
    assert!(answer.contains(&format!("source: <a href=\"{gifting}\"")));
    Ok(())
}

#[tokio::test]
async fn test_ingest_page_without_text() -> Result<()> {
    let pages = common::spawn_page_server().await;
    let (_dir, kb) = common::knowledge_base(false)?;

    match kb.ingest(&format!("http://{pages}/empty")).await {
        Err(KbRagError::InvalidInput(msg)) => assert_eq!(msg, "No text found at URL"),
        other => panic!("expected invalid input, got {other:?}"),
    }
    assert!(kb.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_documents_survive_restart() -> Result<()> {
    let pages = common::spawn_page_server().await;
    let dir = tempfile::tempdir()?;

    let mut config = AppConfig::default();
    config.storage.sources_path = dir.path().join("data").join("sources.json");
    config.fetch.offline_fallback = false;

    let url = format!("http://{pages}/desert");
    {
        let kb = KnowledgeBase::new(&config).await?;
        kb.ingest(&url).await?;
    }

    let kb = KnowledgeBase::new(&config).await?;
    let stats = kb.stats().await;
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.embedded_documents, 1);
    // The default provider reports the model it actually runs
    assert_eq!(stats.embedding_provider, "hashed");
    assert_eq!(stats.embedding_model, "hashed");
    assert_eq!(kb.store().await.get(&url).map(|d| d.url.clone()), Some(url));
    Ok(())
}

#[tokio::test]
async fn test_principles_list_needs_a_covering_page() -> Result<()> {
    let pages = common::spawn_page_server().await;
    let (_dir, kb) = common::knowledge_base(false)?;
    kb.ingest(&format!("http://{pages}/gifting")).await?;

    // No stored page lists the principles, so retrieval answers instead
    let answer = kb.answer("what are the 10 principles").await?;
    assert!(!answer.starts_with("the 10 principles of burning man"));
    assert!(answer.contains("source: "));
    Ok(())
}
