//! End-to-end pipeline tests over mock providers and the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ragline::{
    grounded_prompt, Chunk, Document, EmbeddingProvider, InMemoryVectorStore,
    MockEmbeddingProvider, MockGenerationProvider, RagConfig, RagError, RagPipeline,
    StoredChunkRecord, VectorStore, WordChunker,
};

const DIM: usize = 16;

fn pipeline(
    chunk_size: usize,
    store: Arc<dyn VectorStore>,
    embedder: Arc<MockEmbeddingProvider>,
) -> RagPipeline {
    RagPipeline::builder()
        .config(RagConfig::builder().chunk_size(chunk_size).build().unwrap())
        .embedding_provider(embedder)
        .vector_store(store)
        .chunker(Arc::new(WordChunker::new(chunk_size).unwrap()))
        .generation_provider(Arc::new(MockGenerationProvider::echo()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn three_word_document_ingests_as_one_record() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1000, store.clone(), Arc::new(MockEmbeddingProvider::new(DIM)));

    let stored = p.ingest(&Document::from_text("alpha beta gamma")).await.unwrap();
    assert_eq!(stored, 1);

    let hits = p.retrieve("alpha beta gamma", 5).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "alpha beta gamma");
}

#[tokio::test]
async fn page_newlines_are_normalized_to_spaces() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1000, store, Arc::new(MockEmbeddingProvider::new(DIM)));

    let doc = Document::from_pages(vec!["one\ntwo".to_string(), "three".to_string()]);
    p.ingest(&doc).await.unwrap();

    let hits = p.retrieve("one two three", 1).await.unwrap();
    assert_eq!(hits[0].text, "one two three");
}

#[tokio::test]
async fn failed_page_extraction_is_tolerated() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1000, store, Arc::new(MockEmbeddingProvider::new(DIM)));

    // An empty page (failed extraction upstream) does not fail ingestion
    let doc = Document::from_pages(vec![String::new(), "usable text here".to_string()]);
    assert_eq!(p.ingest(&doc).await.unwrap(), 1);
}

#[tokio::test]
async fn document_without_usable_text_is_malformed() {
    let embedder = Arc::new(MockEmbeddingProvider::new(DIM));
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1000, store, embedder.clone());

    let doc = Document::from_pages(vec![String::new(), "   ".to_string()]);
    let err = p.ingest(&doc).await.unwrap_err();
    assert!(matches!(err, RagError::MalformedDocument(_)));
    // Rejected before any provider call
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn answer_uses_exactly_k_contexts() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1, store.clone(), Arc::new(MockEmbeddingProvider::new(DIM)));

    // chunk_size 1 closes a chunk per word: five records
    let words = ["aardvark", "bobcat", "caracal", "dingo", "echidna"];
    let stored = p.ingest(&Document::from_text(words.join(" "))).await.unwrap();
    assert_eq!(stored, 5);

    // The echo provider returns the assembled prompt, so the contexts that
    // reached generation are visible in the answer.
    let answer = p.answer_question("What is X?", 3).await.unwrap();
    let used = words.iter().filter(|w| answer.contains(**w)).count();
    assert_eq!(used, 3);
    assert!(answer.contains("What is X?"));
}

#[tokio::test]
async fn answer_on_single_record_store_uses_one_context() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1000, store, Arc::new(MockEmbeddingProvider::new(DIM)));

    p.ingest(&Document::from_text("lone record")).await.unwrap();

    let answer = p.answer_question("What is X?", 3).await.unwrap();
    assert!(answer.contains("lone record"));
}

#[tokio::test]
async fn query_on_empty_store_still_generates() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let p = pipeline(1000, store, Arc::new(MockEmbeddingProvider::new(DIM)));

    // No contexts retrieved; the prompt still carries template + question
    let answer = p.answer_question("What is X?", 3).await.unwrap();
    assert!(answer.contains("What is X?"));
}

#[test]
fn grounded_prompt_preserves_context_and_question_order() {
    let contexts = vec!["first context passage".to_string(), "second context passage".to_string()];
    let prompt = grounded_prompt("What is X?", &contexts);

    let a = prompt.find("first context passage").unwrap();
    let b = prompt.find("second context passage").unwrap();
    let q = prompt.find("What is X?").unwrap();
    assert!(a < b);
    assert!(b < q);

    // Contexts are separated by a blank line
    assert!(prompt.contains("first context passage\n\nsecond context passage"));
}

#[test]
fn grounded_prompt_without_contexts_keeps_template_and_question() {
    let prompt = grounded_prompt("What is X?", &[]);
    assert!(prompt.contains("[Context]"));
    assert!(prompt.contains("What is X?"));
}

#[tokio::test]
async fn embed_batch_of_nothing_is_empty_and_free() {
    let embedder = MockEmbeddingProvider::new(DIM);
    let vectors = embedder.embed_batch(&[]).await.unwrap();
    assert!(vectors.is_empty());
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn embed_batch_preserves_input_order() {
    let embedder = MockEmbeddingProvider::new(DIM);
    let batch = embedder.embed_batch(&["one", "two"]).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], embedder.embed("one").await.unwrap());
    assert_eq!(batch[1], embedder.embed("two").await.unwrap());
}

/// A store that fails after a fixed number of writes, for exercising the
/// partial-ingestion accounting.
struct FlakyStore {
    inner: InMemoryVectorStore,
    writes: AtomicUsize,
    fail_after: usize,
}

impl FlakyStore {
    fn new(fail_after: usize) -> Self {
        Self { inner: InMemoryVectorStore::new(DIM), writes: AtomicUsize::new(0), fail_after }
    }
}

#[async_trait]
impl VectorStore for FlakyStore {
    async fn store(&self, chunk: &Chunk, embedding: &[f32]) -> ragline::Result<StoredChunkRecord> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.fail_after {
            return Err(RagError::StoreUnavailable("connection reset".to_string()));
        }
        self.inner.store(chunk, embedding).await
    }

    async fn nearest(&self, query: &[f32], k: usize) -> ragline::Result<ragline::RetrievalResult> {
        self.inner.nearest(query, k).await
    }
}

#[tokio::test]
async fn interrupted_ingestion_reports_stored_count() {
    let store = Arc::new(FlakyStore::new(2));
    let p = pipeline(1, store.clone(), Arc::new(MockEmbeddingProvider::new(DIM)));

    let err = p
        .ingest(&Document::from_text("aardvark bobcat caracal dingo echidna"))
        .await
        .unwrap_err();

    match err {
        RagError::IngestInterrupted { stored, source } => {
            assert_eq!(stored, 2);
            assert!(matches!(*source, RagError::StoreUnavailable(_)));
        }
        other => panic!("expected IngestInterrupted, got {other:?}"),
    }

    // The two records written before the failure remain stored
    let hits = store.nearest(&vec![0.0; DIM], 10).await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn builder_rejects_missing_fields() {
    let err = RagPipeline::builder()
        .config(RagConfig::default())
        .build()
        .unwrap_err();
    assert!(matches!(err, RagError::ConfigError(_)));
}
