//! Property tests for in-memory vector store ordering and write rules.

use proptest::prelude::*;
use ragline::{Chunk, InMemoryVectorStore, RagError, VectorStore};

const DIM: usize = 16;

fn chunk(text: &str) -> Chunk {
    Chunk { text: text.to_string(), source_index: None }
}

/// Generate an embedding of the fixed test dimension.
fn arb_embedding() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-10.0f32..10.0f32, DIM)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Nearest-neighbor results are non-decreasing in distance to the
    /// query, and bounded by both `k` and the number of stored records.
    #[test]
    fn nearest_is_sorted_and_bounded(
        embeddings in proptest::collection::vec(arb_embedding(), 1..20),
        query in arb_embedding(),
        k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let hits = rt.block_on(async {
            let store = InMemoryVectorStore::new(DIM);
            for (i, embedding) in embeddings.iter().enumerate() {
                store.store(&chunk(&format!("chunk {i}")), embedding).await.unwrap();
            }
            store.nearest(&query, k).await.unwrap()
        });

        prop_assert!(hits.len() <= k);
        prop_assert!(hits.len() <= embeddings.len());

        for window in hits.windows(2) {
            prop_assert!(
                window[0].distance <= window[1].distance,
                "distances decrease: {} > {}",
                window[0].distance,
                window[1].distance,
            );
        }
    }

    /// A stored chunk is the unique nearest neighbor of its own embedding.
    #[test]
    fn stored_chunk_is_its_own_nearest_neighbor(
        embeddings in proptest::collection::vec(arb_embedding(), 1..10),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = InMemoryVectorStore::new(DIM);
            for (i, embedding) in embeddings.iter().enumerate() {
                store.store(&chunk(&format!("chunk {i}")), embedding).await.unwrap();
            }
            for (i, embedding) in embeddings.iter().enumerate() {
                // Duplicate embeddings tie at distance zero; the top hit
                // must still sit at distance zero.
                let hits = store.nearest(embedding, 1).await.unwrap();
                assert_eq!(hits.len(), 1);
                if embeddings.iter().filter(|e| *e == embedding).count() == 1 {
                    assert_eq!(hits[0].text, format!("chunk {i}"));
                }
                assert_eq!(hits[0].distance, 0.0);
            }
        });
    }
}

#[tokio::test]
async fn empty_store_returns_empty_result() {
    let store = InMemoryVectorStore::new(DIM);
    let hits = store.nearest(&vec![0.0; DIM], 5).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn k_larger_than_record_count_returns_all_records() {
    let store = InMemoryVectorStore::new(DIM);
    store.store(&chunk("only"), &vec![1.0; DIM]).await.unwrap();
    let hits = store.nearest(&vec![0.0; DIM], 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "only");
}

#[tokio::test]
async fn mismatched_dimension_write_is_rejected() {
    let store = InMemoryVectorStore::new(DIM);
    let err = store.store(&chunk("bad"), &vec![1.0; DIM + 1]).await.unwrap_err();
    assert!(matches!(err, RagError::StoreWriteError(_)));

    // Nothing was stored
    let hits = store.nearest(&vec![0.0; DIM], 5).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn distance_ties_keep_insertion_order() {
    let store = InMemoryVectorStore::new(DIM);
    let shared = vec![2.0; DIM];
    store.store(&chunk("first"), &shared).await.unwrap();
    store.store(&chunk("second"), &shared).await.unwrap();

    let hits = store.nearest(&shared, 2).await.unwrap();
    assert_eq!(hits[0].text, "first");
    assert_eq!(hits[1].text, "second");
}

#[tokio::test]
async fn records_are_appended_not_overwritten() {
    let store = InMemoryVectorStore::new(DIM);
    let a = store.store(&chunk("same text"), &vec![1.0; DIM]).await.unwrap();
    let b = store.store(&chunk("same text"), &vec![1.0; DIM]).await.unwrap();
    assert_ne!(a.id, b.id);

    let hits = store.nearest(&vec![1.0; DIM], 10).await.unwrap();
    assert_eq!(hits.len(), 2);
}
