use advisor_core::types::Chunk;
use advisor_core::Error;
use advisor_embed::default_embedder;
use advisor_index::{cosine_similarity, Retriever, VectorIndex};

fn chunk(index: usize, text: &str) -> Chunk {
    Chunk { text: text.to_string(), index }
}

#[test]
fn build_rejects_zero_entries() {
    match VectorIndex::build(Vec::new()) {
        Err(Error::EmptyIndex) => {}
        other => panic!("expected EmptyIndex, got {other:?}"),
    }
}

#[test]
fn cosine_similarity_basics() {
    let a = vec![1.0, 0.0, 0.0];
    assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 1e-3);
    assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 1e-3);
    assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 1e-3);
    assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0, "mismatched dims score zero");
}

#[test]
fn self_retrieval_returns_own_chunk_first() {
    let vectors = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    let entries: Vec<(Chunk, Vec<f32>)> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| (chunk(i, &format!("chunk {i}")), v.clone()))
        .collect();
    let index = VectorIndex::build(entries).expect("build");

    for (i, v) in vectors.iter().enumerate() {
        let hits = index.search(v, 1);
        assert_eq!(hits[0].index, i, "vector {i} retrieves its own chunk first");
    }
}

#[test]
fn k_is_clamped_and_scores_sorted_descending() {
    let entries = vec![
        (chunk(0, "a"), vec![1.0, 0.0]),
        (chunk(1, "b"), vec![0.8, 0.2]),
        (chunk(2, "c"), vec![0.0, 1.0]),
    ];
    let index = VectorIndex::build(entries).expect("build");
    let query = vec![1.0, 0.0];

    let hits = index.search(&query, 10);
    assert_eq!(hits.len(), 3, "k clamped to index size");
    assert_eq!(hits[0].index, 0);
    assert_eq!(hits[1].index, 1);
    assert_eq!(hits[2].index, 2);

    let top2 = index.search(&query, 2);
    assert_eq!(top2.len(), 2);
}

#[test]
fn ties_break_by_ascending_chunk_index() {
    // Three identical vectors: ordering must follow the original chunk index.
    let entries = vec![
        (chunk(2, "third"), vec![1.0, 0.0]),
        (chunk(0, "first"), vec![1.0, 0.0]),
        (chunk(1, "second"), vec![1.0, 0.0]),
    ];
    let index = VectorIndex::build(entries).expect("build");
    let hits = index.search(&[1.0, 0.0], 3);
    let order: Vec<usize> = hits.iter().map(|c| c.index).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn retriever_is_deterministic() {
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    let embedder = default_embedder().expect("embedder");

    let texts = [
        "Course CS101 requires Math100.",
        "Course CS201 requires CS101.",
        "The library closes at midnight.",
    ];
    let chunks: Vec<Chunk> = texts.iter().enumerate().map(|(i, t)| chunk(i, t)).collect();
    let vectors = embedder
        .embed_batch(&texts.iter().map(|t| (*t).to_string()).collect::<Vec<_>>())
        .expect("embed");
    let index = VectorIndex::build(chunks.into_iter().zip(vectors).collect()).expect("build");
    let retriever = Retriever::new(embedder, index);

    // Querying with a chunk's own text must surface that chunk first.
    let first = retriever.retrieve("Course CS201 requires CS101.", 2).expect("retrieve");
    let second = retriever.retrieve("Course CS201 requires CS101.", 2).expect("retrieve");
    assert_eq!(first, second, "same query, same built index, same results");
    assert_eq!(first[0].index, 1, "exact-match chunk ranks first: {:?}", first[0].text);
}
