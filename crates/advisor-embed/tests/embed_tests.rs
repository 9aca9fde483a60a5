use advisor_embed::{default_embedder, EMBEDDING_DIM};

#[test]
fn fake_embedder_shape_norm_and_determinism() {
    // Force the fake embedder to avoid loading model weights
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");

    let embedder = default_embedder().expect("embedder");
    assert_eq!(embedder.dim(), EMBEDDING_DIM);

    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    assert_eq!(embs.len(), 2, "one vector per input text");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), EMBEDDING_DIM);

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn fake_embedder_separates_unrelated_texts() {
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");

    let embedder = default_embedder().expect("embedder");
    let a = embedder.embed("CS201 prerequisites").expect("embed");
    let b = embedder.embed("CS201 prerequisites").expect("embed");
    let c = embedder.embed("campus parking rules").expect("embed");

    let dot = |x: &[f32], y: &[f32]| x.iter().zip(y).map(|(p, q)| p * q).sum::<f32>();
    assert!(dot(&a, &b) > 0.999, "identical text embeds identically");
    assert!(dot(&a, &c) < dot(&a, &b), "disjoint text scores lower");
}
