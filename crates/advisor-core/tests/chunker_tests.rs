use advisor_core::chunker::split;
use advisor_core::Error;

#[test]
fn small_text_is_a_single_chunk() {
    let chunks = split("Short text", 1000, 200).expect("split");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Short text");
    assert_eq!(chunks[0].index, 0);
}

#[test]
fn rejects_zero_size() {
    match split("text", 0, 0) {
        Err(Error::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn rejects_overlap_not_smaller_than_size() {
    assert!(matches!(split("text", 10, 10), Err(Error::InvalidConfig(_))));
    assert!(matches!(split("text", 10, 20), Err(Error::InvalidConfig(_))));
}

#[test]
fn empty_text_yields_no_chunks() {
    let chunks = split("", 100, 10).expect("split");
    assert!(chunks.is_empty());
}

#[test]
fn chunk_lengths_and_indices() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(30);
    let chunks = split(&text, 80, 20).expect("split");
    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert!(
            chunk.text.chars().count() <= 80,
            "chunk {i} exceeds the size bound"
        );
    }
}

#[test]
fn consecutive_chunks_overlap_exactly() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(30);
    let overlap = 20;
    let chunks = split(&text, 80, overlap).expect("split");
    for pair in chunks.windows(2) {
        let prev: Vec<char> = pair[0].text.chars().collect();
        let tail: String = prev[prev.len() - overlap..].iter().collect();
        let head: String = pair[1].text.chars().take(overlap).collect();
        assert_eq!(tail, head, "chunk {} does not overlap its predecessor", pair[1].index);
    }
}

#[test]
fn deoverlapped_chunks_reconstruct_the_document() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(30);
    let overlap = 20;
    let chunks = split(&text, 80, overlap).expect("split");

    let mut rebuilt = chunks[0].text.clone();
    for chunk in &chunks[1..] {
        rebuilt.extend(chunk.text.chars().skip(overlap));
    }
    assert_eq!(rebuilt, text, "full coverage with no gaps");
}

#[test]
fn overlap_holds_when_the_only_boundary_sits_near_the_window_start() {
    // The sole paragraph/word boundaries fall inside the first `overlap`
    // characters of every window; taking them would make chunks degenerate
    // and the step smaller than the overlap. The hard cut must win instead.
    let text = format!("alpha beta\n\n{}", "x".repeat(200));
    let overlap = 60;
    let chunks = split(&text, 80, overlap).expect("split");
    assert!(chunks.len() > 2);
    for pair in chunks.windows(2) {
        let prev: Vec<char> = pair[0].text.chars().collect();
        assert!(prev.len() > overlap, "chunk {} is degenerate", pair[0].index);
        let tail: String = prev[prev.len() - overlap..].iter().collect();
        let head: String = pair[1].text.chars().take(overlap).collect();
        assert_eq!(
            tail, head,
            "chunk {} must start {overlap} chars before its predecessor's end",
            pair[1].index
        );
    }
}

#[test]
fn prefers_paragraph_boundaries() {
    let text = format!("{}\n\n{}", "alpha ".repeat(10).trim(), "bravo ".repeat(10).trim());
    let chunks = split(&text, 70, 10).expect("split");
    assert!(chunks.len() > 1);
    assert!(
        chunks[0].text.ends_with("\n\n"),
        "first chunk should break at the paragraph boundary: {:?}",
        chunks[0].text
    );
}

#[test]
fn multibyte_text_never_splits_inside_a_code_point() {
    let text = "héllo wörld. ".repeat(40);
    let chunks = split(&text, 50, 10).expect("split");
    assert!(chunks.len() > 1);
    let rebuilt: usize = chunks[0].text.chars().count()
        + chunks[1..]
            .iter()
            .map(|c| c.text.chars().count() - 10)
            .sum::<usize>();
    assert_eq!(rebuilt, text.chars().count());
}

#[test]
fn split_is_deterministic() {
    let text = "Course CS101 requires Math100. Course CS201 requires CS101. ".repeat(5);
    let a = split(&text, 60, 15).expect("split");
    let b = split(&text, 60, 15).expect("split");
    assert_eq!(a, b);
}
