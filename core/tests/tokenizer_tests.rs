use docserve_core::tokenizer::{analyze, tokenize_query};

#[test]
fn it_lowercases_document_terms() {
    let a = analyze("Running RUNNING running").unwrap();
    assert_eq!(a.term_count, 3);
    assert_eq!(a.term_frequency.len(), 1);
    assert!((a.term_frequency["running"] - 1.0).abs() < 1e-12);
}

#[test]
fn it_splits_on_single_spaces_only() {
    // punctuation stays attached; only bare "." and "," are dropped
    let a = analyze("fox, dog. , . café").unwrap();
    let mut terms: Vec<&str> = a.term_frequency.keys().map(String::as_str).collect();
    terms.sort_unstable();
    assert_eq!(terms, vec!["café", "dog.", "fox,"]);
}

#[test]
fn it_leaves_query_case_alone() {
    assert_eq!(tokenize_query("The  Quick , fox"), vec!["The", "Quick", "fox"]);
    assert!(tokenize_query(" . , ").is_empty());
}
