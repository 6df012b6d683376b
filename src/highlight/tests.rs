// src/highlight/tests.rs

//! Scanner behaviour against the two shipped grammar presets.

use crate::grammar::{alakon, host, Category, GrammarOptions};
use crate::highlight::{Highlighter, Span};

// --- Test Helpers ---

fn classic() -> Highlighter {
    Highlighter::new(&alakon(&GrammarOptions::classic())).expect("classic grammar compiles")
}

fn extended() -> Highlighter {
    Highlighter::new(&alakon(&GrammarOptions::extended())).expect("extended grammar compiles")
}

/// Categorized spans only, as (category, text) pairs.
fn classified<'a>(highlighter: &Highlighter, source: &'a str) -> Vec<(Category, &'a str)> {
    highlighter
        .highlight(source)
        .iter()
        .filter_map(|span| span.category.map(|c| (c, span.text(source))))
        .collect()
}

fn assert_covers(spans: &[Span], source: &str) {
    let mut expected_start = 0;
    for span in spans {
        assert_eq!(span.range.start, expected_start, "gap or overlap before {:?}", span);
        assert!(!span.range.is_empty(), "empty span {:?}", span);
        expected_start = span.range.end;
    }
    assert_eq!(expected_start, source.len(), "spans stop short of the input");
}

// --- Strings ---

#[test_log::test]
fn test_quoted_string_is_one_span() {
    let source = "\"hello\"";
    let spans = classic().highlight(source);
    assert_eq!(spans, vec![Span::new(Some(Category::String), 0..7)]);
}

#[test_log::test]
fn test_empty_and_spaced_strings() {
    for source in ["\"\"", "\"a b c 1 true\"", "\"émoji ✓\""] {
        let spans = classic().highlight(source);
        assert_eq!(spans.len(), 1, "{:?}", source);
        assert_eq!(spans[0].category, Some(Category::String));
        assert_eq!(spans[0].text(source), source);
    }
}

#[test_log::test]
fn test_string_contents_are_not_keywords() {
    assert_eq!(
        classified(&classic(), "\"true\" true"),
        vec![(Category::String, "\"true\""), (Category::Keyword, "true")]
    );
}

#[test_log::test]
fn test_unterminated_string_does_not_cross_newline() {
    let source = "\"unterminated\nmore text";
    let spans = classic().highlight(source);
    assert!(spans.iter().all(|s| s.category != Some(Category::String)));
    assert_eq!(spans, vec![Span::new(None, 0..source.len())]);
}

#[test_log::test]
fn test_newline_between_quotes_splits_strings() {
    let source = "\"a\n\"b\"";
    assert_eq!(classified(&classic(), source), vec![(Category::String, "\"b\"")]);
    for span in classic().highlight(source) {
        if span.category == Some(Category::String) {
            assert!(!span.text(source).contains('\n'));
        }
    }
}

#[test_log::test]
fn test_newline_after_closing_quote_is_not_illegal() {
    let source = "\"a\" \"b\" \"c\"\n\"d\"";
    assert_eq!(
        classified(&classic(), source),
        vec![
            (Category::String, "\"a\""),
            (Category::String, "\"b\""),
            (Category::String, "\"c\""),
            (Category::String, "\"d\""),
        ]
    );
}

#[test_log::test]
fn test_unterminated_at_end_of_input_is_plain() {
    let spans = classic().highlight("x = \"open");
    assert!(spans.iter().all(Span::is_plain));
}

// --- Numbers ---

#[test_log::test]
fn test_decimal_numbers_in_both_presets() {
    for highlighter in [classic(), extended()] {
        for source in ["0", "42", "42.5", "3.14159", "1000000"] {
            assert_eq!(
                highlighter.highlight(source),
                vec![Span::new(Some(Category::Number), 0..source.len())],
                "{:?}",
                source
            );
        }
    }
}

#[test_log::test]
fn test_base_mode_extras() {
    assert_eq!(classified(&classic(), "0x1F"), vec![(Category::Number, "0x1F")]);
    assert_eq!(classified(&classic(), "1e10"), vec![(Category::Number, "1e10")]);
    // The single-pattern form only knows plain decimals.
    assert!(classified(&extended(), "0x1F").is_empty());
}

#[test_log::test]
fn test_sign_belongs_to_base_mode_numbers() {
    assert_eq!(classified(&classic(), "x = -5"), vec![(Category::Number, "-5")]);
    assert_eq!(classified(&classic(), "-0x1F -.5"), vec![(Category::Number, "-0x1F"), (Category::Number, "-.5")]);
    // The single decimal pattern leaves the sign as plain text.
    assert_eq!(classified(&extended(), "x = -5"), vec![(Category::Number, "5")]);
}

#[test_log::test]
fn test_word_boundaries_are_ascii_only() {
    for highlighter in [classic(), extended()] {
        let source = "é5 ñ12.5";
        assert_eq!(
            classified(&highlighter, source),
            vec![(Category::Number, "5"), (Category::Number, "12.5")]
        );
        assert_covers(&highlighter.highlight(source), source);
    }
}

#[test_log::test]
fn test_digits_inside_identifiers_are_not_numbers() {
    for highlighter in [classic(), extended()] {
        assert!(classified(&highlighter, "x1 abc42").is_empty());
    }
}

// --- Keywords ---

#[test_log::test]
fn test_keywords_and_built_ins() {
    let h = classic();
    assert_eq!(classified(&h, "true"), vec![(Category::Keyword, "true")]);
    assert_eq!(classified(&h, "false"), vec![(Category::Keyword, "false")]);
    for word in ["String", "bool", "num"] {
        assert_eq!(classified(&h, word), vec![(Category::BuiltIn, word)]);
    }
}

#[test_log::test]
fn test_control_words_only_in_extended() {
    for word in ["if", "else", "while"] {
        assert!(classified(&classic(), word).is_empty());
        assert_eq!(classified(&extended(), word), vec![(Category::Keyword, word)]);
    }
}

#[test_log::test]
fn test_other_identifiers_stay_plain() {
    let h = extended();
    for word in ["fooBar", "truex", "numbers", "If", "Bool", "x"] {
        assert_eq!(h.highlight(word), vec![Span::new(None, 0..word.len())], "{:?}", word);
        assert_eq!(h.classify_word(word), None);
    }
}

#[test_log::test]
fn test_classify_word() {
    let h = extended();
    assert_eq!(h.classify_word("while"), Some(Category::Keyword));
    assert_eq!(h.classify_word("String"), Some(Category::BuiltIn));
    assert_eq!(h.classify_word("string"), None);
}

// --- Whole programs ---

#[test_log::test]
fn test_statement_mix() {
    let source = "num x = 42.5\nif x { String s = \"hi\" } else { bool b = false }";
    let h = extended();
    assert_eq!(
        classified(&h, source),
        vec![
            (Category::BuiltIn, "num"),
            (Category::Number, "42.5"),
            (Category::Keyword, "if"),
            (Category::BuiltIn, "String"),
            (Category::String, "\"hi\""),
            (Category::Keyword, "else"),
            (Category::BuiltIn, "bool"),
            (Category::Keyword, "false"),
        ]
    );
    assert_covers(&h.highlight(source), source);
}

#[test_log::test]
fn test_plain_spans_are_merged() {
    let spans = classic().highlight("a b c");
    assert_eq!(spans, vec![Span::new(None, 0..5)]);
}

#[test_log::test]
fn test_empty_input() {
    assert!(classic().highlight("").is_empty());
}

#[test_log::test]
fn test_coverage_with_multibyte_text() {
    let source = "ünïcode \"ßtr\" 12 → true\n\"broken\n✓ num";
    let spans = classic().highlight(source);
    assert_covers(&spans, source);
    assert_eq!(
        classified(&classic(), source),
        vec![
            (Category::String, "\"ßtr\""),
            (Category::Number, "12"),
            (Category::Keyword, "true"),
            (Category::BuiltIn, "num"),
        ]
    );
}

// --- Rule ordering and empty matches ---

#[test_log::test]
fn test_earlier_rule_wins_a_tie() {
    let keyword_first = host::from_host_str(
        r#"{ "name": "Tie", "contains": [
            { "className": "keyword", "match": "[0-9]+" },
            { "className": "number", "match": "[0-9]+\\.[0-9]+" }
        ] }"#,
    )
    .unwrap();
    let h = Highlighter::new(&keyword_first).unwrap();
    let source = "12.5";
    assert_eq!(
        classified(&h, source),
        vec![(Category::Keyword, "12"), (Category::Keyword, "5")]
    );
    assert_covers(&h.highlight(source), source);

    let number_first = host::from_host_str(
        r#"{ "name": "Tie", "contains": [
            { "className": "number", "match": "[0-9]+\\.[0-9]+" },
            { "className": "keyword", "match": "[0-9]+" }
        ] }"#,
    )
    .unwrap();
    let h = Highlighter::new(&number_first).unwrap();
    assert_eq!(classified(&h, source), vec![(Category::Number, "12.5")]);
}

#[test_log::test]
fn test_empty_matches_do_not_stall() {
    let grammar = host::from_host_str(
        r#"{ "name": "Star", "contains": [{ "className": "number", "match": "[0-9]*" }] }"#,
    )
    .unwrap();
    let h = Highlighter::new(&grammar).unwrap();
    for source in ["ab 12 c3", "é1 ✓", "no digits", ""] {
        let spans = h.highlight(source);
        assert_covers(&spans, source);
    }
    assert_eq!(
        classified(&h, "ab 12 c3"),
        vec![(Category::Number, "12"), (Category::Number, "3")]
    );
    assert_eq!(classified(&h, "é1 ✓"), vec![(Category::Number, "1")]);
}

// --- Compilation ---

#[test_log::test]
fn test_invalid_pattern_is_reported() {
    let grammar = host::from_host_str(
        r#"{ "name": "Bad", "contains": [{ "className": "number", "match": "[0-9" }] }"#,
    )
    .unwrap();
    let err = Highlighter::new(&grammar).unwrap_err();
    assert!(format!("{:#}", err).contains("[0-9"));
}

#[test_log::test]
fn test_imported_grammar_highlights_like_built_in() {
    let grammar = alakon(&GrammarOptions::extended());
    let imported = host::from_host_value(&host::export(&grammar)).unwrap();
    let source = "while true { num n = 7 }";
    let built_in = Highlighter::new(&grammar).unwrap();
    let reloaded = Highlighter::new(&imported).unwrap();
    assert_eq!(built_in.highlight(source), reloaded.highlight(source));
    assert_eq!(reloaded.name(), "Alakon");
}
