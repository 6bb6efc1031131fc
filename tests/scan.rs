//! Tests for placeholder scanning.

use parafmt::fmt::{MAX_INDEXED_PLACEHOLDERS, Placeholders, count_placeholders, scan};

#[test]
fn records_offsets_of_unescaped_pairs() {
    let mut indices = [0; 8];
    let result = scan("User {} logged in from {}", &mut indices);
    assert_eq!(result.count, 2);
    assert!(result.indexed);
    assert_eq!(&indices[..2], &[5, 23]);
}

#[test]
fn escaped_placeholder_is_not_counted() {
    assert_eq!(count_placeholders("\\{}"), 0);
    assert_eq!(count_placeholders("\\\\{}"), 1);
    assert_eq!(count_placeholders("\\\\\\{}"), 0);
}

#[test]
fn escapes_disable_the_indexed_path() {
    let mut indices = [0; 4];
    let result = scan("a\\b {}", &mut indices);
    assert_eq!(result.count, 1);
    assert!(!result.indexed);
}

#[test]
fn lone_braces_are_literal() {
    assert_eq!(count_placeholders("{ } { }"), 0);
    assert_eq!(count_placeholders("}{"), 0);
    assert_eq!(count_placeholders("{"), 0);
    assert_eq!(count_placeholders("{{}"), 1);
    assert_eq!(count_placeholders("{}}"), 1);
    assert_eq!(count_placeholders("{}{}"), 2);
}

#[test]
fn empty_template() {
    let result = scan("", &mut [0; 4]);
    assert_eq!(result.count, 0);
    assert!(result.indexed);
}

#[test]
fn count_is_independent_of_buffer_size() {
    let template = "{} a {} b \\{} c \\\\{} {";
    let mut large = [0; 16];
    let mut small = [0; 1];
    assert_eq!(
        scan(template, &mut large).count,
        scan(template, &mut small).count
    );
    assert_eq!(scan(template, &mut []).count, count_placeholders(template));
}

#[test]
fn overflow_keeps_exact_count() {
    let template = "{} ".repeat(MAX_INDEXED_PLACEHOLDERS + 8);
    let mut placeholders = Placeholders::new();
    let result = placeholders.rescan(&template);
    assert_eq!(result.count, MAX_INDEXED_PLACEHOLDERS + 8);
    assert!(!result.indexed);
    assert!(placeholders.indices().is_none());
}

#[test]
fn offsets_are_char_boundaries_in_unicode_templates() {
    let template = "héllo {} wörld {}";
    let mut placeholders = Placeholders::new();
    placeholders.rescan(template);
    let indices = placeholders.indices().unwrap();
    assert_eq!(indices.len(), 2);
    for &at in indices {
        assert!(template.is_char_boundary(at));
        assert_eq!(&template[at..at + 2], "{}");
    }
}

#[test]
fn rescan_replaces_previous_offsets() {
    let mut placeholders = Placeholders::new();
    placeholders.rescan("{} {} {}");
    assert_eq!(placeholders.count(), 3);
    placeholders.rescan("x {}");
    assert_eq!(placeholders.count(), 1);
    assert_eq!(placeholders.indices(), Some(&[2][..]));
    placeholders.clear();
    assert_eq!(placeholders.count(), 0);
}
