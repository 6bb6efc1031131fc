//! Tests for template substitution.

use parafmt::fmt::{self, MAX_INDEXED_PLACEHOLDERS, Placeholders};
use parafmt::{Arg, args};

fn generic(template: &str, args: &[Arg]) -> String {
    let mut buf = String::new();
    let count = fmt::count_placeholders(template);
    fmt::render_to(&mut buf, template, args, count.min(args.len()), None);
    buf
}

#[test]
fn substitutes_in_order() {
    assert_eq!(
        fmt::format("User {} logged in from {}", &args!["alice", "10.0.0.1"]),
        "User alice logged in from 10.0.0.1"
    );
}

#[test]
fn escaped_placeholder_renders_braces_without_consuming() {
    assert_eq!(fmt::format("\\{}", &args![]), "{}");
    assert_eq!(fmt::format("\\{} {}", &args!["a"]), "{} a");
}

#[test]
fn escaped_escape_keeps_one_backslash_and_substitutes() {
    assert_eq!(fmt::format("\\\\{}", &args!["x"]), "\\x");
    assert_eq!(fmt::format("\\\\\\{}", &args!["x"]), "\\{}");
    assert_eq!(fmt::format("\\\\\\\\{}", &args!["x"]), "\\\\x");
}

#[test]
fn backslashes_before_other_characters_are_literal() {
    assert_eq!(fmt::format("C:\\temp {}", &args![1]), "C:\\temp 1");
    assert_eq!(fmt::format("a\\\\b", &args![]), "a\\\\b");
    assert_eq!(fmt::format("trailing\\", &args![]), "trailing\\");
}

#[test]
fn missing_arguments_leave_placeholders() {
    assert_eq!(fmt::format("{} and {}", &args![1]), "1 and {}");
    assert_eq!(fmt::format("{}", &args![]), "{}");
}

#[test]
fn extra_arguments_are_ignored() {
    assert_eq!(fmt::format("only {}", &args![1, 2, 3]), "only 1");
    assert_eq!(fmt::format("none", &args![1]), "none");
}

#[test]
fn lone_braces_pass_through() {
    assert_eq!(fmt::format("{ {} }", &args![1]), "{ 1 }");
    assert_eq!(fmt::format("{{}}", &args![1]), "{1}");
}

#[test]
fn indexed_and_generic_paths_agree() {
    let cases: &[(&str, &[Arg])] = &[
        ("{} of {}", &args![3, 5]),
        ("no placeholders", &args![1]),
        ("{}{}{}", &args!["a", "b"]),
        ("ünïcödé {} ✓ {}", &args!["x", 'y']),
        ("{ } {}", &args![true]),
    ];
    for (template, args) in cases {
        assert_eq!(fmt::format(template, args), generic(template, args), "{template}");
    }
}

#[test]
fn templates_past_the_index_capacity_are_fully_substituted() {
    let n = MAX_INDEXED_PLACEHOLDERS + 5;
    let template = vec!["{}"; n].join(",");
    let args: Vec<Arg> = (0..n).map(Arg::from).collect();
    let expected = (0..n).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
    assert_eq!(fmt::format(&template, &args), expected);
}

#[test]
fn used_count_caps_substitution() {
    let mut placeholders = Placeholders::new();
    placeholders.rescan("{} {} {}");
    let mut buf = String::from(">");
    fmt::render_to(
        &mut buf,
        "{} {} {}",
        &args![1, 2, 3],
        2,
        placeholders.indices(),
    );
    assert_eq!(buf, ">1 2 {}");
}

#[test]
fn used_count_is_clamped_to_argument_count() {
    let mut buf = String::new();
    fmt::render_to(&mut buf, "{} {}", &args![1], 5, Some(&[0, 3]));
    assert_eq!(buf, "1 {}");
}

#[test]
fn format_to_appends() {
    let mut buf = String::from("prefix: ");
    fmt::format_to(&mut buf, "{}!", &args!["done"]);
    assert_eq!(buf, "prefix: done!");
}
