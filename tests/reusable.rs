//! Tests for the reusable message holder.

use parafmt::{Arg, ErrorArg, Formattable, MAX_PARAMS, Message, ReusableMessage, args};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn timeout() -> ErrorArg {
    Arc::new(std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout"))
}

struct Counted(Arc<AtomicUsize>);

impl Formattable for Counted {
    fn format_to(&self, buf: &mut String) {
        self.0.fetch_add(1, Ordering::SeqCst);
        buf.push_str("counted");
    }
}

#[test]
fn set_render_clear_cycles_are_independent() {
    let mut holder = ReusableMessage::new();
    for i in 0..50 {
        holder.set("iteration {} of {}", args![i, 50]);
        assert_eq!(holder.formatted_message(), format!("iteration {i} of 50"));
        assert_eq!(holder.used_count(), 2);
        holder.clear();
        assert!(holder.template().is_empty());
        assert_eq!(holder.parameter_count(), 0);
    }
}

#[test]
fn reset_invalidates_rendered_text() {
    let mut holder = ReusableMessage::new();
    holder.set("first {}", args![1]);
    assert_eq!(holder.formatted_message(), "first 1");
    holder.set("second {}", args![2]);
    assert_eq!(holder.formatted_message(), "second 2");
}

#[test]
fn rendering_twice_does_the_work_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut holder = ReusableMessage::new();
    holder.set("{}", [Arg::formattable(Counted(Arc::clone(&calls)))]);
    assert_eq!(holder.formatted_message(), "counted");
    assert_eq!(holder.formatted_message(), "counted");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn reserved_flag_follows_lifecycle() {
    let mut holder = ReusableMessage::new();
    assert!(!holder.is_reserved());
    holder.set("x", args![]);
    assert!(holder.is_reserved());
    holder.clear();
    assert!(!holder.is_reserved());
}

#[test]
fn trailing_error_is_extracted() {
    let mut holder = ReusableMessage::new();
    holder.set("Retry {} of {}", args![3, 5, timeout()]);
    assert_eq!(holder.formatted_message(), "Retry 3 of 5");
    assert_eq!(holder.used_count(), 2);
    assert_eq!(holder.error().unwrap().to_string(), "timeout");
    assert_eq!(holder.parameter_count(), 3);

    holder.set("{}", args![1]);
    assert!(holder.error().is_none());
}

#[test]
fn more_than_max_params_are_held_as_given() {
    let args: Vec<Arg> = (0..12).map(Arg::from).collect();
    let template = vec!["{}"; 12].join(" ");
    let mut holder = ReusableMessage::new();
    holder.set_vec(template, args);
    assert_eq!(holder.parameter_count(), 12);
    assert_eq!(holder.formatted_message(), "0 1 2 3 4 5 6 7 8 9 10 11");
}

#[test]
fn fixed_array_larger_than_inline_slots() {
    let mut holder = ReusableMessage::new();
    holder.set(
        "{}{}{}{}{}{}{}{}{}{}{}",
        args![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
    );
    assert_eq!(holder.formatted_message(), "012345678910");
}

#[test]
fn set_slice_clones_arguments() {
    let args = args!["a", "b"];
    let mut holder = ReusableMessage::new();
    holder.set_slice("{}{}", &args);
    assert_eq!(holder.formatted_message(), "ab");
    assert_eq!(args[0].as_str(), Some("a"));
}

#[test]
fn for_each_parameter_visits_in_order() {
    let mut holder = ReusableMessage::new();
    holder.set("{} {} {}", args!["x", "y", "z"]);
    let mut seen = Vec::new();
    holder.for_each_parameter(|arg, i| seen.push((i, arg.as_str().unwrap().to_owned())));
    assert_eq!(
        seen,
        vec![(0, "x".into()), (1, "y".into()), (2, "z".into())]
    );
}

#[test]
fn swap_returns_live_arguments_with_capacity() {
    let mut holder = ReusableMessage::new();
    holder.set("{} {}", args![1, 2]);
    let swapped = holder.swap_parameters(Vec::new());
    assert_eq!(swapped.len(), 2);
    assert!(swapped.capacity() >= MAX_PARAMS);
    assert_eq!(holder.formatted_message(), "1 2");

    holder.clear();
    holder.set("{}", args![3]);
    assert_eq!(holder.formatted_message(), "3");
    let again = holder.swap_parameters(Vec::with_capacity(1));
    assert!(again.capacity() >= MAX_PARAMS);
}

#[test]
fn swap_leaves_text_and_error_but_no_arguments() {
    let mut holder = ReusableMessage::new();
    holder.set("Retry {} of {}", args![3, 5, timeout()]);
    let _ = holder.swap_parameters(Vec::new());

    assert_eq!(holder.used_count(), 0);
    assert_eq!(holder.parameter_count(), 0);
    assert!(holder.error().is_some());

    let memento = holder.memento();
    assert_eq!(memento.formatted_message(), "Retry 3 of 5");
    assert_eq!(memento.used_count(), 0);
    assert!(memento.parameters().is_empty());
}

#[test]
fn detach_keeps_the_used_count() {
    let mut holder = ReusableMessage::new();
    holder.set("{}-{}", args!["a", "b"]);
    let detached = holder.detach(Vec::new());
    assert_eq!(detached.used_count(), 2);
    assert_eq!(holder.used_count(), 0);
}

#[test]
fn swap_copies_caller_owned_vector() {
    let args: Vec<Arg> = (0..12).map(Arg::from).collect();
    let mut holder = ReusableMessage::new();
    holder.set_vec("{}", args);
    let copied = holder.swap_parameters(Vec::new());
    assert_eq!(copied.len(), 12);
    assert!(copied.capacity() >= MAX_PARAMS);
    assert_eq!(holder.parameter_count(), 12);
}

#[test]
fn detach_hands_off_text_and_arguments() {
    let mut holder = ReusableMessage::new();
    holder.set("Retry {} of {}", args![3, 5, timeout()]);
    let detached = holder.detach(Vec::new());
    holder.clear();

    let handle = std::thread::spawn(move || {
        (
            detached.formatted_message().to_owned(),
            detached.parameters().len(),
            detached.error().map(ToString::to_string),
        )
    });
    let (text, count, error) = handle.join().unwrap();
    assert_eq!(text, "Retry 3 of 5");
    assert_eq!(count, 3);
    assert_eq!(error.as_deref(), Some("timeout"));
}

#[test]
fn detached_buffer_can_be_given_back() {
    let mut holder = ReusableMessage::new();
    holder.set("{}", args![1]);
    let detached = holder.detach(Vec::new());
    let buffer = detached.into_parameters();

    holder.clear();
    holder.set("{}", args![2]);
    let previous = holder.swap_parameters(buffer);
    assert_eq!(previous.len(), 1);
    assert_eq!(holder.parameter_count(), 0);
}

#[test]
fn memento_snapshot_is_independent() {
    let mut holder = ReusableMessage::new();
    holder.set("{} and {}", args!["a", "b"]);
    let memento = holder.memento();
    holder.clear();
    holder.set("{}", args!["other"]);

    assert_eq!(memento.formatted_message(), "a and b");
    assert_eq!(memento.template(), "{} and {}");
    assert_eq!(memento.parameters().len(), 2);
    assert_eq!(holder.formatted_message(), "other");
}

#[test]
fn format_to_writes_into_caller_buffer() {
    let mut holder = ReusableMessage::new();
    holder.set("{}={}", args!["k", "v"]);
    let mut buf = String::from("[");
    holder.format_to(&mut buf);
    buf.push(']');
    assert_eq!(buf, "[k=v]");
}

#[test]
fn large_render_does_not_leak_into_next_message() {
    let mut holder = ReusableMessage::new();
    let big = "x".repeat(4096);
    holder.set("{}", [Arg::from(big.clone())]);
    assert_eq!(holder.formatted_message().len(), 4096);
    holder.clear();
    holder.set("small {}", args![1]);
    assert_eq!(holder.formatted_message(), "small 1");
}

#[test]
fn debug_lists_stringified_arguments() {
    let mut holder = ReusableMessage::new();
    holder.set("{}", [Arg::list([1, 2])]);
    let debug = format!("{holder:?}");
    assert!(debug.contains("\"[1, 2]\""), "{debug}");
    assert!(debug.contains("reserved: true"), "{debug}");
}
