//! The status logger is process-wide, so every test here shares one capture buffer.

use parafmt::fmt::{Field, LayoutSegment, LayoutValues, StatusLayout};
use parafmt::{Arg, Describe, DescribeError, Level, Message, args, internal, pool};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture() -> &'static Capture {
    static CAPTURE: OnceLock<Capture> = OnceLock::new();
    CAPTURE.get_or_init(|| {
        let capture = Capture::default();
        internal::init_with_writer(Level::Debug, capture.clone());
        capture
    })
}

struct Unavailable;

impl Describe for Unavailable {
    fn describe(&self, _: &mut String) -> Result<(), DescribeError> {
        Err(DescribeError::new("Unavailable", "backend offline"))
    }

    fn type_name(&self) -> &'static str {
        "Unavailable"
    }
}

#[test]
fn formats_lines_through_the_layout() {
    let capture = capture();
    internal::log_args(Level::Warn, "TEST", "disk {} at {}%", &args!["sda", 93]);
    let out = capture.contents();
    assert!(
        out.lines()
            .any(|line| line.ends_with("WARN  TEST  disk sda at 93%")),
        "{out}"
    );
}

#[test]
fn lines_below_threshold_are_dropped() {
    let capture = capture();
    assert!(!internal::enabled(Level::Trace, "QUIET"));
    internal::trace("QUIET", "should not appear");
    assert!(!capture.contents().contains("should not appear"));
    assert!(!internal::enabled(Level::Off, "QUIET"));
}

#[test]
fn unused_error_is_appended() {
    let capture = capture();
    internal::log_args(
        Level::Error,
        "TEST",
        "request {} failed",
        &[Arg::from(7), Arg::error(io::Error::other("reset by peer"))],
    );
    assert!(
        capture
            .contents()
            .contains("request 7 failed: reset by peer")
    );
}

#[test]
fn nested_pool_acquire_is_reported() {
    let capture = capture();
    let _outer = pool::acquire();
    let inner = pool::message("{}", args![1]);
    assert_eq!(inner.formatted_message(), "1");
    assert!(capture.contents().contains("DEBUG POOL"));
}

#[test]
fn describe_failures_are_reported() {
    let capture = capture();
    let msg = parafmt::ParameterizedMessage::new("{}", [Arg::describe(Unavailable)]);
    assert!(msg.formatted_message().contains("=>Unavailable:backend offline!!!]"));
    assert!(
        capture
            .contents()
            .contains("argument of type Unavailable failed to describe itself")
    );
}

#[test]
fn layout_parses_known_fields() {
    let layout = StatusLayout::parse("{level}|{unknown}|{msg}");
    assert_eq!(
        layout.segments(),
        &[
            LayoutSegment::Field(Field::Level),
            LayoutSegment::Literal("|{unknown}|".to_string()),
            LayoutSegment::Field(Field::Msg),
        ]
    );
    assert!(!layout.uses(Field::Timestamp));

    let line = layout.render(&LayoutValues {
        level: "INFO ",
        msg: "hello",
        ..LayoutValues::default()
    });
    assert_eq!(line, "INFO |{unknown}|hello");
}

#[test]
fn layout_keeps_unterminated_braces() {
    let layout = StatusLayout::parse("{scope} {msg");
    let line = layout.render(&LayoutValues {
        scope: "S",
        ..LayoutValues::default()
    });
    assert_eq!(line, "S {msg");
}

#[test]
fn default_layout_has_all_fields() {
    let layout = StatusLayout::default();
    for field in Field::ALL {
        assert!(layout.uses(*field));
    }
}
