//! Line layout for the crate's own status output.
//!
//! A layout such as `"{timestamp} {level} {scope}  {msg}"` is parsed once into segments and
//! rendered for every status line. These are named fields, unrelated to the anonymous `{}`
//! placeholders of message templates.

/// Known field names; unknown `{names}` pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timestamp,
    Level,
    Scope,
    Msg,
}

impl Field {
    pub const ALL: &'static [Self] = &[Self::Timestamp, Self::Level, Self::Scope, Self::Msg];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Level => "level",
            Self::Scope => "scope",
            Self::Msg => "msg",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSegment {
    Literal(String),
    Field(Field),
}

/// Pre-parsed status line layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLayout {
    segments: Vec<LayoutSegment>,
}

impl StatusLayout {
    pub const DEFAULT: &'static str = "{timestamp} {level} {scope}  {msg}";

    #[must_use]
    pub fn parse(layout: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = layout;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            literal.push_str(&rest[..open]);
            let name = &rest[open + 1..close];
            match Field::from_name(name) {
                Some(field) => {
                    if !literal.is_empty() {
                        segments.push(LayoutSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(LayoutSegment::Field(field));
                }
                None => literal.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(LayoutSegment::Literal(literal));
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[LayoutSegment] {
        &self.segments
    }

    /// Whether the layout shows a timestamp, so callers can skip formatting one.
    #[must_use]
    pub fn uses(&self, field: Field) -> bool {
        self.segments
            .iter()
            .any(|segment| *segment == LayoutSegment::Field(field))
    }

    pub fn render_to(&self, buf: &mut String, values: &LayoutValues<'_>) {
        for segment in &self.segments {
            match segment {
                LayoutSegment::Literal(text) => buf.push_str(text),
                LayoutSegment::Field(field) => buf.push_str(values.get(*field)),
            }
        }
    }

    #[must_use]
    pub fn render(&self, values: &LayoutValues<'_>) -> String {
        let mut buf = String::new();
        self.render_to(&mut buf, values);
        buf
    }
}

impl Default for StatusLayout {
    fn default() -> Self {
        Self::parse(Self::DEFAULT)
    }
}

/// Borrowed field values for one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutValues<'a> {
    pub timestamp: &'a str,
    pub level: &'a str,
    pub scope: &'a str,
    pub msg: &'a str,
}

impl LayoutValues<'_> {
    const fn get(&self, field: Field) -> &str {
        match field {
            Field::Timestamp => self.timestamp,
            Field::Level => self.level,
            Field::Scope => self.scope,
            Field::Msg => self.msg,
        }
    }
}
