use super::parameterized::{ParameterizedMessage, stringified};
use super::{Message, bind};
use crate::arg::{Arg, ErrorArg};
use crate::fmt::{self, Placeholders};
use crate::pool;
use std::borrow::Cow;
use std::cell::{Cell, OnceCell};

/// Argument slots a holder keeps inline; `set` with more arguments holds the caller's vector.
pub const MAX_PARAMS: usize = 10;

/// Mutable message holder that is populated, rendered and cleared over and over without
/// allocating once warm.
///
/// Not `Sync`: the render cache uses interior mutability. To hand the content to another
/// thread take a [`memento`](Self::memento) or [`detach`](Self::detach) it.
///
/// Lifecycle: idle, then reserved by [`set`](Self::set), then rendered on demand, then either
/// swapped out or cleared back to idle.
pub struct ReusableMessage {
    template: Cow<'static, str>,
    params: Vec<Arg>,
    /// Caller-owned arguments held as given when there are more than `MAX_PARAMS`.
    varargs: Option<Vec<Arg>>,
    placeholders: Placeholders,
    used_count: usize,
    error: Option<ErrorArg>,
    rendered: OnceCell<String>,
    /// Cleared buffer from the previous render, reused by the next one.
    spare: Cell<String>,
    reserved: bool,
    initial_buffer_size: usize,
    max_buffer_size: usize,
}

impl Default for ReusableMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl ReusableMessage {
    #[must_use]
    pub fn new() -> Self {
        let settings = pool::settings();
        Self {
            params: Vec::with_capacity(MAX_PARAMS),
            initial_buffer_size: settings.initial_buffer_size,
            max_buffer_size: settings.max_reusable_message_size,
            ..Self::vacant()
        }
    }

    /// Holder without any allocation, used to fill a pool slot while the real one is out.
    pub(crate) const fn vacant() -> Self {
        Self {
            template: Cow::Borrowed(""),
            params: Vec::new(),
            varargs: None,
            placeholders: Placeholders::new(),
            used_count: 0,
            error: None,
            rendered: OnceCell::new(),
            spare: Cell::new(String::new()),
            reserved: false,
            initial_buffer_size: 0,
            max_buffer_size: 0,
        }
    }

    /// Populates the holder from a fixed-size argument array.
    ///
    /// Up to [`MAX_PARAMS`] arguments go into the inline slots; a larger array is moved into
    /// an owned vector instead.
    pub fn set<const N: usize>(
        &mut self,
        template: impl Into<Cow<'static, str>>,
        args: [Arg; N],
    ) -> &mut Self {
        if N > MAX_PARAMS {
            return self.set_vec(template, Vec::from(args));
        }
        self.begin(template.into());
        self.params.extend(args);
        self.finish()
    }

    /// Populates the holder by cloning `args` into the inline slots.
    pub fn set_slice(&mut self, template: impl Into<Cow<'static, str>>, args: &[Arg]) -> &mut Self {
        self.begin(template.into());
        self.params.extend_from_slice(args);
        self.finish()
    }

    /// Populates the holder with a caller-owned vector, held as is. It is never mutated or
    /// returned by [`swap_parameters`](Self::swap_parameters).
    pub fn set_vec(&mut self, template: impl Into<Cow<'static, str>>, args: Vec<Arg>) -> &mut Self {
        self.begin(template.into());
        self.varargs = Some(args);
        self.finish()
    }

    fn begin(&mut self, template: Cow<'static, str>) {
        self.recycle_buffer();
        self.params.clear();
        if self.params.capacity() < MAX_PARAMS {
            self.params.reserve(MAX_PARAMS);
        }
        self.varargs = None;
        self.template = template;
    }

    fn finish(&mut self) -> &mut Self {
        let args = self.varargs.as_deref().unwrap_or(&self.params);
        let (used_count, error) = bind(&mut self.placeholders, &self.template, args);
        self.used_count = used_count;
        self.error = error;
        self.reserved = true;
        self
    }

    /// Moves the last rendered text into `spare`, shrinking it if it grew past the limit.
    fn recycle_buffer(&mut self) {
        if let Some(mut buf) = self.rendered.take() {
            buf.clear();
            if buf.capacity() > self.max_buffer_size {
                buf.shrink_to(self.max_buffer_size);
            }
            self.spare.set(buf);
        }
    }

    fn render_into(&self, buf: &mut String) {
        fmt::render_to(
            buf,
            &self.template,
            self.parameters(),
            self.used_count,
            self.placeholders.indices(),
        );
    }

    #[must_use]
    pub const fn used_count(&self) -> usize {
        self.used_count
    }

    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        self.reserved
    }

    pub(crate) const fn reserve(&mut self) {
        self.reserved = true;
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    /// Visits each argument with its index without exposing the buffer.
    pub fn for_each_parameter<F: FnMut(&Arg, usize)>(&self, mut visit: F) {
        for (i, arg) in self.parameters().iter().enumerate() {
            visit(arg, i);
        }
    }

    /// Exchanges the live argument buffer for `replacement` and returns the arguments.
    ///
    /// The text is rendered first so it stays available afterwards. The returned vector
    /// always has room for at least [`MAX_PARAMS`] arguments. A caller-owned vector from
    /// [`set_vec`](Self::set_vec) stays in place; its arguments are cloned into
    /// `replacement` instead.
    ///
    /// When the inline arguments are swapped out, [`used_count`](Self::used_count) drops to
    /// zero along with [`parameters`](Message::parameters); the cached text and the error are
    /// kept.
    pub fn swap_parameters(&mut self, mut replacement: Vec<Arg>) -> Vec<Arg> {
        let _ = self.formatted_message();
        replacement.clear();
        match &self.varargs {
            Some(varargs) => {
                replacement.reserve(varargs.len().max(MAX_PARAMS));
                replacement.extend_from_slice(varargs);
                replacement
            }
            None => {
                if replacement.capacity() < MAX_PARAMS {
                    replacement.reserve(MAX_PARAMS);
                }
                self.used_count = 0;
                std::mem::replace(&mut self.params, replacement)
            }
        }
    }

    /// Renders, swaps the arguments out, and returns a thread-safe message that carries both
    /// the arguments and the pre-rendered text.
    pub fn detach(&mut self, replacement: Vec<Arg>) -> ParameterizedMessage {
        let text = self.formatted_message().to_owned();
        let used_count = self.used_count;
        let params = self.swap_parameters(replacement);
        ParameterizedMessage::from_parts(
            self.template.clone(),
            params,
            self.placeholders,
            used_count,
            self.error.clone(),
            Some(text),
        )
    }

    /// Immutable snapshot that can be retained or sent to another thread.
    #[must_use]
    pub fn memento(&self) -> ParameterizedMessage {
        ParameterizedMessage::from_parts(
            self.template.clone(),
            self.parameters().to_vec(),
            self.placeholders,
            self.used_count,
            self.error.clone(),
            self.rendered.get().cloned(),
        )
    }

    /// Drops template, arguments and error, keeping the buffers for the next `set`.
    pub fn clear(&mut self) {
        self.recycle_buffer();
        self.template = Cow::Borrowed("");
        self.params.clear();
        self.varargs = None;
        self.placeholders.clear();
        self.used_count = 0;
        self.error = None;
        self.reserved = false;
    }
}

impl Message for ReusableMessage {
    fn formatted_message(&self) -> &str {
        self.rendered.get_or_init(|| {
            let mut buf = self.spare.take();
            if buf.capacity() == 0 {
                buf.reserve(self.initial_buffer_size.max(self.template.len()));
            }
            self.render_into(&mut buf);
            buf
        })
    }

    fn template(&self) -> &str {
        &self.template
    }

    fn parameters(&self) -> &[Arg] {
        self.varargs.as_deref().unwrap_or(&self.params)
    }

    fn error(&self) -> Option<&ErrorArg> {
        self.error.as_ref()
    }

    /// Writes straight into `buf` unless the text is already cached.
    fn format_to(&self, buf: &mut String) {
        match self.rendered.get() {
            Some(text) => buf.push_str(text),
            None => self.render_into(buf),
        }
    }
}

impl std::fmt::Debug for ReusableMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReusableMessage")
            .field("template", &self.template)
            .field("parameters", &stringified(self.parameters()))
            .field("used_count", &self.used_count)
            .field("error", &self.error.as_ref().map(ToString::to_string))
            .field("reserved", &self.reserved)
            .finish_non_exhaustive()
    }
}
