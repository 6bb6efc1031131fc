//! Factories let a front end pick the message strategy once and build every message the same
//! way afterwards.

use super::{Message, ObjectMessage, ParameterizedMessage, RenderedMessage, SimpleMessage};
use crate::arg::Arg;
use crate::pool::{self, PooledMessage};
use std::borrow::Cow;

pub trait MessageFactory {
    type Output: Message;

    fn new_message<const N: usize>(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: [Arg; N],
    ) -> Self::Output;

    /// For argument lists whose length is only known at run time.
    fn new_message_vec(&self, template: impl Into<Cow<'static, str>>, args: Vec<Arg>)
    -> Self::Output;

    /// A single value logged on its own. Every strategy hands out an owned message here;
    /// the value is stringified on first use.
    fn new_object_message(&self, value: impl Into<Arg>) -> ObjectMessage {
        ObjectMessage::new(value)
    }

    /// Plain text with no placeholders processed.
    fn new_simple_message(&self, text: impl Into<Cow<'static, str>>) -> SimpleMessage {
        SimpleMessage::new(text)
    }
}

/// Immutable, thread-safe messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterizedMessageFactory;

impl MessageFactory for ParameterizedMessageFactory {
    type Output = ParameterizedMessage;

    fn new_message<const N: usize>(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: [Arg; N],
    ) -> ParameterizedMessage {
        ParameterizedMessage::new(template, args)
    }

    fn new_message_vec(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: Vec<Arg>,
    ) -> ParameterizedMessage {
        ParameterizedMessage::new(template, args)
    }
}

/// Holders from the current thread's pool; the output must not outlive the call site's
/// thread and is returned to the pool when dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReusableMessageFactory;

impl MessageFactory for ReusableMessageFactory {
    type Output = PooledMessage;

    fn new_message<const N: usize>(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: [Arg; N],
    ) -> PooledMessage {
        pool::message(template, args)
    }

    fn new_message_vec(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: Vec<Arg>,
    ) -> PooledMessage {
        let mut pooled = pool::acquire();
        pooled.set_vec(template, args);
        pooled
    }
}

/// Formats immediately and keeps no reference to the arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferenceMessageFactory;

impl MessageFactory for NoReferenceMessageFactory {
    type Output = RenderedMessage;

    fn new_message<const N: usize>(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: [Arg; N],
    ) -> RenderedMessage {
        RenderedMessage::new(&template.into(), &args)
    }

    fn new_message_vec(
        &self,
        template: impl Into<Cow<'static, str>>,
        args: Vec<Arg>,
    ) -> RenderedMessage {
        RenderedMessage::new(&template.into(), &args)
    }
}
