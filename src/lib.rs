#![forbid(unsafe_code)]

//! `parafmt` - parameterized message formatting for logging front ends.
//!
//! Turns a template with `{}` placeholders and a list of arguments into text while keeping
//! the hot path free of per-call allocation:
//! - a single-pass placeholder scanner with an escape-aware fallback
//! - recursive argument stringification with inline cycle and error markers
//! - immutable, thread-safe messages and reusable per-thread holders
//! - a status logger and TOML configuration for the engine itself
//!
//! # Example
//!
//! ```
//! use parafmt::{Message, ParameterizedMessage, args, pool};
//!
//! let msg = ParameterizedMessage::new("User {} logged in from {}", args!["alice", "10.0.0.1"]);
//! assert_eq!(msg.formatted_message(), "User alice logged in from 10.0.0.1");
//!
//! // Pooled holders are reused on the same thread and returned on drop.
//! let pooled = pool::message("Retry {} of {}", args![3, 5]);
//! assert_eq!(pooled.formatted_message(), "Retry 3 of 5");
//!
//! // Mementos are thread-safe snapshots.
//! let memento = pooled.memento();
//! std::thread::spawn(move || assert_eq!(memento.formatted_message(), "Retry 3 of 5"))
//!     .join()
//!     .unwrap();
//! ```

pub mod arg;
pub mod config;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod message;
pub mod pool;

pub use arg::{
    Arg, Describe, DescribeError, ErrorArg, Formattable, PrimitiveArray, SeqKind, SharedMap,
    SharedSeq,
};
pub use config::Config;
pub use error::Error;
pub use level::Level;
pub use message::{
    MAX_PARAMS, Message, MessageFactory, NoReferenceMessageFactory, ObjectMessage,
    ParameterizedMessage, ParameterizedMessageFactory, RenderedMessage, ReusableMessage,
    ReusableMessageFactory, SimpleMessage,
};
pub use pool::{PoolStats, PooledMessage};

/// Applies `config`: engine settings for the pool (first call per process wins) and the
/// status logger.
pub fn init(config: &Config) {
    internal::init_with_config(config);
    if !pool::configure(&config.engine) {
        internal::debug("POOL", "Engine already configured, keeping existing settings");
    }
}
