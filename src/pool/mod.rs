//! Per-thread cache of reusable message holders.
//!
//! Each thread owns one slot. [`acquire`] checks the holder out of the slot and the returned
//! [`PooledMessage`] guard puts it back, cleared, when dropped. A second acquire while the
//! holder is out (a message argument that logs while being rendered, say) gets a fresh
//! holder instead, so the in-flight message is never overwritten.
//!
//! The guard is `!Send`. Crossing threads goes through [`PooledMessage::into_memento`] or
//! [`ReusableMessage::detach`].

use crate::arg::Arg;
use crate::config::EngineConfig;
use crate::internal;
use crate::level::Level;
use crate::message::{Message, ParameterizedMessage, ReusableMessage};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

static SETTINGS: OnceLock<EngineConfig> = OnceLock::new();
static DEFAULT_SETTINGS: EngineConfig = EngineConfig::new();

/// Installs the engine settings for this process. Only the first call takes effect; returns
/// whether it did. Holders created before the call keep the defaults.
pub fn configure(config: &EngineConfig) -> bool {
    let installed = SETTINGS.set(config.clone()).is_ok();
    if installed {
        internal::log_args(
            Level::Debug,
            "POOL",
            "Engine configured: pooling={}, initial buffer={}, max reusable={}",
            &crate::args![
                config.thread_local_pooling,
                config.initial_buffer_size,
                config.max_reusable_message_size
            ],
        );
    }
    installed
}

/// Settings in effect, the defaults until [`configure`] succeeds.
#[must_use]
pub fn settings() -> &'static EngineConfig {
    SETTINGS.get().unwrap_or(&DEFAULT_SETTINGS)
}

/// Counters for the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Every call to [`acquire`].
    pub acquired: u64,
    /// Acquisitions served by the thread's cached holder without allocating.
    pub reused: u64,
    /// Acquisitions made while the thread's holder was already checked out.
    pub nested: u64,
    /// Acquisitions that bypassed the pool (pooling disabled or thread shutting down).
    pub unpooled: u64,
}

enum Slot {
    /// No holder created on this thread yet.
    Empty,
    Idle(ReusableMessage),
    CheckedOut,
}

thread_local! {
    static SLOT: RefCell<Slot> = const { RefCell::new(Slot::Empty) };
    static STATS: Cell<PoolStats> = const {
        Cell::new(PoolStats { acquired: 0, reused: 0, nested: 0, unpooled: 0 })
    };
}

fn record(update: impl FnOnce(&mut PoolStats)) {
    let _ = STATS.try_with(|stats| {
        let mut current = stats.get();
        update(&mut current);
        stats.set(current);
    });
}

/// Counters for the current thread.
#[must_use]
pub fn stats() -> PoolStats {
    STATS.try_with(Cell::get).unwrap_or_default()
}

pub fn reset_stats() {
    let _ = STATS.try_with(|stats| stats.set(PoolStats::default()));
}

enum Checkout {
    Cached(ReusableMessage),
    First,
    Nested,
}

enum Home {
    /// Goes back into the thread's slot on drop.
    Slot,
    /// Dropped with the guard.
    Discard,
}

/// Checks out a holder for the current thread.
#[must_use]
pub fn acquire() -> PooledMessage {
    record(|s| s.acquired += 1);

    if !settings().thread_local_pooling {
        record(|s| s.unpooled += 1);
        return PooledMessage::new(ReusableMessage::new(), Home::Discard);
    }

    let checkout = SLOT.try_with(|slot| {
        let mut slot = slot.borrow_mut();
        match std::mem::replace(&mut *slot, Slot::CheckedOut) {
            Slot::Idle(message) => Checkout::Cached(message),
            Slot::Empty => Checkout::First,
            Slot::CheckedOut => Checkout::Nested,
        }
    });

    match checkout {
        Ok(Checkout::Cached(message)) => {
            record(|s| s.reused += 1);
            PooledMessage::new(message, Home::Slot)
        }
        Ok(Checkout::First) => PooledMessage::new(ReusableMessage::new(), Home::Slot),
        Ok(Checkout::Nested) => {
            record(|s| s.nested += 1);
            internal::debug("POOL", "Holder already checked out, using a fresh one");
            PooledMessage::new(ReusableMessage::new(), Home::Discard)
        }
        Err(_) => {
            record(|s| s.unpooled += 1);
            PooledMessage::new(ReusableMessage::new(), Home::Discard)
        }
    }
}

/// Acquires a holder and populates it in one call.
///
/// ```
/// use parafmt::{Message, args, pool};
///
/// let msg = pool::message("User {} logged in from {}", args!["alice", "10.0.0.1"]);
/// assert_eq!(msg.formatted_message(), "User alice logged in from 10.0.0.1");
/// ```
#[must_use]
pub fn message<const N: usize>(
    template: impl Into<Cow<'static, str>>,
    args: [Arg; N],
) -> PooledMessage {
    let mut pooled = acquire();
    pooled.set(template, args);
    pooled
}

/// Exclusive, thread-bound access to a checked-out holder.
pub struct PooledMessage {
    message: ReusableMessage,
    home: Home,
    _not_send: PhantomData<*const ()>,
}

impl PooledMessage {
    fn new(mut message: ReusableMessage, home: Home) -> Self {
        message.reserve();
        Self {
            message,
            home,
            _not_send: PhantomData,
        }
    }

    /// Whether the holder returns to the thread's slot on drop.
    #[must_use]
    pub const fn is_pooled(&self) -> bool {
        matches!(self.home, Home::Slot)
    }

    /// Returns the holder now; same as dropping the guard.
    pub fn release(self) {
        drop(self);
    }

    /// Snapshots the content and releases the holder.
    #[must_use]
    pub fn into_memento(self) -> ParameterizedMessage {
        self.message.memento()
    }
}

impl Drop for PooledMessage {
    fn drop(&mut self) {
        if !matches!(self.home, Home::Slot) {
            return;
        }
        let mut message = std::mem::replace(&mut self.message, ReusableMessage::vacant());
        message.clear();
        // During thread teardown the slot may already be gone; the holder is then dropped.
        let _ = SLOT.try_with(|slot| {
            if let Ok(mut slot) = slot.try_borrow_mut() {
                *slot = Slot::Idle(message);
            }
        });
    }
}

impl Deref for PooledMessage {
    type Target = ReusableMessage;

    fn deref(&self) -> &ReusableMessage {
        &self.message
    }
}

impl DerefMut for PooledMessage {
    fn deref_mut(&mut self) -> &mut ReusableMessage {
        &mut self.message
    }
}

impl Message for PooledMessage {
    fn formatted_message(&self) -> &str {
        self.message.formatted_message()
    }

    fn template(&self) -> &str {
        self.message.template()
    }

    fn parameters(&self) -> &[Arg] {
        self.message.parameters()
    }

    fn error(&self) -> Option<&crate::arg::ErrorArg> {
        self.message.error()
    }

    fn format_to(&self, buf: &mut String) {
        self.message.format_to(buf);
    }
}

impl std::fmt::Debug for PooledMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledMessage")
            .field("message", &self.message)
            .field("pooled", &self.is_pooled())
            .finish()
    }
}
