//! Container arguments hold their items behind a lock so a container can be shared between
//! messages and even contain itself. Rendering only ever takes read locks.

use super::{Arg, DescribeError};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Rendering is identical for all kinds; the kind only names the container in markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    Array,
    List,
    Set,
}

impl SeqKind {
    /// Name used in identity strings such as `List@7f3a9c`.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::List => "List",
            Self::Set => "Set",
        }
    }
}

/// Sequence of arguments with interior mutability.
#[derive(Debug)]
pub struct SharedSeq {
    kind: SeqKind,
    items: RwLock<Vec<Arg>>,
}

impl SharedSeq {
    #[must_use]
    pub fn new(kind: SeqKind) -> Arc<Self> {
        Self::from_items(kind, Vec::new())
    }

    #[must_use]
    pub fn from_items(kind: SeqKind, items: Vec<Arg>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            items: RwLock::new(items),
        })
    }

    /// Appends an item. Pushing a clone of the container's own `Arc` creates a cycle.
    pub fn push(&self, item: impl Into<Arg>) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item.into());
    }

    #[must_use]
    pub const fn kind(&self) -> SeqKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Address used as the identity for cycle detection.
    #[must_use]
    pub fn identity(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }

    /// A poisoned lock means a writer panicked mid-update; the stringifier reports that
    /// inline instead of rendering a half-written container.
    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Arg>>, DescribeError> {
        self.items.read().map_err(|_| DescribeError::poisoned())
    }
}

/// Key/value entries kept in insertion order. Keys are not deduplicated.
#[derive(Debug)]
pub struct SharedMap {
    entries: RwLock<Vec<(Arg, Arg)>>,
}

impl SharedMap {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::from_entries(Vec::new())
    }

    #[must_use]
    pub fn from_entries(entries: Vec<(Arg, Arg)>) -> Arc<Self> {
        Arc::new(Self {
            entries: RwLock::new(entries),
        })
    }

    pub fn insert(&self, key: impl Into<Arg>, value: impl Into<Arg>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((key.into(), value.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn identity(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Vec<(Arg, Arg)>>, DescribeError> {
        self.entries.read().map_err(|_| DescribeError::poisoned())
    }
}
