//! Capture keys.
//!
//! A [`Capture<T>`] names a slot a pattern fills on success. Identity is the
//! allocation behind the key: clones share it, two separately created
//! captures never do, whatever their descriptions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

struct CaptureInfo {
    description: Option<String>,
}

/// Untyped identity of a capture.
///
/// Used wherever captures of different value types sit side by side:
/// inside [`Captures`](crate::Captures) and in pattern introspection.
#[derive(Clone)]
pub struct CaptureKey {
    info: Arc<CaptureInfo>,
}

impl CaptureKey {
    fn new(description: Option<String>) -> Self {
        CaptureKey {
            info: Arc::new(CaptureInfo { description }),
        }
    }

    /// The description given at creation, if any.
    pub fn description(&self) -> Option<&str> {
        self.info.description.as_deref()
    }

    #[inline]
    fn addr(&self) -> usize {
        Arc::as_ptr(&self.info) as usize
    }
}

impl PartialEq for CaptureKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.info, &other.info)
    }
}

impl Eq for CaptureKey {}

impl Hash for CaptureKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Display for CaptureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => write!(f, "@{description}"),
            None => write!(f, "@{:x}", self.addr()),
        }
    }
}

impl fmt::Debug for CaptureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Typed capture key for values of type `T`.
pub struct Capture<T> {
    key: CaptureKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Capture<T> {
    /// Create an anonymous capture.
    pub fn new() -> Self {
        Capture {
            key: CaptureKey::new(None),
            _marker: PhantomData,
        }
    }

    /// Create a capture with a description shown in diagnostics.
    pub fn named(description: impl Into<String>) -> Self {
        Capture {
            key: CaptureKey::new(Some(description.into())),
            _marker: PhantomData,
        }
    }

    /// The untyped identity of this capture.
    #[inline]
    pub fn key(&self) -> &CaptureKey {
        &self.key
    }

    pub fn description(&self) -> Option<&str> {
        self.key.description()
    }
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: `T` is only a marker and needs no bounds.
impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Capture {
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Capture<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Capture<T> {}

impl<T> fmt::Debug for Capture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capture<{}>({})", std::any::type_name::<T>(), self.key)
    }
}
