//! Target capability and weak target references.
//!
//! The core never owns an animated object. Hosts implement [`Animatable`] on
//! their own node type, keep it in an `Rc<RefCell<_>>`, and hand the core a
//! [`TargetRef`]. Every read or write goes through [`TargetRef::upgrade`],
//! which is also the liveness predicate.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::value::Value;

/// Host-implemented access to a visual object's animatable properties.
pub trait Animatable {
    /// False once the host object has been destroyed or detached.
    fn is_alive(&self) -> bool {
        true
    }

    fn read(&self, property: &str) -> Option<Value>;

    fn write(&mut self, property: &str, value: Value);
}

pub type SharedTarget = Rc<RefCell<dyn Animatable>>;

/// Weak back-reference to an animated object.
#[derive(Clone)]
pub struct TargetRef {
    inner: Option<Weak<RefCell<dyn Animatable>>>,
}

impl TargetRef {
    pub fn new<T: Animatable + 'static>(target: &Rc<RefCell<T>>) -> Self {
        let shared: SharedTarget = target.clone();
        Self {
            inner: Some(Rc::downgrade(&shared)),
        }
    }

    pub fn from_shared(target: &SharedTarget) -> Self {
        Self {
            inner: Some(Rc::downgrade(target)),
        }
    }

    /// A reference that is never valid.
    pub fn detached() -> Self {
        Self { inner: None }
    }

    /// Strong reference, only if the object still exists and reports alive.
    pub fn upgrade(&self) -> Option<SharedTarget> {
        let strong = self.inner.as_ref()?.upgrade()?;
        // A target borrowed elsewhere is in use, hence alive; reads and
        // writes skip it until the borrow ends.
        let alive = strong.try_borrow().map(|t| t.is_alive()).unwrap_or(true);
        alive.then_some(strong)
    }

    pub fn is_valid(&self) -> bool {
        self.upgrade().is_some()
    }

    /// Read a property from the live target. `None` while the host holds a
    /// mutable borrow of it.
    pub fn read(&self, property: &str) -> Option<Value> {
        let strong = self.upgrade()?;
        let value = strong.try_borrow().ok()?.read(property);
        value
    }

    /// Write a property if the target is still valid and not borrowed by the
    /// host. Returns whether the write happened.
    pub fn write(&self, property: &str, value: Value) -> bool {
        let Some(strong) = self.upgrade() else {
            return false;
        };
        let Ok(mut target) = strong.try_borrow_mut() else {
            log::debug!("target busy; skipped write of '{property}'");
            return false;
        };
        target.write(property, value);
        true
    }

    /// Identity comparison (same underlying object).
    pub fn same_target(&self, other: &TargetRef) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRef")
            .field("valid", &self.is_valid())
            .finish()
    }
}
