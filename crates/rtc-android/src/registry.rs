use std::collections::HashMap;
use std::fmt;
use std::thread::{self, ThreadId};

/// Lookup failures for a handle passed in from Java.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RegistryError {
    UnknownHandle(i64),
    WrongThread(i64),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHandle(h) => write!(f, "unknown surface handle {h}"),
            Self::WrongThread(h) => {
                write!(f, "surface handle {h} used off its rendering thread")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

struct Slot<T> {
    owner: ThreadId,
    value: T,
}

/// Maps opaque `jlong` handles to values owned by one thread each.
///
/// Handles are positive and never reused within a process, so a stale
/// handle from a destroyed surface can never reach a newer one.
pub struct HandleRegistry<T> {
    next: i64,
    slots: HashMap<i64, Slot<T>>,
}

impl<T> HandleRegistry<T> {
    pub fn new() -> Self {
        Self {
            next: 1,
            slots: HashMap::new(),
        }
    }

    /// Stores `value`, owned by the calling thread, and returns its handle.
    pub fn insert(&mut self, value: T) -> i64 {
        let handle = self.next;
        self.next += 1;
        self.slots.insert(
            handle,
            Slot {
                owner: thread::current().id(),
                value,
            },
        );
        handle
    }

    /// Runs `f` on the value behind `handle`.
    pub fn with<R>(&mut self, handle: i64, f: impl FnOnce(&mut T) -> R) -> Result<R, RegistryError> {
        let slot = self.owned_slot(handle)?;
        Ok(f(&mut slot.value))
    }

    /// Removes and returns the value behind `handle`.
    pub fn remove(&mut self, handle: i64) -> Result<T, RegistryError> {
        self.owned_slot(handle)?;
        self.slots
            .remove(&handle)
            .map(|slot| slot.value)
            .ok_or(RegistryError::UnknownHandle(handle))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn owned_slot(&mut self, handle: i64) -> Result<&mut Slot<T>, RegistryError> {
        let slot = self
            .slots
            .get_mut(&handle)
            .ok_or(RegistryError::UnknownHandle(handle))?;
        if slot.owner != thread::current().id() {
            return Err(RegistryError::WrongThread(handle));
        }
        Ok(slot)
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_positive_and_unique() {
        let mut reg = HandleRegistry::new();
        let a = reg.insert("a");
        let b = reg.insert("b");
        assert!(a > 0 && b > 0);
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn with_reaches_value() {
        let mut reg = HandleRegistry::new();
        let h = reg.insert(1u32);
        reg.with(h, |v| *v += 41).unwrap();
        assert_eq!(reg.with(h, |v| *v), Ok(42));
    }

    #[test]
    fn zero_and_unknown_handles_rejected() {
        let mut reg: HandleRegistry<u32> = HandleRegistry::new();
        assert_eq!(reg.with(0, |_| ()), Err(RegistryError::UnknownHandle(0)));
        assert_eq!(reg.with(99, |_| ()), Err(RegistryError::UnknownHandle(99)));
        assert_eq!(reg.remove(-3).unwrap_err(), RegistryError::UnknownHandle(-3));
    }

    #[test]
    fn removed_handle_is_never_reissued() {
        let mut reg = HandleRegistry::new();
        let old = reg.insert(1u32);
        assert_eq!(reg.remove(old), Ok(1));
        let new = reg.insert(2u32);

        assert_ne!(old, new);
        assert_eq!(reg.with(old, |v| *v), Err(RegistryError::UnknownHandle(old)));
        assert!(!reg.is_empty());
    }

    #[test]
    fn other_thread_is_refused() {
        let mut reg = HandleRegistry::new();
        let h = reg.insert(7u32);

        thread::scope(|s| {
            s.spawn(|| {
                assert_eq!(reg.with(h, |v| *v), Err(RegistryError::WrongThread(h)));
                assert_eq!(reg.remove(h).unwrap_err(), RegistryError::WrongThread(h));
            });
        });

        assert_eq!(reg.with(h, |v| *v), Ok(7));
    }
}
