//! Backing-store handles for containers.
//!
//! A container's store is held either by value ([`Handle::Owned`]) or by
//! reference ([`Handle::Shared`]). Cloning an owned handle deep-copies the store;
//! cloning a shared handle aliases it, so a write through any clone is seen by
//! every other holder.

use std::mem;
use std::sync::{Arc, PoisonError, RwLock};

/// How a container's backing store is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Detached storage: mutations are local to this copy until it is written
    /// back into its parent.
    ByValue,
    /// Aliased storage: mutations are visible to every holder.
    ByReference,
}

#[derive(Debug)]
pub(crate) enum Handle<T> {
    Owned(T),
    Shared(Arc<RwLock<T>>),
}

impl<T> Handle<T> {
    pub(crate) fn ownership(&self) -> Ownership {
        match self {
            Handle::Owned(_) => Ownership::ByValue,
            Handle::Shared(_) => Ownership::ByReference,
        }
    }

    /// Runs `f` against the store, taking the shared lock if needed.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self {
            Handle::Owned(store) => f(store),
            Handle::Shared(lock) => f(&lock.read().unwrap_or_else(PoisonError::into_inner)),
        }
    }

    /// Runs `f` against the store, taking the exclusive lock if needed.
    pub(crate) fn write<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        match self {
            Handle::Owned(store) => f(store),
            Handle::Shared(lock) => f(&mut lock.write().unwrap_or_else(PoisonError::into_inner)),
        }
    }

    /// Identity of a shared store; `None` when owned.
    pub(crate) fn store_id(&self) -> Option<usize> {
        match self {
            Handle::Owned(_) => None,
            Handle::Shared(lock) => Some(Arc::as_ptr(lock) as *const () as usize),
        }
    }

    fn same_store(&self, other: &Self) -> bool {
        match (self, other) {
            (Handle::Shared(a), Handle::Shared(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: Default> Handle<T> {
    /// Moves an owned store behind a fresh shared handle.
    pub(crate) fn share(&mut self) {
        if let Handle::Owned(store) = self {
            let store = mem::take(store);
            *self = Handle::Shared(Arc::new(RwLock::new(store)));
        }
    }
}

impl<T: Clone + Default> Handle<T> {
    /// Turns a shared handle back into an owned store.
    ///
    /// The store is moved out when this handle is its last holder and copied otherwise.
    pub(crate) fn unshare(&mut self) {
        if let Handle::Owned(_) = self {
            return;
        }
        if let Handle::Shared(lock) = mem::replace(self, Handle::Owned(T::default())) {
            let store = match Arc::try_unwrap(lock) {
                Ok(lock) => lock.into_inner().unwrap_or_else(PoisonError::into_inner),
                Err(lock) => {
                    let store = lock.read().unwrap_or_else(PoisonError::into_inner);
                    store.clone()
                }
            };
            *self = Handle::Owned(store);
        }
    }
}

impl<T: Clone> Clone for Handle<T> {
    fn clone(&self) -> Self {
        match self {
            Handle::Owned(store) => Handle::Owned(store.clone()),
            Handle::Shared(lock) => Handle::Shared(Arc::clone(lock)),
        }
    }
}

impl<T: PartialEq> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_store(other) || self.read(|a| other.read(|b| a == b))
    }
}
