//! Bounded component pooling
//!
//! Pipeline components hold mutable per-call scratch state and are not
//! safe for concurrent reentry. [`ComponentPool`] enforces the ownership
//! invariant for callers that reuse instances across requests: at most
//! `capacity` instances exist, and a checked-out instance is used by
//! exactly one request at a time. Checkin is automatic when the guard
//! drops.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// A bounded pool with explicit checkout/checkin.
pub struct ComponentPool<T> {
    available: Mutex<VecDeque<T>>,
    returned: Condvar,
    capacity: usize,
}

impl<T> ComponentPool<T> {
    /// Create a pool holding `capacity` instances built by `factory`.
    ///
    /// Instances are created eagerly; the factory runs exactly `capacity`
    /// times.
    pub fn new(capacity: usize, mut factory: impl FnMut() -> T) -> Self {
        let instances = (0..capacity).map(|_| factory()).collect();
        Self {
            available: Mutex::new(instances),
            returned: Condvar::new(),
            capacity,
        }
    }

    /// Check out an instance, blocking until one is free.
    pub fn checkout(&self) -> PooledComponent<'_, T> {
        let mut available = self.available.lock();
        loop {
            if let Some(instance) = available.pop_front() {
                return PooledComponent {
                    pool: self,
                    instance: Some(instance),
                };
            }
            self.returned.wait(&mut available);
        }
    }

    /// Check out an instance without blocking.
    pub fn try_checkout(&self) -> Option<PooledComponent<'_, T>> {
        let instance = self.available.lock().pop_front()?;
        Some(PooledComponent {
            pool: self,
            instance: Some(instance),
        })
    }

    /// Total number of instances the pool owns
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of instances currently checked in
    pub fn idle(&self) -> usize {
        self.available.lock().len()
    }

    fn checkin(&self, instance: T) {
        self.available.lock().push_back(instance);
        self.returned.notify_one();
    }
}

impl<T> std::fmt::Debug for ComponentPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentPool")
            .field("capacity", &self.capacity)
            .field("idle", &self.idle())
            .finish()
    }
}

/// RAII guard for a checked-out instance; checks back in on drop.
pub struct PooledComponent<'a, T> {
    pool: &'a ComponentPool<T>,
    instance: Option<T>,
}

impl<T> std::ops::Deref for PooledComponent<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.instance.as_ref().expect("instance present until drop")
    }
}

impl<T> std::ops::DerefMut for PooledComponent<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.instance.as_mut().expect("instance present until drop")
    }
}

impl<T> Drop for PooledComponent<'_, T> {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            self.pool.checkin(instance);
        }
    }
}
