//! # Keyed MAC Instances
//!
//! A keyed MAC is stateful: writing data and reading a tag mutate it, and it
//! must be back in its just-keyed state before anyone else uses it. This
//! module owns the key and hands out keyed instances under one of two
//! strategies:
//!
//! - [`MacStrategy::Fresh`] keys a new instance for every call.
//! - [`MacStrategy::Pooled`] keeps up to `capacity` idle instances and
//!   recycles them.
//!
//! ## Security Invariant
//!
//! An instance is returned to the pool only after [`ResetOnDrop`] has reset
//! it. The reset runs in `Drop`, so it happens on every exit path from the
//! tag computation, unwinding included. An instance is owned by exactly one
//! caller between checkout and release; the lock guards only the idle list
//! and is never held while hashing.

use std::ops::{Deref, DerefMut};

use hmac::digest::{FixedOutputReset, KeyInit};
use hmac::Mac;
use parking_lot::Mutex;
use zeroize::Zeroizing;

use nodecred_core::{CanonicalBytes, CredentialError};

/// Idle instances kept by [`MacStrategy::default()`].
pub const DEFAULT_POOL_CAPACITY: usize = 32;

/// How keyed MAC instances are obtained for each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacStrategy {
    /// Key a new instance per call. Repeats the key schedule every time.
    Fresh,
    /// Recycle up to `capacity` idle instances.
    Pooled {
        /// Most idle instances kept at once.
        capacity: usize,
    },
}

impl Default for MacStrategy {
    fn default() -> Self {
        Self::Pooled {
            capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

/// Source of keyed MAC instances for a single key.
pub struct MacPool<M> {
    key: Zeroizing<Vec<u8>>,
    strategy: MacStrategy,
    idle: Mutex<Vec<M>>,
}

impl<M> MacPool<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    /// Create a pool for `key`. No instance is keyed until first use.
    pub fn new(key: &[u8], strategy: MacStrategy) -> Self {
        let reserve = match strategy {
            MacStrategy::Fresh => 0,
            MacStrategy::Pooled { capacity } => capacity,
        };
        Self {
            key: Zeroizing::new(key.to_vec()),
            strategy,
            idle: Mutex::new(Vec::with_capacity(reserve)),
        }
    }

    /// Strategy this pool was built with.
    pub fn strategy(&self) -> MacStrategy {
        self.strategy
    }

    /// Number of instances currently parked in the pool.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Compute the MAC tag of `data`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::KeySetup` if a new instance has to be keyed
    /// and the algorithm rejects the key.
    pub fn tag(&self, data: &CanonicalBytes) -> Result<Vec<u8>, CredentialError> {
        let mut mac = self.checkout()?;
        let tag = {
            let mut lease = ResetOnDrop(&mut mac);
            Mac::update(&mut *lease, data.as_bytes());
            Mac::finalize_reset(&mut *lease).into_bytes().to_vec()
        };
        self.release(mac);
        Ok(tag)
    }

    fn checkout(&self) -> Result<M, CredentialError> {
        if let MacStrategy::Pooled { .. } = self.strategy {
            if let Some(mac) = self.idle.lock().pop() {
                return Ok(mac);
            }
        }
        tracing::trace!(strategy = ?self.strategy, "keying new MAC instance");
        <M as KeyInit>::new_from_slice(&self.key)
            .map_err(|e| CredentialError::KeySetup(e.to_string()))
    }

    fn release(&self, mac: M) {
        if let MacStrategy::Pooled { capacity } = self.strategy {
            let mut idle = self.idle.lock();
            if idle.len() < capacity {
                idle.push(mac);
            }
        }
    }
}

impl<M> std::fmt::Debug for MacPool<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacPool")
            .field("key", &"<redacted>")
            .field("strategy", &self.strategy)
            .field("idle", &self.idle.lock().len())
            .finish()
    }
}

/// Exclusive borrow of a keyed instance that resets it when dropped.
struct ResetOnDrop<'a, M: Mac + FixedOutputReset>(&'a mut M);

impl<M: Mac + FixedOutputReset> Deref for ResetOnDrop<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.0
    }
}

impl<M: Mac + FixedOutputReset> DerefMut for ResetOnDrop<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.0
    }
}

impl<M: Mac + FixedOutputReset> Drop for ResetOnDrop<'_, M> {
    fn drop(&mut self) {
        Mac::reset(&mut *self.0);
    }
}
