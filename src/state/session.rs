//! Session authorization cache for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, the login page and user-aware components all ask "who is
//! signed in?". Answering that costs a `GET /auth/me`, so the answer is
//! cached per *generation* and shared by every caller in that generation.
//!
//! DESIGN
//! ======
//! One owned slot holds the generation counter and the shared single-flight
//! future for that generation. The first read creates the future; later
//! reads clone it and replay its result. [`SessionCache::invalidate`] bumps
//! the generation and empties the slot, so the next read starts exactly one
//! new fetch. Futures handed out before the bump keep resolving against the
//! old fetch; nothing created after the bump can observe it.
//!
//! Reads subscribe when called, not when first polled, so an `invalidate()`
//! followed by a read in the same call sequence always sees the new
//! generation.
//!
//! ERROR HANDLING
//! ==============
//! Fail-closed: transport errors, non-200 envelopes and undecodable bodies
//! all resolve to "no identity". Nothing here returns an error. A failed
//! fetch is replayed for the rest of its generation; only `invalidate()`
//! retries.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::net::api::AuthBackend;
use crate::net::types::User;

/// Immutable snapshot of the signed-in user. A refetch produces a new one.
pub type Identity = Rc<User>;

/// Shared handle on one generation's upstream fetch.
pub type IdentityFuture = Shared<LocalBoxFuture<'static, Option<Identity>>>;

struct Slot {
    generation: u64,
    pending: Option<IdentityFuture>,
}

/// Cached current-user lookup with manual invalidation.
///
/// Cloning is cheap and clones share the same slot.
#[derive(Clone)]
pub struct SessionCache {
    backend: Rc<dyn AuthBackend>,
    slot: Rc<RefCell<Slot>>,
}

impl SessionCache {
    pub fn new(backend: Rc<dyn AuthBackend>) -> Self {
        Self { backend, slot: Rc::new(RefCell::new(Slot { generation: 0, pending: None })) }
    }

    /// Start a new generation. The next read performs one fresh fetch.
    pub fn invalidate(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.generation += 1;
        slot.pending = None;
        tracing::debug!(generation = slot.generation, "session cache invalidated");
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.borrow().generation
    }

    /// The identity for the current generation, fetching it if no read has
    /// happened since the last invalidation.
    #[must_use]
    pub fn current_identity(&self) -> IdentityFuture {
        let mut slot = self.slot.borrow_mut();
        if let Some(pending) = &slot.pending {
            return pending.clone();
        }

        let backend = Rc::clone(&self.backend);
        let generation = slot.generation;
        let fetch = async move { fetch_identity(backend.as_ref(), generation).await }
            .boxed_local()
            .shared();
        slot.pending = Some(fetch.clone());
        fetch
    }

    /// `true` when the current generation resolved to a user.
    pub fn is_authenticated(&self) -> impl Future<Output = bool> + 'static {
        let identity = self.current_identity();
        async move { identity.await.is_some() }
    }

    /// `true` only for a resolved user whose role is admin.
    pub fn is_admin(&self) -> impl Future<Output = bool> + 'static {
        let identity = self.current_identity();
        async move { identity.await.is_some_and(|user| user.is_admin()) }
    }

    /// The current generation's result if its fetch already finished.
    ///
    /// Never starts a fetch; `None` means "absent or not resolved yet".
    #[must_use]
    pub fn cached(&self) -> Option<Identity> {
        let slot = self.slot.borrow();
        slot.pending.as_ref().and_then(|pending| pending.peek().cloned().flatten())
    }
}

async fn fetch_identity(backend: &dyn AuthBackend, generation: u64) -> Option<Identity> {
    tracing::debug!(generation, "fetching current identity");
    match backend.me().await {
        Ok(resp) => {
            let status = resp.status_code;
            let identity = resp.into_ok_data().map(|dto| Rc::new(User::from(dto)));
            if identity.is_none() {
                tracing::debug!(generation, status, "no identity in auth/me response");
            }
            identity
        }
        Err(e) => {
            tracing::warn!(generation, error = %e, "identity fetch failed; treating as signed out");
            None
        }
    }
}
