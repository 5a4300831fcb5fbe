//! At-most-one in-flight run per product.
//!
//! The processor itself is lock-free and works on a borrowed product. Callers
//! that can receive concurrent "apply" requests for the same product use a
//! shared [`RunGuard`] to reject the second one while the first is running.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use availability_core::{DomainError, DomainResult, ProductId};

#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    in_flight: Arc<Mutex<HashSet<ProductId>>>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ProductId>> {
        // The set stays consistent even if a holder panicked mid-run.
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `product_id` for a run. Fails with `Conflict` while another ticket
    /// for the same product is alive.
    pub fn try_begin(&self, product_id: &ProductId) -> DomainResult<RunTicket> {
        let mut in_flight = self.lock();
        if !in_flight.insert(product_id.clone()) {
            tracing::warn!(product_id = %product_id, "rejected overlapping availability run");
            return Err(DomainError::conflict(format!(
                "availability run already in flight for product {product_id}"
            )));
        }
        Ok(RunTicket {
            guard: self.clone(),
            product_id: product_id.clone(),
        })
    }

    pub fn is_running(&self, product_id: &ProductId) -> bool {
        self.lock().contains(product_id)
    }
}

/// Proof of a claimed product. Dropping it releases the claim.
#[derive(Debug)]
pub struct RunTicket {
    guard: RunGuard,
    product_id: ProductId,
}

impl RunTicket {
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}

impl Drop for RunTicket {
    fn drop(&mut self) {
        self.guard.lock().remove(&self.product_id);
    }
}
