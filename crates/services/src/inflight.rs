//! Per-engine request discipline: one outstanding gateway call at a time,
//! with stale responses detectable after a reset.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct GateInner {
    busy: AtomicBool,
    epoch: AtomicU64,
}

/// Mutual-exclusion gate owned by one engine. Clones share the same gate.
#[derive(Debug, Clone, Default)]
pub struct InflightGate {
    inner: Arc<GateInner>,
}

impl InflightGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a permit is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    /// Claims the gate for one request. Returns `None` when a request is
    /// already in flight; callers map that to their Busy rejection.
    #[must_use]
    pub fn try_begin(&self) -> Option<InflightPermit> {
        if self
            .inner
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        Some(InflightPermit {
            inner: Arc::clone(&self.inner),
            epoch: self.inner.epoch.load(Ordering::Acquire),
        })
    }

    /// Marks every outstanding permit stale. Called when the owning state is
    /// reset so a response resolving afterwards is ignored instead of being
    /// applied to the fresh state.
    pub fn invalidate(&self) {
        self.inner.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

/// Proof that the holder owns the gate's single request slot. Releases the
/// slot on drop, whichever way the request ends.
#[derive(Debug)]
pub struct InflightPermit {
    inner: Arc<GateInner>,
    epoch: u64,
}

impl InflightPermit {
    /// False once the gate was invalidated after this permit was issued.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.inner.epoch.load(Ordering::Acquire) == self.epoch
    }
}

impl Drop for InflightPermit {
    fn drop(&mut self) {
        self.inner.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_rejected_while_permit_is_live() {
        let gate = InflightGate::new();
        let permit = gate.try_begin().expect("gate starts free");
        assert!(gate.is_busy());
        assert!(gate.try_begin().is_none());
        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn dropping_a_permit_always_releases_the_gate() {
        let gate = InflightGate::new();
        {
            let _permit = gate.try_begin().unwrap();
        }
        assert!(!gate.is_busy());
    }

    #[test]
    fn invalidate_makes_outstanding_permits_stale() {
        let gate = InflightGate::new();
        let permit = gate.try_begin().unwrap();
        assert!(permit.is_current());

        gate.invalidate();
        assert!(!permit.is_current());

        drop(permit);
        let fresh = gate.try_begin().unwrap();
        assert!(fresh.is_current());
    }

    #[test]
    fn clones_share_one_slot() {
        let gate = InflightGate::new();
        let clone = gate.clone();
        let _permit = gate.try_begin().unwrap();
        assert!(clone.is_busy());
        assert!(clone.try_begin().is_none());
    }
}
