//! 스레드 안전 TacticProfile (Arc<Mutex<>> 래퍼)
//!
//! One lock per profile, held for exactly one operation.

use super::profile::TacticProfile;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct SharedTacticProfile {
    inner: Arc<Mutex<TacticProfile>>,
}

impl SharedTacticProfile {
    pub fn new(profile: TacticProfile) -> Self {
        Self { inner: Arc::new(Mutex::new(profile)) }
    }

    /// Run `f` with exclusive access. `f` must not call back into this handle.
    pub fn with<R>(&self, f: impl FnOnce(&mut TacticProfile) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Copy of the current state
    pub fn read(&self) -> TacticProfile {
        self.lock().clone()
    }

    // 모든 연산이 원자적이므로 poison 상태에서도 프로필은 일관됨
    fn lock(&self) -> MutexGuard<'_, TacticProfile> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<TacticProfile> for SharedTacticProfile {
    fn from(profile: TacticProfile) -> Self {
        Self::new(profile)
    }
}
