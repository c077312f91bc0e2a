// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::{Arc, Mutex, PoisonError};

/// Randomness source shared between concurrent encoders.
pub type SharedRng = Arc<Mutex<ChaCha20Rng>>;

pub fn shared_rng_from_entropy() -> SharedRng {
    Arc::new(Mutex::new(ChaCha20Rng::from_entropy()))
}

/// Deterministic source for tests and reproducible simulations.
pub fn shared_rng_from_seed(seed: u64) -> SharedRng {
    Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed)))
}

/// Runs `f` with exclusive access to the generator.
///
/// A panic in another holder cannot leave the ChaCha state half-updated, so a
/// poisoned lock is recovered rather than propagated.
pub(crate) fn with_rng<T>(rng: &SharedRng, f: impl FnOnce(&mut ChaCha20Rng) -> T) -> T {
    let mut guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
