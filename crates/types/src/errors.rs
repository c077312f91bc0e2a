// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for value encoding and type configuration.

use num_bigint::BigInt;
use prio_circuit::CircuitError;
use thiserror::Error;

/// Configuration and precondition violations.
///
/// None of these are transient: they indicate a caller passed a bad width,
/// value or power and must be fixed at the call site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("integer width must be at least 1 bit, got {n_bits}")]
    InvalidWidth { n_bits: usize },

    #[error("value must be non-negative, got {value}")]
    NegativeValue { value: BigInt },

    #[error("value needs {bits} bits but the declared width is {n_bits}")]
    ValueTooLarge { bits: u64, n_bits: usize },

    #[error("power must be one of 2, 4 or 8, got {pow}")]
    UnsupportedPower { pow: u32 },

    #[error("circuit error: {0}")]
    Circuit(#[from] CircuitError),
}

pub type Result<T> = std::result::Result<T, TypeError>;
