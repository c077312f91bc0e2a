// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Prio typed values
//!
//! Client-side encodings and server-side verification circuits for the value
//! types a Prio submission may carry.
//!
//! | type            | encoding                 | circuit                              |
//! |-----------------|--------------------------|--------------------------------------|
//! | [`BoolType`]      | `[b]`, `b ∈ {0,1}`       | unchecked input                      |
//! | [`IntUnsafeType`] | `[v]`, `v < 2^n`         | unchecked input                      |
//! | [`IntPowType`]    | `[v, v^2, v^4, ...]`     | bit-range of `v` AND squaring checks |
//!
//! Every type's encoded length equals the input slot count of its circuit.
//! Randomised encoders draw from an injected [`SharedRng`].

pub mod codec;
pub mod errors;
pub mod rng;
pub mod types;
pub mod value_type;

pub use errors::{Result, TypeError};
pub use rng::{shared_rng_from_entropy, shared_rng_from_seed, SharedRng};
pub use types::*;
pub use value_type::{EncodeValue, ValueType};

pub use prio_circuit::{Circuit, CircuitBuilder, CircuitError, FieldElement, NodeId, WireId};
