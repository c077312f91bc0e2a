// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Verification circuits
//!
//! A small declarative language for describing the predicate that servers
//! evaluate, jointly and over shares, against a client's encoded submission.
//!
//! Circuits are built bottom-up with a [`CircuitBuilder`] and frozen into an
//! immutable [`Circuit`]. Nodes live in an arena and reference each other by
//! [`NodeId`]; input slots are referenced by [`WireId`].
//!
//! ## Node kinds
//!
//! - **Input**: an unchecked leaf that consumes one input slot.
//! - **BitRange**: consumes one input slot and proves it is an `n`-bit unsigned
//!   integer through derived bit wires.
//! - **MulCheck**: asserts `a * b = c` over three wires.
//! - **And**: valid iff every child is valid.
//!
//! Input slots are numbered in the order the builder allocates them, which is
//! also the order of the field elements the matching encoder produces.

pub mod builder;
pub mod circuit;
pub mod errors;
pub mod node;

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, CircuitData, CircuitSummary};
pub use errors::CircuitError;
pub use node::{Node, NodeId, WireId};

/// One coordinate of an encoded submission.
///
/// Arbitrary precision and non-negative. Reduction modulo the sharing field is
/// left to the secret-sharing layer.
pub type FieldElement = num_bigint::BigUint;
