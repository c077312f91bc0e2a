// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for circuit construction and evaluation.

use crate::node::{NodeId, WireId};
use thiserror::Error;

/// Errors that can occur while building or evaluating a circuit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// A bit-range node was requested with a zero width
    #[error("bit-range width must be at least 1, got {n_bits}")]
    InvalidWidth { n_bits: usize },

    /// A node id that does not belong to this builder
    #[error("unknown node {node}")]
    UnknownNode { node: NodeId },

    /// A wire id that does not belong to this builder
    #[error("unknown wire {wire}")]
    UnknownWire { wire: WireId },

    #[error("conjunction requires at least one child")]
    EmptyConjunction,

    /// A node listed twice, or already owned by another conjunction
    #[error("{node} already has a parent")]
    SharedChild { node: NodeId },

    /// A decoded input node that does not claim the next free slot
    #[error("{wire} is not the next free input slot")]
    SlotOutOfOrder { wire: WireId },

    /// The assignment does not match the circuit's input slot count
    #[error("expected {expected} input elements, got {got}")]
    InputCountMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, CircuitError>;
