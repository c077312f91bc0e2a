// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in a circuit arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Reference to an input slot.
///
/// Slot `i` carries the `i`-th field element of the encoded submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(pub(crate) usize);

impl WireId {
    pub fn slot(&self) -> usize {
        self.0
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wire#{}", self.0)
    }
}

/// A single circuit node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Unchecked input leaf. Accepts any field element.
    Input { tag: String, wire: WireId },
    /// The slot at `wire` decomposes into `n_bits` boolean wires.
    BitRange {
        tag: String,
        n_bits: usize,
        wire: WireId,
    },
    /// `a * b = c`
    MulCheck { a: WireId, b: WireId, c: WireId },
    And { children: Vec<NodeId> },
}

impl Node {
    /// Label attached at construction time, if the node reads an input slot.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Input { tag, .. } | Node::BitRange { tag, .. } => Some(tag),
            Node::MulCheck { .. } | Node::And { .. } => None,
        }
    }

    /// Multiplication gates this node contributes to the checking protocol.
    ///
    /// Each derived bit of a bit-range costs one `b * b = b` gate.
    pub fn mul_gates(&self) -> usize {
        match self {
            Node::Input { .. } | Node::And { .. } => 0,
            Node::BitRange { n_bits, .. } => *n_bits,
            Node::MulCheck { .. } => 1,
        }
    }
}
