// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Immutable circuit descriptions and their plaintext evaluation.

use crate::builder::CircuitBuilder;
use crate::errors::{CircuitError, Result};
use crate::node::{Node, NodeId, WireId};
use crate::FieldElement;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A frozen verification circuit.
///
/// Holds no per-submission state and may be shared freely across verifiers.
/// Serialized as its node list and root; decoding replays every node through a
/// [`CircuitBuilder`], so a decoded circuit satisfies the same invariants as a
/// built one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CircuitData", into = "CircuitData")]
pub struct Circuit {
    nodes: Vec<Node>,
    outputs: Vec<Vec<WireId>>,
    slot_tags: Vec<String>,
    root: NodeId,
}

/// Wire form of a [`Circuit`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CircuitData {
    nodes: Vec<Node>,
    root: NodeId,
}

impl From<Circuit> for CircuitData {
    fn from(circuit: Circuit) -> Self {
        Self {
            nodes: circuit.nodes,
            root: circuit.root,
        }
    }
}

impl TryFrom<CircuitData> for Circuit {
    type Error = CircuitError;

    fn try_from(data: CircuitData) -> Result<Self> {
        let mut builder = CircuitBuilder::new();
        for node in data.nodes {
            builder.replay(node)?;
        }
        builder.build(data.root)
    }
}

/// Node counts of the part of a circuit reachable from its root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircuitSummary {
    /// Unchecked input leaves
    pub inputs: usize,
    pub bit_ranges: usize,
    pub mul_checks: usize,
    pub conjunctions: usize,
}

impl Circuit {
    pub(crate) fn new(
        nodes: Vec<Node>,
        outputs: Vec<Vec<WireId>>,
        slot_tags: Vec<String>,
        root: NodeId,
    ) -> Self {
        Self {
            nodes,
            outputs,
            slot_tags,
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of field elements a submission must supply.
    pub fn num_inputs(&self) -> usize {
        self.slot_tags.len()
    }

    /// Output wires of the root node.
    pub fn outputs(&self) -> &[WireId] {
        &self.outputs[self.root.0]
    }

    /// Tag of the node that allocated an input slot.
    pub fn tag_of(&self, wire: WireId) -> Option<&str> {
        self.slot_tags.get(wire.0).map(String::as_str)
    }

    pub fn summary(&self) -> CircuitSummary {
        let mut summary = CircuitSummary::default();
        for node in self.reachable() {
            match node {
                Node::Input { .. } => summary.inputs += 1,
                Node::BitRange { .. } => summary.bit_ranges += 1,
                Node::MulCheck { .. } => summary.mul_checks += 1,
                Node::And { .. } => summary.conjunctions += 1,
            }
        }
        summary
    }

    /// Total multiplication gates the checking protocol has to verify.
    pub fn mul_gate_count(&self) -> usize {
        self.reachable().map(Node::mul_gates).sum()
    }

    /// Evaluates the circuit against a plaintext assignment of its input slots.
    ///
    /// Returns `Ok(false)` if any reachable constraint fails.
    pub fn evaluate(&self, inputs: &[FieldElement]) -> Result<bool> {
        if inputs.len() != self.num_inputs() {
            return Err(CircuitError::InputCountMismatch {
                expected: self.num_inputs(),
                got: inputs.len(),
            });
        }

        for (id, node) in self.reachable_with_ids() {
            let holds = match node {
                Node::Input { .. } | Node::And { .. } => true,
                Node::BitRange { n_bits, wire, .. } => bit_range_holds(&inputs[wire.0], *n_bits),
                Node::MulCheck { a, b, c } => &inputs[a.0] * &inputs[b.0] == inputs[c.0],
            };
            if !holds {
                debug!(%id, tag = node.tag(), "circuit constraint failed");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn reachable(&self) -> impl Iterator<Item = &Node> {
        self.reachable_with_ids().map(|(_, node)| node)
    }

    /// Depth-first walk from the root, children in declaration order.
    fn reachable_with_ids(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id.0];
            if let Node::And { children } = node {
                stack.extend(children.iter().rev().copied());
            }
            Some((id, node))
        })
    }
}

/// Derives the low `n_bits` bit wires of `value`, checks each is boolean and
/// that they recompose to `value`.
fn bit_range_holds(value: &FieldElement, n_bits: usize) -> bool {
    let bits: Vec<BigUint> = (0..n_bits as u64)
        .map(|i| {
            if value.bit(i) {
                BigUint::one()
            } else {
                BigUint::zero()
            }
        })
        .collect();

    if bits.iter().any(|b| b * b != *b) {
        return false;
    }

    let recomposed = bits
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, b| (acc << 1usize) + b);
    recomposed == *value
}
