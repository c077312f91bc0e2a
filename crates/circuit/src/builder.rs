// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Incremental construction of [`Circuit`]s.

use crate::circuit::Circuit;
use crate::errors::{CircuitError, Result};
use crate::node::{Node, NodeId, WireId};
use tracing::trace;

/// Arena-backed circuit builder.
///
/// Children are always created before their parents, so every [`NodeId`]
/// referenced by a node is strictly smaller than the node's own id. A node
/// belongs to at most one conjunction, which keeps the reachable part of the
/// arena a tree.
#[derive(Debug, Default, Clone)]
pub struct CircuitBuilder {
    nodes: Vec<Node>,
    outputs: Vec<Vec<WireId>>,
    slot_tags: Vec<String>,
    has_parent: Vec<bool>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of input slots allocated so far.
    pub fn num_inputs(&self) -> usize {
        self.slot_tags.len()
    }

    /// Adds an unchecked input leaf consuming the next input slot.
    pub fn unchecked_input(&mut self, tag: impl Into<String>) -> NodeId {
        let tag = tag.into();
        let wire = self.alloc_slot(&tag);
        self.push(Node::Input { tag, wire }, vec![wire])
    }

    /// Adds a bit-range node proving the next input slot holds an `n_bits`-bit
    /// unsigned integer. Its single output is that integer.
    pub fn bit_range(&mut self, tag: impl Into<String>, n_bits: usize) -> Result<NodeId> {
        if n_bits == 0 {
            return Err(CircuitError::InvalidWidth { n_bits });
        }
        let tag = tag.into();
        let wire = self.alloc_slot(&tag);
        Ok(self.push(Node::BitRange { tag, n_bits, wire }, vec![wire]))
    }

    /// Adds a multiplication-consistency check `a * b = c`.
    pub fn check_mul(&mut self, a: WireId, b: WireId, c: WireId) -> Result<NodeId> {
        for wire in [a, b, c] {
            self.check_wire(wire)?;
        }
        Ok(self.push(Node::MulCheck { a, b, c }, Vec::new()))
    }

    /// Adds a conjunction over existing nodes.
    ///
    /// The outputs of the conjunction are the outputs of its children, in order.
    /// Each child must be unattached and may appear only once.
    pub fn and<I>(&mut self, children: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let children: Vec<NodeId> = children.into_iter().collect();
        if children.is_empty() {
            return Err(CircuitError::EmptyConjunction);
        }

        let mut outputs = Vec::new();
        for (i, &child) in children.iter().enumerate() {
            outputs.extend_from_slice(self.outputs(child)?);
            if self.has_parent[child.0] || children[..i].contains(&child) {
                return Err(CircuitError::SharedChild { node: child });
            }
        }
        for child in &children {
            self.has_parent[child.0] = true;
        }
        Ok(self.push(Node::And { children }, outputs))
    }

    /// Output wires of a node.
    pub fn outputs(&self, node: NodeId) -> Result<&[WireId]> {
        self.outputs
            .get(node.0)
            .map(Vec::as_slice)
            .ok_or(CircuitError::UnknownNode { node })
    }

    /// Freezes the arena into an immutable circuit rooted at `root`.
    pub fn build(self, root: NodeId) -> Result<Circuit> {
        if root.0 >= self.nodes.len() {
            return Err(CircuitError::UnknownNode { node: root });
        }
        Ok(Circuit::new(self.nodes, self.outputs, self.slot_tags, root))
    }

    /// Re-adds a decoded node through the same checks as the public methods.
    pub(crate) fn replay(&mut self, node: Node) -> Result<NodeId> {
        match node {
            Node::Input { tag, wire } => {
                self.expect_next_slot(wire)?;
                Ok(self.unchecked_input(tag))
            }
            Node::BitRange { tag, n_bits, wire } => {
                self.expect_next_slot(wire)?;
                self.bit_range(tag, n_bits)
            }
            Node::MulCheck { a, b, c } => self.check_mul(a, b, c),
            Node::And { children } => self.and(children),
        }
    }

    fn expect_next_slot(&self, wire: WireId) -> Result<()> {
        if wire.0 == self.slot_tags.len() {
            Ok(())
        } else {
            Err(CircuitError::SlotOutOfOrder { wire })
        }
    }

    fn alloc_slot(&mut self, tag: &str) -> WireId {
        let wire = WireId(self.slot_tags.len());
        self.slot_tags.push(tag.to_string());
        wire
    }

    fn check_wire(&self, wire: WireId) -> Result<()> {
        if wire.0 < self.slot_tags.len() {
            Ok(())
        } else {
            Err(CircuitError::UnknownWire { wire })
        }
    }

    fn push(&mut self, node: Node, outputs: Vec<WireId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        trace!(%id, ?node, "adding circuit node");
        self.nodes.push(node);
        self.outputs.push(outputs);
        self.has_parent.push(false);
        id
    }
}

impl Circuit {
    /// A circuit made of a single unchecked input leaf tagged `tag`.
    pub fn unchecked_input(tag: impl Into<String>) -> Circuit {
        let mut builder = CircuitBuilder::new();
        let root = builder.unchecked_input(tag);
        Circuit::new(builder.nodes, builder.outputs, builder.slot_tags, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_numbered_in_creation_order() {
        let mut builder = CircuitBuilder::new();
        let a = builder.unchecked_input("a");
        let b = builder.bit_range("b", 4).unwrap();
        let c = builder.unchecked_input("c");

        assert_eq!(builder.outputs(a).unwrap(), &[WireId(0)]);
        assert_eq!(builder.outputs(b).unwrap(), &[WireId(1)]);
        assert_eq!(builder.outputs(c).unwrap(), &[WireId(2)]);
        assert_eq!(builder.num_inputs(), 3);
    }

    #[test]
    fn conjunction_concatenates_outputs() {
        let mut builder = CircuitBuilder::new();
        let a = builder.unchecked_input("a");
        let b = builder.unchecked_input("b");
        let wa = builder.outputs(a).unwrap()[0];
        let wb = builder.outputs(b).unwrap()[0];
        let check = builder.check_mul(wa, wa, wb).unwrap();
        let all = builder.and([a, b, check]).unwrap();

        assert_eq!(builder.outputs(check).unwrap(), &[] as &[WireId]);
        assert_eq!(builder.outputs(all).unwrap(), &[wa, wb]);
    }

    #[test]
    fn rejects_zero_width_bit_range() {
        let mut builder = CircuitBuilder::new();
        assert_eq!(
            builder.bit_range("x", 0),
            Err(CircuitError::InvalidWidth { n_bits: 0 })
        );
        assert_eq!(builder.num_inputs(), 0);
    }

    #[test]
    fn rejects_foreign_references() {
        let mut builder = CircuitBuilder::new();
        let a = builder.unchecked_input("a");
        let wa = builder.outputs(a).unwrap()[0];

        assert_eq!(
            builder.check_mul(wa, wa, WireId(7)),
            Err(CircuitError::UnknownWire { wire: WireId(7) })
        );
        assert_eq!(
            builder.and([a, NodeId(9)]),
            Err(CircuitError::UnknownNode { node: NodeId(9) })
        );
        assert_eq!(
            builder.and(Vec::new()),
            Err(CircuitError::EmptyConjunction)
        );
        assert!(matches!(
            builder.clone().build(NodeId(3)),
            Err(CircuitError::UnknownNode { .. })
        ));
    }

    #[test]
    fn rejects_shared_children() {
        let mut builder = CircuitBuilder::new();
        let x = builder.bit_range("x", 8).unwrap();
        let y = builder.unchecked_input("y");

        assert_eq!(
            builder.and([x, x]),
            Err(CircuitError::SharedChild { node: x })
        );
        // a failed conjunction leaves its children free
        let xy = builder.and([x, y]).unwrap();
        assert_eq!(
            builder.and([y]),
            Err(CircuitError::SharedChild { node: y })
        );

        let circuit = builder.build(xy).unwrap();
        assert_eq!(circuit.summary().bit_ranges, 1);
        assert_eq!(circuit.mul_gate_count(), 8);
        assert_eq!(circuit.outputs(), &[WireId(0), WireId(1)]);
    }

    #[test]
    fn single_input_circuit() {
        let circuit = Circuit::unchecked_input("flag");
        assert_eq!(circuit.num_inputs(), 1);
        assert_eq!(circuit.tag_of(WireId(0)), Some("flag"));
        assert_eq!(circuit.summary().inputs, 1);
        assert_eq!(circuit.mul_gate_count(), 0);
    }
}
