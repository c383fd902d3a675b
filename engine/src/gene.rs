use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::pool::GenePool;

/// Pool-wide identity of a neuron gene. Doubles as its index in the pool arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NeuronId(pub usize);

/// Pool-wide identity of a synapse gene. Doubles as its index in the pool arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynapseId(pub usize);

impl NeuronId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl SynapseId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Role a neuron plays in the network. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuronRole {
    Input,
    Output,
    Hidden,
}

/// Gene describing a single node of the evolving topology.
///
/// Only the [`GenePool`] creates neuron genes and only the pool changes their
/// layer (when a layer is inserted at or below it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronGene {
    id: NeuronId,
    layer: usize,
    role: NeuronRole,
}

impl NeuronGene {
    pub(crate) fn new(id: NeuronId, layer: usize, role: NeuronRole) -> Self {
        Self { id, layer, role }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn role(&self) -> NeuronRole {
        self.role
    }

    pub(crate) fn shift_up(&mut self) {
        self.layer += 1;
    }
}

impl PartialEq for NeuronGene {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NeuronGene {}

impl Hash for NeuronGene {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Gene describing a directed edge between two neuron genes.
///
/// Endpoints are stored in ascending-layer order. The layer span is not
/// stored: it is read through the pool so layer insertions are reflected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapseGene {
    id: SynapseId,
    from: NeuronId,
    to: NeuronId,
}

impl SynapseGene {
    pub(crate) fn new(id: SynapseId, from: NeuronId, to: NeuronId) -> Self {
        Self { id, from, to }
    }

    pub fn id(&self) -> SynapseId {
        self.id
    }

    pub fn from(&self) -> NeuronId {
        self.from
    }

    pub fn to(&self) -> NeuronId {
        self.to
    }

    /// Number of layers this edge spans, `to.layer - from.layer`.
    ///
    /// Returns `None` if either endpoint is unknown to `pool`.
    pub fn length(&self, pool: &GenePool) -> Option<usize> {
        let from = pool.neuron(self.from)?.layer();
        let to = pool.neuron(self.to)?.layer();
        to.checked_sub(from)
    }
}

impl PartialEq for SynapseGene {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SynapseGene {}

impl Hash for SynapseGene {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id_only() {
        let a = NeuronGene::new(NeuronId(3), 0, NeuronRole::Input);
        let mut b = NeuronGene::new(NeuronId(3), 0, NeuronRole::Input);
        b.shift_up();
        assert_eq!(a, b);
        assert_ne!(a, NeuronGene::new(NeuronId(4), 0, NeuronRole::Input));

        let s1 = SynapseGene::new(SynapseId(0), NeuronId(0), NeuronId(1));
        let s2 = SynapseGene::new(SynapseId(0), NeuronId(5), NeuronId(6));
        assert_eq!(s1, s2);
    }
}
