use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::GenePoolError;
use crate::gene::{NeuronGene, NeuronId, NeuronRole, SynapseGene, SynapseId};

/// Registry of every gene minted during one evolutionary run.
///
/// The pool is the only place ids are minted and the only place layers are
/// inserted. Genes are never removed; genomes refer to them by id and read
/// layers back through the pool, so renumbering done by [`GenePool::add_layer`]
/// is seen by every genome at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenePool {
    neurons: Vec<NeuronGene>,
    synapses: Vec<SynapseGene>,
    #[serde(skip)]
    by_endpoints: HashMap<(NeuronId, NeuronId), SynapseId>,
    layer_count: usize,
}

fn endpoint_key(a: NeuronId, b: NeuronId) -> (NeuronId, NeuronId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl GenePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap topology: `inputs` input neurons on layer 0, `outputs` output
    /// neurons on layer 1 and a synapse from every input to every output.
    pub fn fully_connected(inputs: usize, outputs: usize) -> Self {
        let mut pool = Self::new();
        let ins: Vec<NeuronId> = (0..inputs)
            .map(|_| pool.add_neuron_gene(0, NeuronRole::Input))
            .collect();
        let outs: Vec<NeuronId> = (0..outputs)
            .map(|_| pool.add_neuron_gene(1, NeuronRole::Output))
            .collect();
        for &i in &ins {
            for &o in &outs {
                pool.mint_synapse(i, o);
            }
        }
        pool
    }

    /// Mint a neuron gene on `layer` with a fresh id.
    pub fn add_neuron_gene(&mut self, layer: usize, role: NeuronRole) -> NeuronId {
        let id = NeuronId(self.neurons.len());
        self.neurons.push(NeuronGene::new(id, layer, role));
        self.layer_count = self.layer_count.max(layer + 1);
        debug!(neuron = %id, layer, ?role, "minted neuron gene");
        id
    }

    /// Mint a synapse gene between `a` and `b`, stored lower layer first.
    ///
    /// If the pool already holds a gene for this endpoint pair (in either
    /// direction) nothing is minted and the existing id is returned.
    pub fn add_synapse_gene(
        &mut self,
        a: NeuronId,
        b: NeuronId,
    ) -> Result<SynapseId, GenePoolError> {
        let layer_a = self.layer_of(a)?;
        let layer_b = self.layer_of(b)?;
        if layer_a == layer_b {
            return Err(GenePoolError::SameLayer {
                from: a,
                to: b,
                layer: layer_a,
            });
        }
        if let Some(existing) = self.get_synapse_gene(a, b) {
            return Ok(existing);
        }
        let (from, to) = if layer_a < layer_b { (a, b) } else { (b, a) };
        Ok(self.mint_synapse(from, to))
    }

    fn mint_synapse(&mut self, from: NeuronId, to: NeuronId) -> SynapseId {
        let id = SynapseId(self.synapses.len());
        self.synapses.push(SynapseGene::new(id, from, to));
        self.by_endpoints.insert(endpoint_key(from, to), id);
        debug!(synapse = %id, %from, %to, "minted synapse gene");
        id
    }

    /// Existing gene joining `a` and `b` in either direction.
    pub fn get_synapse_gene(&self, a: NeuronId, b: NeuronId) -> Option<SynapseId> {
        self.by_endpoints.get(&endpoint_key(a, b)).copied()
    }

    /// Insert an empty layer at `index`, pushing every neuron on a layer
    /// `>= index` up by one.
    pub fn add_layer(&mut self, index: usize) {
        let mut moved = 0usize;
        for neuron in self.neurons.iter_mut().filter(|n| n.layer() >= index) {
            neuron.shift_up();
            moved += 1;
        }
        self.layer_count = (self.layer_count + 1).max(index + 1);
        debug!(index, moved, layers = self.layer_count, "inserted layer");
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&NeuronGene> {
        self.neurons.get(id.index())
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&SynapseGene> {
        self.synapses.get(id.index())
    }

    pub fn layer_of(&self, id: NeuronId) -> Result<usize, GenePoolError> {
        self.neuron(id)
            .map(NeuronGene::layer)
            .ok_or(GenePoolError::UnknownNeuron(id))
    }

    pub fn synapse_length(&self, id: SynapseId) -> Result<usize, GenePoolError> {
        let synapse = self.synapse(id).ok_or(GenePoolError::UnknownSynapse(id))?;
        let from = self.layer_of(synapse.from())?;
        let to = self.layer_of(synapse.to())?;
        Ok(to.saturating_sub(from))
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Ids of all neurons currently on `layer`, in creation order.
    pub fn neurons_in_layer(&self, layer: usize) -> Vec<NeuronId> {
        self.neurons
            .iter()
            .filter(|n| n.layer() == layer)
            .map(NeuronGene::id)
            .collect()
    }

    pub fn neuron_genes(&self) -> impl Iterator<Item = &NeuronGene> {
        self.neurons.iter()
    }

    pub fn synapse_genes(&self) -> impl Iterator<Item = &SynapseGene> {
        self.synapses.iter()
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn fully_connected_bootstrap() {
        let pool = GenePool::fully_connected(3, 2);
        assert_eq!(pool.neuron_count(), 5);
        assert_eq!(pool.synapse_count(), 6);
        assert_eq!(pool.layer_count(), 2);
        assert_eq!(pool.neurons_in_layer(0).len(), 3);
        assert_eq!(pool.neurons_in_layer(1).len(), 2);
        for s in pool.synapse_genes() {
            assert_eq!(pool.synapse_length(s.id()), Ok(1));
        }
    }

    #[test]
    fn synapse_is_canonicalised_and_reused() {
        let mut pool = GenePool::new();
        let low = pool.add_neuron_gene(0, NeuronRole::Input);
        let high = pool.add_neuron_gene(2, NeuronRole::Output);

        let s = pool.add_synapse_gene(high, low).unwrap();
        let gene = pool.synapse(s).unwrap();
        assert_eq!(gene.from(), low);
        assert_eq!(gene.to(), high);
        assert_eq!(gene.length(&pool), Some(2));

        assert_eq!(pool.add_synapse_gene(low, high), Ok(s));
        assert_eq!(pool.synapse_count(), 1);
        assert_eq!(pool.get_synapse_gene(high, low), Some(s));
        assert_eq!(pool.get_synapse_gene(low, low), None);
    }

    #[test]
    fn same_layer_and_foreign_ids_are_rejected() {
        let mut pool = GenePool::new();
        let a = pool.add_neuron_gene(0, NeuronRole::Input);
        let b = pool.add_neuron_gene(0, NeuronRole::Input);
        assert_eq!(
            pool.add_synapse_gene(a, b),
            Err(GenePoolError::SameLayer {
                from: a,
                to: b,
                layer: 0
            })
        );
        assert_eq!(
            pool.add_synapse_gene(a, NeuronId(99)),
            Err(GenePoolError::UnknownNeuron(NeuronId(99)))
        );
        assert_eq!(pool.synapse_count(), 0);
        assert!(pool.synapse(SynapseId(0)).is_none());
    }

    #[test]
    fn add_layer_renumbers_at_and_above_index() {
        let mut pool = GenePool::fully_connected(2, 1);
        let output = pool.neurons_in_layer(1)[0];
        let s = pool.synapse_genes().next().unwrap().id();

        pool.add_layer(1);

        assert_eq!(pool.layer_count(), 3);
        assert_eq!(pool.layer_of(output), Ok(2));
        assert_eq!(pool.neurons_in_layer(0).len(), 2);
        assert!(pool.neurons_in_layer(1).is_empty());
        assert_eq!(pool.synapse_length(s), Ok(2));
    }

    #[test]
    fn ids_are_arena_positions() {
        let mut pool = GenePool::fully_connected(4, 3);
        pool.add_layer(1);
        let hidden = pool.add_neuron_gene(1, NeuronRole::Hidden);
        assert_eq!(hidden, NeuronId(7));
        for (i, n) in pool.neuron_genes().enumerate() {
            assert_eq!(n.id(), NeuronId(i));
        }
        for (i, s) in pool.synapse_genes().enumerate() {
            assert_eq!(s.id(), SynapseId(i));
        }
        assert_eq!(pool.synapse_genes().last().map(|s| s.id()), Some(SynapseId(11)));
    }

    proptest! {
        #[test]
        fn minted_ids_are_unique(layers in proptest::collection::vec(0usize..6, 1..40)) {
            let mut pool = GenePool::new();
            let ids: Vec<NeuronId> = layers
                .iter()
                .map(|&l| pool.add_neuron_gene(l, NeuronRole::Hidden))
                .collect();
            for w in ids.windows(2) {
                let _ = pool.add_synapse_gene(w[0], w[1]);
            }
            let neuron_ids: HashSet<_> = pool.neuron_genes().map(|n| n.id()).collect();
            let synapse_ids: HashSet<_> = pool.synapse_genes().map(|s| s.id()).collect();
            prop_assert_eq!(neuron_ids.len(), pool.neuron_count());
            prop_assert_eq!(synapse_ids.len(), pool.synapse_count());
            for s in pool.synapse_genes() {
                prop_assert!(pool.layer_of(s.from()).unwrap() < pool.layer_of(s.to()).unwrap());
            }
        }

        #[test]
        fn layer_insertion_shifts_exactly_the_upper_layers(
            layers in proptest::collection::vec(0usize..6, 1..30),
            index in 0usize..7,
        ) {
            let mut pool = GenePool::new();
            for &l in &layers {
                pool.add_neuron_gene(l, NeuronRole::Hidden);
            }
            let before: Vec<usize> = pool.neuron_genes().map(|n| n.layer()).collect();
            pool.add_layer(index);
            for (n, old) in pool.neuron_genes().zip(before) {
                if old >= index {
                    prop_assert_eq!(n.layer(), old + 1);
                } else {
                    prop_assert_eq!(n.layer(), old);
                }
            }
        }
    }
}
