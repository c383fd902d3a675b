use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GenePoolError, GenomeError};
use crate::gene::{NeuronGene, NeuronId, NeuronRole, SynapseGene, SynapseId};
use crate::pool::GenePool;

/// One individual's topology: a subset of the genes held by a [`GenePool`].
///
/// A genome only stores ids. Layers and endpoints are always read back
/// through the pool the ids were minted by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    inputs: Vec<NeuronId>,
    outputs: Vec<NeuronId>,
    hidden: Vec<NeuronId>,
    synapses: Vec<SynapseId>,
}

impl Genome {
    /// Create an empty genome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a genome holding every gene currently in `pool`.
    pub fn from_pool(pool: &GenePool) -> Self {
        let mut genome = Self::new();
        genome.initialize_genes(pool);
        genome
    }

    /// Add every synapse gene of `pool` together with its endpoints, then any
    /// neuron gene not reached by a synapse.
    pub fn initialize_genes(&mut self, pool: &GenePool) {
        for synapse in pool.synapse_genes() {
            self.add_synapse_gene(synapse);
            for end in [synapse.from(), synapse.to()] {
                if let Some(neuron) = pool.neuron(end) {
                    self.add_neuron_gene(neuron);
                }
            }
        }
        for neuron in pool.neuron_genes() {
            self.add_neuron_gene(neuron);
        }
    }

    /// Insert `gene` into the collection for its role. Returns `false` if a
    /// gene with the same id is already present.
    pub fn add_neuron_gene(&mut self, gene: &NeuronGene) -> bool {
        if self.contains_neuron_gene(gene.id()) {
            return false;
        }
        match gene.role() {
            NeuronRole::Input => self.inputs.push(gene.id()),
            NeuronRole::Output => self.outputs.push(gene.id()),
            NeuronRole::Hidden => self.hidden.push(gene.id()),
        }
        true
    }

    /// Insert `gene` into the synapse collection. Returns `false` if already
    /// present.
    pub fn add_synapse_gene(&mut self, gene: &SynapseGene) -> bool {
        if self.contains_synapse_gene(gene.id()) {
            return false;
        }
        self.synapses.push(gene.id());
        true
    }

    /// Add synapse `id` and both of its endpoint neurons.
    pub(crate) fn adopt_synapse(
        &mut self,
        pool: &GenePool,
        id: SynapseId,
    ) -> Result<(), GenePoolError> {
        let synapse = pool.synapse(id).ok_or(GenePoolError::UnknownSynapse(id))?;
        for end in [synapse.from(), synapse.to()] {
            let neuron = pool.neuron(end).ok_or(GenePoolError::UnknownNeuron(end))?;
            self.add_neuron_gene(neuron);
        }
        self.add_synapse_gene(synapse);
        Ok(())
    }

    /// Remove synapse `id` from this genome only. Returns `false` if absent.
    pub fn remove_synapse_gene(&mut self, id: SynapseId) -> bool {
        let before = self.synapses.len();
        self.synapses.retain(|&s| s != id);
        self.synapses.len() != before
    }

    pub fn contains_neuron_gene(&self, id: NeuronId) -> bool {
        self.inputs.contains(&id) || self.outputs.contains(&id) || self.hidden.contains(&id)
    }

    pub fn contains_synapse_gene(&self, id: SynapseId) -> bool {
        self.synapses.contains(&id)
    }

    /// Look up a synapse of this genome by id.
    pub fn synapse_gene_by_id(&self, id: SynapseId) -> Option<SynapseId> {
        self.synapses.iter().copied().find(|&s| s == id)
    }

    /// Inputs, then outputs, then hidden neurons.
    pub fn all_neuron_genes(&self) -> Vec<NeuronId> {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .chain(&self.hidden)
            .copied()
            .collect()
    }

    /// This genome's synapses followed by those of `other` not already seen.
    pub fn combine_synapse_genes_no_repeat(&self, other: &Genome) -> Vec<SynapseId> {
        let mut combined = self.synapses.clone();
        for &s in &other.synapses {
            if !combined.contains(&s) {
                combined.push(s);
            }
        }
        combined
    }

    /// This genome's neurons followed by those of `other` not already seen.
    pub fn combine_neuron_genes_no_repeat(&self, other: &Genome) -> Vec<NeuronId> {
        let mut combined = self.all_neuron_genes();
        for n in other.all_neuron_genes() {
            if !self.contains_neuron_gene(n) {
                combined.push(n);
            }
        }
        combined
    }

    /// Longest layer span among this genome's synapses, 0 when there are none.
    pub fn max_synapse_length(&self, pool: &GenePool) -> usize {
        self.synapses
            .iter()
            .filter_map(|&s| pool.synapse_length(s).ok())
            .max()
            .unwrap_or(0)
    }

    pub fn input_neuron_genes(&self) -> &[NeuronId] {
        &self.inputs
    }

    pub fn output_neuron_genes(&self) -> &[NeuronId] {
        &self.outputs
    }

    pub fn hidden_neuron_genes(&self) -> &[NeuronId] {
        &self.hidden
    }

    pub fn synapse_genes(&self) -> &[SynapseId] {
        &self.synapses
    }

    pub fn neuron_count(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.hidden.len()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// Check the genome against `pool`: no duplicate ids, every neuron in
    /// the collection for its role, every synapse feed-forward with both
    /// endpoints present.
    pub fn validate(&self, pool: &GenePool) -> Result<(), GenomeError> {
        let mut seen = HashSet::new();
        for (ids, role) in [
            (&self.inputs, NeuronRole::Input),
            (&self.outputs, NeuronRole::Output),
            (&self.hidden, NeuronRole::Hidden),
        ] {
            for &id in ids {
                if !seen.insert(id) {
                    return Err(GenomeError::DuplicateNeuron(id));
                }
                let gene = pool.neuron(id).ok_or(GenePoolError::UnknownNeuron(id))?;
                if gene.role() != role {
                    return Err(GenomeError::MisplacedNeuron(id));
                }
            }
        }

        let mut seen_synapses = HashSet::new();
        for &id in &self.synapses {
            if !seen_synapses.insert(id) {
                return Err(GenomeError::DuplicateSynapse(id));
            }
            let gene = pool.synapse(id).ok_or(GenePoolError::UnknownSynapse(id))?;
            for end in [gene.from(), gene.to()] {
                if !seen.contains(&end) {
                    return Err(GenomeError::DanglingSynapse {
                        synapse: id,
                        neuron: end,
                    });
                }
            }
            let from_layer = pool.layer_of(gene.from())?;
            let to_layer = pool.layer_of(gene.to())?;
            if from_layer >= to_layer {
                return Err(GenomeError::NotFeedForward {
                    synapse: id,
                    from_layer,
                    to_layer,
                });
            }
        }
        Ok(())
    }
}
