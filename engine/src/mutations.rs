use rand::{Rng, RngCore};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::MutationRates;
use crate::error::GenePoolError;
use crate::gene::{NeuronId, NeuronRole, SynapseId};
use crate::genome::Genome;
use crate::pool::GenePool;

/// What a call to [`mutate`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    /// Synapse gene newly added to the genome, whether minted or reused.
    pub added_synapse: Option<SynapseId>,
    /// Hidden neuron gene created by splitting a synapse.
    pub added_neuron: Option<NeuronId>,
}

/// Run the two structural mutation trials on `genome`.
///
/// With probability `synapse_rate` two distinct neurons of the genome are
/// drawn and connected; with probability `neuron_rate` one of its synapses
/// is split. Both trials are always drawn, so either, both or neither may
/// fire. A trial with nothing to act on (fewer than two neurons, no
/// synapses) does nothing.
pub fn mutate(
    genome: &mut Genome,
    synapse_rate: f64,
    neuron_rate: f64,
    pool: &mut GenePool,
    rng: &mut dyn RngCore,
) -> Result<MutationOutcome, GenePoolError> {
    let mut outcome = MutationOutcome::default();

    if rng.gen::<f64>() < synapse_rate {
        let neurons = genome.all_neuron_genes();
        if neurons.len() >= 2 {
            let first = rng.gen_range(0..neurons.len());
            let mut second = rng.gen_range(0..neurons.len() - 1);
            if second >= first {
                second += 1;
            }
            outcome.added_synapse =
                mutate_add_synapse(genome, neurons[first], neurons[second], pool)?;
        }
    }

    if rng.gen::<f64>() < neuron_rate && genome.synapse_count() > 0 {
        let synapses = genome.synapse_genes();
        let target = synapses[rng.gen_range(0..synapses.len())];
        outcome.added_neuron = mutate_add_neuron(genome, target, pool)?;
    }

    Ok(outcome)
}

/// [`mutate`] driven by the structural rates of a [`MutationRates`] record.
pub fn mutate_with_rates(
    genome: &mut Genome,
    rates: &MutationRates,
    pool: &mut GenePool,
    rng: &mut dyn RngCore,
) -> Result<MutationOutcome, GenePoolError> {
    mutate(genome, rates.new_synapse, rates.new_neuron, pool, rng)
}

/// Connect neurons `a` and `b` in `genome`, lower layer first.
///
/// The pool is consulted first so two genomes making the same connection end
/// up sharing one gene. Returns the synapse added to the genome, or `None`
/// when either neuron is not part of the genome, both neurons share a layer,
/// or the genome already has the edge.
pub fn mutate_add_synapse(
    genome: &mut Genome,
    a: NeuronId,
    b: NeuronId,
    pool: &mut GenePool,
) -> Result<Option<SynapseId>, GenePoolError> {
    if !genome.contains_neuron_gene(a) || !genome.contains_neuron_gene(b) {
        trace!(%a, %b, "synapse endpoint not in genome");
        return Ok(None);
    }
    let layer_a = pool.layer_of(a)?;
    let layer_b = pool.layer_of(b)?;
    if layer_a == layer_b {
        trace!(%a, %b, layer = layer_a, "same-layer synapse skipped");
        return Ok(None);
    }

    let id = match pool.get_synapse_gene(a, b) {
        Some(existing) => {
            if genome.contains_synapse_gene(existing) {
                return Ok(None);
            }
            debug!(synapse = %existing, "reusing synapse innovation");
            existing
        }
        None => pool.add_synapse_gene(a, b)?,
    };
    let gene = pool.synapse(id).ok_or(GenePoolError::UnknownSynapse(id))?;
    genome.add_synapse_gene(gene);
    Ok(Some(id))
}

/// Split synapse `target` of `genome` with a new hidden neuron.
///
/// When the edge joins adjacent layers a layer is inserted in the pool first,
/// which moves every neuron above the source up by one for all genomes. The
/// old edge leaves this genome only. Returns the new neuron, or `None` when
/// `target` is not part of the genome.
pub fn mutate_add_neuron(
    genome: &mut Genome,
    target: SynapseId,
    pool: &mut GenePool,
) -> Result<Option<NeuronId>, GenePoolError> {
    if !genome.contains_synapse_gene(target) {
        trace!(synapse = %target, "split target not in genome");
        return Ok(None);
    }
    let synapse = pool
        .synapse(target)
        .ok_or(GenePoolError::UnknownSynapse(target))?;
    let (from, to) = (synapse.from(), synapse.to());
    let new_layer = pool.layer_of(from)? + 1;

    if pool.synapse_length(target)? == 1 {
        pool.add_layer(new_layer);
    }
    genome.remove_synapse_gene(target);

    let hidden = pool.add_neuron_gene(new_layer, NeuronRole::Hidden);
    let first = pool.add_synapse_gene(from, hidden)?;
    let second = pool.add_synapse_gene(hidden, to)?;
    for id in [first, second] {
        genome.adopt_synapse(pool, id)?;
    }
    debug!(synapse = %target, neuron = %hidden, layer = new_layer, "split synapse");
    Ok(Some(hidden))
}

impl Genome {
    /// See [`mutate`].
    pub fn mutate(
        &mut self,
        synapse_rate: f64,
        neuron_rate: f64,
        pool: &mut GenePool,
        rng: &mut dyn RngCore,
    ) -> Result<MutationOutcome, GenePoolError> {
        mutate(self, synapse_rate, neuron_rate, pool, rng)
    }

    /// See [`mutate_add_synapse`].
    pub fn mutate_add_synapse(
        &mut self,
        a: NeuronId,
        b: NeuronId,
        pool: &mut GenePool,
    ) -> Result<Option<SynapseId>, GenePoolError> {
        mutate_add_synapse(self, a, b, pool)
    }

    /// See [`mutate_add_neuron`].
    pub fn mutate_add_neuron(
        &mut self,
        target: SynapseId,
        pool: &mut GenePool,
    ) -> Result<Option<NeuronId>, GenePoolError> {
        mutate_add_neuron(self, target, pool)
    }
}
