use rand::{Rng, RngCore};
use tracing::trace;

use crate::error::GenePoolError;
use crate::gene::SynapseId;
use crate::genome::Genome;
use crate::pool::GenePool;

/// Chance of inheriting a synapse gene carried by only one parent.
const P_INHERIT_UNMATCHED: f64 = 0.5;

/// Produce one offspring from `a` and `b`, aligning genes by id.
///
/// Synapses are visited in ascending order of their source layer (ties by
/// id). Genes carried by both parents are always inherited. A gene carried
/// by one parent is inherited on a coin flip, and only when its source
/// neuron is already part of the offspring; otherwise it is dropped.
/// Neither parent is modified.
pub fn crossover(
    a: &Genome,
    b: &Genome,
    pool: &GenePool,
    rng: &mut dyn RngCore,
) -> Result<Genome, GenePoolError> {
    let mut ordered: Vec<(usize, SynapseId)> = Vec::new();
    for id in a.combine_synapse_genes_no_repeat(b) {
        let synapse = pool.synapse(id).ok_or(GenePoolError::UnknownSynapse(id))?;
        ordered.push((pool.layer_of(synapse.from())?, id));
    }
    ordered.sort();

    let mut child = Genome::new();
    for (_, id) in ordered {
        if a.contains_synapse_gene(id) && b.contains_synapse_gene(id) {
            child.adopt_synapse(pool, id)?;
            continue;
        }
        if rng.gen::<f64>() >= P_INHERIT_UNMATCHED {
            trace!(synapse = %id, "unmatched synapse not inherited");
            continue;
        }
        let source = pool
            .synapse(id)
            .ok_or(GenePoolError::UnknownSynapse(id))?
            .from();
        if child.contains_neuron_gene(source) {
            child.adopt_synapse(pool, id)?;
        } else {
            trace!(synapse = %id, %source, "source neuron absent, synapse dropped");
        }
    }
    Ok(child)
}

impl Genome {
    /// See [`crossover`].
    pub fn crossover(
        a: &Genome,
        b: &Genome,
        pool: &GenePool,
        rng: &mut dyn RngCore,
    ) -> Result<Genome, GenePoolError> {
        crossover(a, b, pool, rng)
    }
}
