use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::GenePoolError;
use crate::gene::{NeuronId, SynapseId};
use crate::genome::Genome;
use crate::pool::GenePool;

/// Directed graph of a genome: one node per neuron gene, one edge per
/// synapse gene, pointing from the lower layer to the higher one.
pub fn build_topology_graph(
    genome: &Genome,
    pool: &GenePool,
) -> Result<DiGraph<NeuronId, SynapseId>, GenePoolError> {
    let mut graph = DiGraph::new();
    let nodes: HashMap<NeuronId, NodeIndex> = genome
        .all_neuron_genes()
        .into_iter()
        .map(|id| (id, graph.add_node(id)))
        .collect();

    for &id in genome.synapse_genes() {
        let synapse = pool.synapse(id).ok_or(GenePoolError::UnknownSynapse(id))?;
        let from = nodes
            .get(&synapse.from())
            .ok_or(GenePoolError::UnknownNeuron(synapse.from()))?;
        let to = nodes
            .get(&synapse.to())
            .ok_or(GenePoolError::UnknownNeuron(synapse.to()))?;
        graph.add_edge(*from, *to, id);
    }
    Ok(graph)
}

/// Neurons of `genome` grouped by layer, lowest layer first. Evaluating the
/// groups in order respects every synapse. Empty layers are skipped.
pub fn layered_neurons(
    genome: &Genome,
    pool: &GenePool,
) -> Result<Vec<Vec<NeuronId>>, GenePoolError> {
    let mut layers: BTreeMap<usize, Vec<NeuronId>> = BTreeMap::new();
    for id in genome.all_neuron_genes() {
        layers.entry(pool.layer_of(id)?).or_default().push(id);
    }
    Ok(layers.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::mutate;
    use petgraph::algo::{is_cyclic_directed, toposort};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn graph_counts_match_genome() {
        let pool = GenePool::fully_connected(3, 2);
        let genome = Genome::from_pool(&pool);
        let graph = build_topology_graph(&genome, &pool).unwrap();
        assert_eq!(graph.node_count(), genome.neuron_count());
        assert_eq!(graph.edge_count(), genome.synapse_count());
    }

    #[test]
    fn grown_genome_stays_acyclic_and_layer_ordered() {
        let mut pool = GenePool::fully_connected(2, 2);
        let mut genome = Genome::from_pool(&pool);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..40 {
            mutate(&mut genome, 0.8, 0.5, &mut pool, &mut rng).unwrap();
        }

        let graph = build_topology_graph(&genome, &pool).unwrap();
        assert!(!is_cyclic_directed(&graph));
        assert!(toposort(&graph, None).is_ok());

        let layers = layered_neurons(&genome, &pool).unwrap();
        let total: usize = layers.iter().map(Vec::len).sum();
        assert_eq!(total, genome.neuron_count());
        let rank: HashMap<NeuronId, usize> = layers
            .iter()
            .enumerate()
            .flat_map(|(i, group)| group.iter().map(move |&n| (n, i)))
            .collect();
        for edge in graph.raw_edges() {
            let from = graph[edge.source()];
            let to = graph[edge.target()];
            assert!(rank[&from] < rank[&to]);
        }
    }
}
