//! Topology-evolving genomes with a shared, id-based gene pool.
//!
//! A [`GenePool`] mints every neuron and synapse gene of a run and owns the
//! layer structure. [`Genome`]s reference pool genes by id, recombine through
//! [`crossover`] and grow through [`mutate`].

pub mod config;
pub mod crossover;
pub mod error;
pub mod gene;
pub mod genome;
pub mod mutations;
pub mod pool;
pub mod topology;

pub use config::{MutationPreset, MutationRates};
pub use crossover::crossover;
pub use error::{ConfigError, GenePoolError, GenomeError};
pub use gene::{NeuronGene, NeuronId, NeuronRole, SynapseGene, SynapseId};
pub use genome::Genome;
pub use mutations::{
    mutate, mutate_add_neuron, mutate_add_synapse, mutate_with_rates, MutationOutcome,
};
pub use pool::GenePool;
pub use topology::{build_topology_graph, layered_neurons};
