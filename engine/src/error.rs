use thiserror::Error;

use crate::gene::{NeuronId, SynapseId};

/// Errors raised by [`GenePool`](crate::GenePool) operations.
///
/// Only ids that were never minted by the pool (typically ids from a
/// different pool) or a same-layer edge request can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenePoolError {
    #[error("neuron gene {0} is not registered in this pool")]
    UnknownNeuron(NeuronId),
    #[error("synapse gene {0} is not registered in this pool")]
    UnknownSynapse(SynapseId),
    #[error("cannot connect {from} and {to}: both are on layer {layer}")]
    SameLayer {
        from: NeuronId,
        to: NeuronId,
        layer: usize,
    },
}

/// Invariant violations reported by [`Genome::validate`](crate::Genome::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    #[error("neuron gene {0} appears more than once")]
    DuplicateNeuron(NeuronId),
    #[error("synapse gene {0} appears more than once")]
    DuplicateSynapse(SynapseId),
    #[error("neuron gene {0} is stored in the wrong role collection")]
    MisplacedNeuron(NeuronId),
    #[error("synapse gene {synapse} references neuron {neuron} missing from the genome")]
    DanglingSynapse {
        synapse: SynapseId,
        neuron: NeuronId,
    },
    #[error("synapse gene {synapse} is not feed-forward ({from_layer} -> {to_layer})")]
    NotFeedForward {
        synapse: SynapseId,
        from_layer: usize,
        to_layer: usize,
    },
    #[error(transparent)]
    Pool(#[from] GenePoolError),
}

/// Errors raised while loading mutation-rate configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("mutation rate `{field}` must be within [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("unknown mutation preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid mutation rates JSON: {0}")]
    Json(#[from] serde_json::Error),
}
