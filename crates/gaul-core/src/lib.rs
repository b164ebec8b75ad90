//! Core data model and operator contract for population-based stochastic
//! optimization: the entity pool, the population container with its
//! id-ordered and rank-ordered views, the operator contract every
//! population binds, and the fitness statistics computed over a population.
//!
//! Concrete chromosome encodings, crossover/mutation operators, and
//! selection strategies are collaborators that live in separate crates
//! (`gaul-codecs`, `gaul-alters`, `gaul-selectors`) built against the traits
//! exported here.

pub mod fitness;
pub mod genome;
pub mod operators;
pub mod pool;
pub mod population;
pub mod prng;
pub mod ratio;
pub mod scheme;
pub mod stats;
pub mod thread_pool;

pub use fitness::Fitness;
pub use genome::{Chromosome, Entity, EntityId, Gene, Genotype, Valid};
pub use operators::{
    Adapt, Crossover, Evaluate, GenerationHook, IterationHook, Mutate, Replace, Seed, SelectOne,
    SelectTwo,
};
pub use pool::EntityPool;
pub use population::Population;
pub use prng::Prng;
pub use ratio::Ratio;
pub use scheme::{AdaptPolicy, Elitism, Scheme};

pub use gaul_error::{GaulError, GaulResult};
