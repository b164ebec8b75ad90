//! Crossover and mutation operators built against `gaul-core`'s generic
//! `Chromosome`/`Gene` traits: each works for any concrete encoding, moving
//! or replacing whole genes without inspecting alleles.

pub mod crossovers;
pub mod mutators;

pub use crossovers::{MultiPointCrossover, UniformCrossover};
pub use mutators::{InversionMutator, SwapMutator, UniformMutator};
