mod chromosome;
mod entity;
mod gene;
mod genotype;

pub use chromosome::Chromosome;
pub use entity::{Entity, EntityId};
pub use gene::{Gene, Valid};
pub use genotype::Genotype;
