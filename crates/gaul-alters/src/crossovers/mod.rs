pub mod multipoint;
pub mod uniform;

pub use multipoint::MultiPointCrossover;
pub use uniform::UniformCrossover;
