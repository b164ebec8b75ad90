//! Population-based stochastic optimization: entity pools, the generic
//! operator contract, built-in encodings and operators, and the engines
//! that drive a population through generations.
//!
//! Re-exports the whole public surface of the collaborator crates so most
//! callers need only `use gaul::*;`.

pub use gaul_alters::*;
pub use gaul_archipelago as archipelago;
pub use gaul_codecs::*;
pub use gaul_core::*;
pub use gaul_engines as engines;
pub use gaul_registry::PopulationRegistry;
pub use gaul_selectors::*;
