//! Built-in chromosome encodings and seed operators: bit strings, bounded
//! integers, bounded reals, and printable-character strings, plus a
//! text-based population dump/load pair for persisting a run's genetic
//! state to disk.

pub mod bit;
pub mod char;
pub mod dump;
pub mod int;
pub mod real;
pub mod seed;

pub use bit::{BitChromosome, BitGene};
pub use char::{CharChromosome, CharGene};
pub use dump::{dump_population, parse_population_dump, restore_into, DumpedEntity, PopulationDump};
pub use int::{IntChromosome, IntGene};
pub use real::{RealChromosome, RealGene};
pub use seed::{BitSeed, CharSeed, IntSeed, RealSeed};
