pub mod invert;
pub mod swap;
pub mod uniform;

pub use invert::InversionMutator;
pub use swap::SwapMutator;
pub use uniform::UniformMutator;
