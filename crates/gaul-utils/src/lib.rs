mod arena;
mod registry;

pub use arena::{Slab, SlabKey};
pub use registry::{Handle, HandleTable};
