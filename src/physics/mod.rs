pub mod forces;
pub mod world;

pub use world::{Pad, World};
