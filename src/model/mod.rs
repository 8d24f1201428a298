pub mod world;

pub use world::{WorldAction, WorldModel};
