pub mod mongodb;
pub mod seed;

pub use mongodb::*;
pub use seed::*;
