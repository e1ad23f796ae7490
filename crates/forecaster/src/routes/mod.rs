pub mod home;
pub mod predict;

pub use home::*;
pub use predict::*;
