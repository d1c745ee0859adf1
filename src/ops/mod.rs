pub mod controller;
pub mod placement;
