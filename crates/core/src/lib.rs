pub mod camera;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod simulation;
pub mod tracking;
