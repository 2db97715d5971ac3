pub mod card;
pub mod game;
pub mod rng;
pub mod simulation;
pub mod telemetry;
