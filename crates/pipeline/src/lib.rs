pub mod engine;
pub mod error;
pub mod fcd;
pub mod network;
pub mod runner;
pub mod sumocfg;
pub mod trips;
pub mod xml;
