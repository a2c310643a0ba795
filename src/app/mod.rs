pub mod analysis;
pub mod ports;
pub mod runner;
