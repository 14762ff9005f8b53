pub mod config;
pub mod km;
pub mod plotting;
