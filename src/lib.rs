pub mod config;
pub mod erd;
