pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod skyline;
pub mod solver;
pub mod types;
