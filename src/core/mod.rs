// Core business logic module

pub mod config;
pub mod metrics;
pub mod report;
pub mod sampler;
