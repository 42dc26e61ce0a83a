pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod lookup;
pub mod pipeline;
