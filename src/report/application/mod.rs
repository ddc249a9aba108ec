pub mod output_target;
pub mod service;
