pub mod field_extractor;
pub mod guest_config_parser;
pub mod host_probe;
