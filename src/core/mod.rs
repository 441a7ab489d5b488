pub mod aggregator;
pub mod content_reader;
pub mod copy_action;
pub mod path_resolver;
pub mod policy;
pub mod reporter;
pub mod stats;
