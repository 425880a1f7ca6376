pub mod config;
pub mod logging;
pub mod parser;
pub mod repository;
pub mod update;
pub mod version;
