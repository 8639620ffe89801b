//! Furniture Configurator Library
//!
//! This library provides the furniture configuration engine: family
//! constraint tables, column-count validation, zone layouts with master
//! grid alignment, configuration fallback, and the shareable-link codec.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
