pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod models;
pub mod moderation;
pub mod services;
pub mod vector_index;
pub mod web;

pub mod env;
pub mod error;
pub mod logging;

pub use error::{RecallChatError, Result};
pub use logging::{init_logging, LoggingConfig};
