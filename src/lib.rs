pub mod cli;
pub mod clipboard;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod session;
pub mod vault;
