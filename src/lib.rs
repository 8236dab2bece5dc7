pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod output;
pub mod session;
pub mod source;
pub mod upload;
