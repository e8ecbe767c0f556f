pub mod config;
pub mod interactive;
pub mod prompts;
pub mod search;
pub mod watched;
