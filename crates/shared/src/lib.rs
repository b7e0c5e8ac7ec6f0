pub mod config;
mod config_env;
pub mod inputs;
pub mod llm;
pub mod models;
pub mod pages;
pub mod reference;
pub mod risk;
pub mod session;
pub mod symptoms;
pub mod upload;
pub mod vitals;
