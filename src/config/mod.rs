pub mod adapter_config;
pub mod env;

pub use adapter_config::AdapterConfig;
pub use env::EnvConfig;
