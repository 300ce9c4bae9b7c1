pub mod client;
pub mod config;
pub mod error;

pub use client::RestCollection;
pub use config::ClientConfig;
pub use error::ApiError;
pub use error::Result;
