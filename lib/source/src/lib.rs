pub mod client;
pub mod error;
pub mod records;

pub use client::RestSource;
pub use error::SourceError;
