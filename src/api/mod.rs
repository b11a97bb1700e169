pub mod client;
pub mod error;

pub use client::ApiClient;
