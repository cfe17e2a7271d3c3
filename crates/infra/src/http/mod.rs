//! HTTP transport shared by the API client and provider adapters

mod client;

pub use client::HttpClient;
