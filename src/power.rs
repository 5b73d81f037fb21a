//! Client for the NASA POWER point API (daily and hourly temporal endpoints).

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod request;
pub mod response;
