// src/prices/mod.rs
pub mod client;
pub mod models;

pub use client::PriceClient;
