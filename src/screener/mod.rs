// src/screener/mod.rs
pub mod client;
pub mod models;

pub use client::ScreenerClient;
