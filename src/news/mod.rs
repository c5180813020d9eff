// src/news/mod.rs
pub mod client;
pub mod models;

pub use client::NewsClient;
