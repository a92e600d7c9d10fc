//! External calendrical data providers

pub mod kasi;

pub use kasi::KasiClient;
