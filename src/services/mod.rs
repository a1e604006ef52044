// src/services/mod.rs

pub mod extractor;
pub mod quiz;
pub mod session;
pub mod session_store;
