// src/models/mod.rs

pub mod document;
pub mod generation;
pub mod quiz;
