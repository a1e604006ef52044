// src/clients/mod.rs

pub mod inference;
