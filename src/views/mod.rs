// src/views/mod.rs

pub mod page;
