// src/handlers/mod.rs

pub mod generate;
pub mod page;
pub mod quiz;
pub mod session;
pub mod upload;
