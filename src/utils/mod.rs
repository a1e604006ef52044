// src/utils/mod.rs

pub mod html;
pub mod prompt;
pub mod session_cookie;
