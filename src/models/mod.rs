// src/models/mod.rs

pub mod markup;
pub mod security;
