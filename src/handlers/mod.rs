// src/handlers/mod.rs

pub mod health;
pub mod markup;
pub mod security;
