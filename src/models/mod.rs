// src/models/mod.rs

pub mod article;
pub mod user;
