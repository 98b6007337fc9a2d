// src/handlers/mod.rs

pub mod articles;
pub mod pages;
pub mod system;
pub mod users;
