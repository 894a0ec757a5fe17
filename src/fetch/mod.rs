// src/fetch/mod.rs

pub mod pages;
pub mod urls;
