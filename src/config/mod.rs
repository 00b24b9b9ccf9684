// src/config/mod.rs

pub mod consts;
pub mod options;
pub mod vocab;

pub use options::AppOptions;
pub use vocab::Vocabulary;
