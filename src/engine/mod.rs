// src/engine/mod.rs
pub mod detect;
pub mod table;

pub use detect::detect_new;
pub use table::extract_table;
