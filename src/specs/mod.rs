// src/specs/mod.rs
//! # Page "specs"
//!
//! One module per controller page. Each page module knows the **row shape** of its
//! page's table and turns cell texts into a typed record.
//!
//! ## What lives here
//! - Column layout per page (which cell is the reference, the value, ...).
//! - The record types and their derived keys (e.g. the alarm id).
//! - Page-local ordering rules (signals are sorted by code; alarms are not).
//!
//! ## What does **not** live here
//! - Networking and login (`session`).
//! - Walking the HTML table (`engine::table`); specs only map rows.
//! - Writing logs (`file`) or deciding what is new (`engine::detect`).
//!
//! ## Typical call chain
//! ```text
//! runner → session.fetch(url) → specs::<page>::parse(html, url)
//!                                  ↘ engine::table::extract_table(.., row mapper)
//! ```
//!
//! ## Testing notes
//! Specs are pure: test them offline against captured HTML.
pub mod alarms;
pub mod signals;
