// src/lib.rs

//! Syntax highlighting for the Alakon toy language.
//!
//! `grammar` declares what Alakon tokens look like and converts that
//! declaration to and from the JSON object shapes host highlighting engines
//! load. `highlight` is a small host engine that scans text with a grammar,
//! and `render` turns the resulting spans into terminal or HTML output.

pub mod color;
pub mod config;
pub mod grammar;
pub mod highlight;
pub mod render;
pub mod style;

pub use grammar::{alakon, Category, GrammarDescriptor, GrammarOptions, HostShape, Preset};
pub use highlight::{Highlighter, Span};
