//! Templates compiled by erbgen, together with their checked-in output.

use std::cell::Cell;
use std::io::{self, Write};

/// Page model rendered by `Layout.erb`
pub struct Model {
    pub title: String,
    pub items: Vec<String>,
    pub query: String,
    pub footer: String,
}

// +erb
pub type Layout = fn(writer: &mut dyn Write, model: &Model) -> io::Result<()>;

// Writes "one", the raw `first` value and "three", bumping `ticks` in between.
// +erb
pub type Trio = fn(writer: &mut dyn Write, first: &str, ticks: &Cell<u32>) -> io::Result<()>;

// +erbx
pub type Ignored = fn(writer: &mut dyn Write) -> io::Result<()>;

#[path = "greeting_gen.rs"]
mod greeting_gen;
pub use greeting_gen::*;
