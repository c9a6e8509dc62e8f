//! Load, query, edit and save INI configuration files.
//!
//! ```
//! use inistore::Document;
//!
//! let mut doc: Document = "[Developer]\nname=Alice\n".parse().unwrap();
//! assert_eq!(doc.get("Developer", "name").unwrap(), "Alice");
//!
//! doc.insert_section("Tools");
//! doc.set("Tools", "editor", "vim").unwrap();
//! assert_eq!(doc.to_string(), "[developer]\nname=Alice\n[tools]\neditor=vim\n");
//! ```

pub mod document;
pub mod error;
pub mod line;
mod parser;
mod writer;

pub use document::{Document, Section};
pub use error::{IniError, LineFault, ParseError, Result};
