//! PDF rendering modules
//!
//! This module handles all PDF-specific output operations:
//! - Creating Form XObjects from source pages
//! - Building output sheets with transformed page placements
//! - Deep copying PDF objects between documents

mod sheet;
mod xobject;

pub use sheet::OutputDocument;
pub use xobject::{copy_object_deep, create_page_xobject};
