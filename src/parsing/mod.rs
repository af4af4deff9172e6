//! Readers that turn design files into a [`Document`](crate::core::Document).
//!
//! - **SBOL 2 RDF/XML** (`.xml`, `.sbol`, optionally gzipped): see [`sbol`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use sbol_plan::parsing::sbol::{parse_sbol_file, parse_sbol_text};
//! use std::path::Path;
//!
//! // Parse from a file
//! let doc = parse_sbol_file(Path::new("design.xml")).unwrap();
//!
//! // Or from raw RDF/XML text
//! let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
//! let doc = parse_sbol_text(xml).unwrap();
//! ```
//!
//! ## Extracted fields
//!
//! | Element | Field | Required |
//! |---------|-------|----------|
//! | `Sequence` | `displayId` | Yes |
//! | `Sequence` | `elements` | No (empty) |
//! | `ComponentDefinition` | `displayId` | Yes |
//! | `ComponentDefinition/component/Component` | `displayId` | Yes |

pub mod sbol;
