//! # sbol-plan
//!
//! A library for extracting DNA assembly plans from SBOL design documents.
//!
//! An SBOL (Synthetic Biology Open Language) design describes parts, each with a
//! nucleotide sequence, and constructs assembled from those parts. `sbol-plan`
//! turns such a document into the tables an assembly workflow needs.
//!
//! ## Features
//!
//! - **Part table**: part id -> uppercase sequence
//! - **Construct table**: construct id -> ordered part ids, in document order
//! - **Construct sequences**: part sequences concatenated per construct
//! - **SBOL 2 RDF/XML reader**: plain or gzipped files
//! - **FASTA export**: construct and part sequences
//!
//! ## Example
//!
//! ```rust,no_run
//! use sbol_plan::{extract_from_path, AssemblyPlan};
//! use std::path::Path;
//!
//! let plan: AssemblyPlan = extract_from_path(Path::new("design.xml")).unwrap();
//!
//! for (id, parts, sequence) in plan.constructs() {
//!     println!("{id}: {} ({} bp)", parts.join(" + "), sequence.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`assembly`]: Assembly plan extraction
//! - [`core`]: Document model, plan and ordered table types
//! - [`parsing`]: SBOL RDF/XML reader
//! - [`cli`]: Command-line interface implementation

pub mod assembly;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::assembly::{
    extract, extract_from_path, extract_with_config, AssemblyPlanExtractor, ExtractConfig,
    ExtractError, PlanSource,
};
pub use crate::core::document::{ComponentDefinition, Document, SequenceRecord, SubComponent};
pub use crate::core::plan::AssemblyPlan;
pub use crate::core::table::OrderedTable;
pub use crate::parsing::sbol::LoadError;
