//! Core data types for assembly plan extraction.
//!
//! - [`Document`]: the parsed SBOL records the extractor reads
//!   ([`SequenceRecord`], [`ComponentDefinition`], [`SubComponent`])
//! - [`AssemblyPlan`]: the derived part, construct and sequence tables
//! - [`OrderedTable`]: insertion-ordered table backing the construct outputs
//!
//! ## Identifier conventions
//!
//! | Record | Display identifier | Key in the plan |
//! |--------|--------------------|-----------------|
//! | Sequence | `A_sequence` | `A` |
//! | Sub-component | `A01` | `A` (last 2 characters dropped) |
//! | Component definition | `X1` | `X1` |

pub mod document;
pub mod plan;
pub mod table;

pub use document::{ComponentDefinition, Document, SequenceRecord, SubComponent};
pub use plan::AssemblyPlan;
pub use table::OrderedTable;
