//! Assembly plan extraction.
//!
//! [`AssemblyPlanExtractor`] derives three tables from a [`Document`](crate::core::Document)
//! in one pass:
//!
//! 1. **Part sequences**: each `Sequence` record keyed by its display id minus the
//!    `_sequence` suffix, with the nucleotide string uppercased
//! 2. **Construct parts**: each component definition that has sub-components,
//!    mapped to its sub-component ids minus their 2-character positional suffix
//! 3. **Construct sequences**: the part sequences of each construct concatenated
//!    in declared order
//!
//! Both construct tables keep the document's component-definition order. A
//! construct that references a part with no sequence is an error; nothing is
//! silently skipped.
//!
//! ## Example
//!
//! ```rust
//! use sbol_plan::assembly::extract;
//! use sbol_plan::core::{ComponentDefinition, Document, SequenceRecord};
//!
//! let doc = Document::new()
//!     .with_sequence(SequenceRecord::new("A_sequence", "att"))
//!     .with_sequence(SequenceRecord::new("B_sequence", "GGC"))
//!     .with_component_definition(ComponentDefinition::new("X1").with_components(["A01", "B02"]));
//!
//! let plan = extract(&doc).unwrap();
//! assert_eq!(plan.part_sequences["A"], "ATT");
//! assert_eq!(plan.construct_parts.get("X1").unwrap(), &["A", "B"]);
//! assert_eq!(plan.construct_sequences.get("X1").unwrap(), "ATTGGC");
//! ```

pub mod extractor;

pub use extractor::{
    extract, extract_from_path, extract_with_config, AssemblyPlanExtractor, ExtractConfig,
    ExtractError, PlanSource,
};
