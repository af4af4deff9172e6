use std::path::Path;

use crate::parsing::sbol::{parse_sbol_file, parse_sbol_text, LoadError};

/// A top-level SBOL `Sequence` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// `displayId` of the record, e.g. `pTet_sequence`
    pub display_id: String,

    /// Nucleotide string as written in the document (any case)
    pub elements: String,
}

impl SequenceRecord {
    pub fn new(display_id: impl Into<String>, elements: impl Into<String>) -> Self {
        Self {
            display_id: display_id.into(),
            elements: elements.into(),
        }
    }
}

/// A `Component` child of a component definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubComponent {
    pub display_id: String,
}

impl SubComponent {
    pub fn new(display_id: impl Into<String>) -> Self {
        Self {
            display_id: display_id.into(),
        }
    }
}

/// A top-level SBOL `ComponentDefinition` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
    pub display_id: String,

    /// Sub-components in declared order (empty for elementary parts)
    pub components: Vec<SubComponent>,
}

impl ComponentDefinition {
    pub fn new(display_id: impl Into<String>) -> Self {
        Self {
            display_id: display_id.into(),
            components: Vec::new(),
        }
    }

    /// Builder: append sub-components by display identifier
    #[must_use]
    pub fn with_components<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components
            .extend(ids.into_iter().map(SubComponent::new));
        self
    }

    /// Whether this definition is assembled from other components
    #[must_use]
    pub fn is_composite(&self) -> bool {
        !self.components.is_empty()
    }
}

/// The subset of an SBOL document needed to derive an assembly plan.
///
/// Both collections keep the order in which records appear in the source
/// document; construct ordering in the derived plan follows
/// `component_definitions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sequences: Vec<SequenceRecord>,

    pub component_definitions: Vec<ComponentDefinition>,
}

impl Document {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate this document with the records of the SBOL file at `path`.
    ///
    /// Records are appended after any already present.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be read or is not SBOL RDF/XML.
    pub fn read(&mut self, path: &Path) -> Result<(), LoadError> {
        let parsed = parse_sbol_file(path)?;
        self.sequences.extend(parsed.sequences);
        self.component_definitions
            .extend(parsed.component_definitions);
        Ok(())
    }

    /// Load a document from an SBOL file
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be read or is not SBOL RDF/XML.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let mut doc = Self::new();
        doc.read(path)?;
        Ok(doc)
    }

    /// Parse a document from SBOL RDF/XML text
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the text is not SBOL RDF/XML.
    pub fn from_xml_str(xml: &str) -> Result<Self, LoadError> {
        parse_sbol_text(xml)
    }

    #[must_use]
    pub fn with_sequence(mut self, record: SequenceRecord) -> Self {
        self.sequences.push(record);
        self
    }

    #[must_use]
    pub fn with_component_definition(mut self, definition: ComponentDefinition) -> Self {
        self.component_definitions.push(definition);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty() && self.component_definitions.is_empty()
    }
}
