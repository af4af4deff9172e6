use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::document::Document;
use crate::core::plan::{AssemblyPlan, ConstructParts, ConstructSequences, PartSequences};
use crate::parsing::sbol::LoadError;
use crate::utils::validation::{
    part_key, strip_positional_suffix, ValidationError, PART_SEQUENCE_SUFFIX,
    SUBCOMPONENT_SUFFIX_LEN,
};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Construct '{construct}' references unknown part '{part}'")]
    MissingPart { construct: String, part: String },

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(#[from] ValidationError),

    #[error("Failed to load document: {0}")]
    DocumentLoad(#[from] LoadError),
}

/// Identifier conventions used to link sequences, parts and constructs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Suffix removed from sequence record identifiers to obtain part ids
    pub part_suffix: String,
    /// Number of trailing characters dropped from sub-component identifiers
    pub subcomponent_suffix_len: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            part_suffix: PART_SEQUENCE_SUFFIX.to_string(),
            subcomponent_suffix_len: SUBCOMPONENT_SUFFIX_LEN,
        }
    }
}

/// Where to take the document from
#[derive(Debug, Clone, Copy)]
pub enum PlanSource<'a> {
    /// An already parsed document
    Document(&'a Document),
    /// An SBOL file to load first
    Path(&'a Path),
}

impl<'a> From<&'a Document> for PlanSource<'a> {
    fn from(doc: &'a Document) -> Self {
        PlanSource::Document(doc)
    }
}

impl<'a> From<&'a Path> for PlanSource<'a> {
    fn from(path: &'a Path) -> Self {
        PlanSource::Path(path)
    }
}

/// Derives an [`AssemblyPlan`] from a document in a single pass
#[derive(Debug, Clone, Default)]
pub struct AssemblyPlanExtractor {
    config: ExtractConfig,
}

impl AssemblyPlanExtractor {
    /// Create an extractor with the default identifier conventions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extract a plan from either an in-memory document or a file
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::DocumentLoad` if a path cannot be loaded, plus any
    /// error from [`Self::extract`].
    pub fn extract_from(&self, source: PlanSource<'_>) -> Result<AssemblyPlan, ExtractError> {
        match source {
            PlanSource::Document(doc) => self.extract(doc),
            PlanSource::Path(path) => {
                let mut doc = Document::new();
                doc.read(path)?;
                self.extract(&doc)
            }
        }
    }

    /// Extract the assembly plan from a document.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::MalformedIdentifier` if an identifier cannot have
    /// its suffix removed, or `ExtractError::MissingPart` if a construct
    /// references a part with no sequence record.
    pub fn extract(&self, doc: &Document) -> Result<AssemblyPlan, ExtractError> {
        let part_sequences = self.part_sequences(doc)?;
        let pairs = self.construct_pairs(doc)?;

        // Every pair is resolved before duplicates collapse in the tables
        let mut resolved = Vec::with_capacity(pairs.len());
        for (construct, part_ids) in pairs {
            let sequence = concatenate_parts(&construct, &part_ids, &part_sequences)?;
            resolved.push((construct, part_ids, sequence));
        }

        let mut construct_parts = ConstructParts::new();
        let mut construct_sequences = ConstructSequences::new();
        for (construct, part_ids, sequence) in resolved {
            if construct_parts.insert(construct.as_str(), part_ids).is_some() {
                warn!(
                    construct = %construct,
                    "Duplicate construct identifier, keeping last part list"
                );
            }
            construct_sequences.insert(construct, sequence);
        }

        debug!(
            parts = part_sequences.len(),
            constructs = construct_parts.len(),
            "Extracted assembly plan"
        );

        Ok(AssemblyPlan {
            part_sequences,
            construct_parts,
            construct_sequences,
        })
    }

    fn part_sequences(&self, doc: &Document) -> Result<PartSequences, ExtractError> {
        let mut parts = HashMap::with_capacity(doc.sequences.len());
        for record in &doc.sequences {
            let key = part_key(&record.display_id, &self.config.part_suffix)?;
            if key == record.display_id {
                debug!(
                    sequence = %record.display_id,
                    suffix = %self.config.part_suffix,
                    "Sequence identifier lacks part suffix, using it unchanged"
                );
            }
            // Last record wins for duplicate keys
            if parts
                .insert(key.to_string(), record.elements.to_uppercase())
                .is_some()
            {
                warn!(part = %key, "Duplicate part identifier, keeping last sequence");
            }
        }
        Ok(parts)
    }

    /// `(construct_id, part_ids)` for every composite definition, in document order
    fn construct_pairs(
        &self,
        doc: &Document,
    ) -> Result<Vec<(String, Vec<String>)>, ExtractError> {
        let mut pairs = Vec::new();
        for definition in doc
            .component_definitions
            .iter()
            .filter(|d| d.is_composite())
        {
            let parts = definition
                .components
                .iter()
                .map(|c| {
                    strip_positional_suffix(&c.display_id, self.config.subcomponent_suffix_len)
                        .map(str::to_string)
                })
                .collect::<Result<Vec<_>, _>>()?;
            pairs.push((definition.display_id.clone(), parts));
        }
        Ok(pairs)
    }
}

/// Concatenate the sequences of `part_ids` in order
fn concatenate_parts(
    construct: &str,
    part_ids: &[String],
    parts: &PartSequences,
) -> Result<String, ExtractError> {
    let mut sequence = String::new();
    for part in part_ids {
        let part_seq = parts.get(part).ok_or_else(|| ExtractError::MissingPart {
            construct: construct.to_string(),
            part: part.clone(),
        })?;
        sequence.push_str(part_seq);
    }
    Ok(sequence)
}

/// Extract an assembly plan from a document with the default conventions
///
/// # Errors
///
/// See [`AssemblyPlanExtractor::extract`].
pub fn extract(doc: &Document) -> Result<AssemblyPlan, ExtractError> {
    AssemblyPlanExtractor::new().extract(doc)
}

/// Extract an assembly plan using explicit identifier conventions
///
/// # Errors
///
/// See [`AssemblyPlanExtractor::extract`].
pub fn extract_with_config(
    doc: &Document,
    config: ExtractConfig,
) -> Result<AssemblyPlan, ExtractError> {
    AssemblyPlanExtractor::with_config(config).extract(doc)
}

/// Load an SBOL file and extract its assembly plan
///
/// # Errors
///
/// See [`AssemblyPlanExtractor::extract_from`].
pub fn extract_from_path(path: &Path) -> Result<AssemblyPlan, ExtractError> {
    AssemblyPlanExtractor::new().extract_from(PlanSource::Path(path))
}
