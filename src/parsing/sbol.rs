//! Reader for SBOL 2 RDF/XML documents using quick-xml.
//!
//! Only the records an assembly plan needs are extracted:
//!
//! - top-level `Sequence` -> [`SequenceRecord`] (`displayId`, `elements`)
//! - top-level `ComponentDefinition` -> [`ComponentDefinition`] (`displayId`)
//! - `ComponentDefinition/component/Component` -> [`SubComponent`] (`displayId`)
//!
//! Elements are matched on local name, so any namespace prefix is accepted.
//! Everything else (annotations, constraints, module definitions, ...) is
//! skipped. Files ending in `.gz` or `.bgz` are decompressed on the fly.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

use crate::core::document::{ComponentDefinition, Document, SequenceRecord, SubComponent};
use crate::utils::validation::check_record_limit;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Invalid SBOL document: {0}")]
    InvalidFormat(String),
}

/// Depth of top-level records below `rdf:RDF`
const RECORD_DEPTH: usize = 1;

/// Depth of `Component` inside `ComponentDefinition/component`
const COMPONENT_DEPTH: usize = 3;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse an SBOL RDF/XML file
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, `LoadError::Xml` if it is
/// not well-formed XML, or `LoadError::InvalidFormat` if it is not an SBOL
/// RDF/XML document.
pub fn parse_sbol_file(path: &Path) -> Result<Document, LoadError> {
    let file = File::open(path)?;
    let mut text = String::new();
    if is_gzipped(path) {
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }

    let doc = parse_sbol_text(&text)?;
    debug!(
        path = %path.display(),
        sequences = doc.sequences.len(),
        component_definitions = doc.component_definitions.len(),
        "Loaded SBOL document"
    );
    Ok(doc)
}

/// Parse SBOL RDF/XML text
///
/// # Errors
///
/// Returns `LoadError::Xml` if the text is not well-formed XML, or
/// `LoadError::InvalidFormat` if the root is not `RDF`, a record lacks a
/// `displayId`, or the record limit is exceeded.
pub fn parse_sbol_text(xml: &str) -> Result<Document, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut state = ReaderState::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            LoadError::Xml(format!("at position {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => state.open(&e)?,
            Event::Empty(e) => {
                state.open(&e)?;
                state.close()?;
            }
            Event::End(_) => state.close()?,
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| LoadError::Xml(e.to_string()))?;
                state.text(&text);
            }
            Event::CData(c) => state.text(&String::from_utf8_lossy(&c.into_inner())),
            Event::Eof => break,
            _ => {}
        }
    }

    if !state.seen_root {
        return Err(LoadError::InvalidFormat(
            "no RDF root element found".to_string(),
        ));
    }
    Ok(state.doc)
}

/// Which field of the open record a text run belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SequenceId,
    SequenceElements,
    DefinitionId,
    ComponentId,
}

#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Default)]
struct PartialSequence {
    display_id: Option<String>,
    elements: String,
}

#[derive(Debug, Default)]
struct PartialDefinition {
    display_id: Option<String>,
    components: Vec<SubComponent>,
}

#[derive(Debug, Default)]
struct ReaderState {
    doc: Document,
    seen_root: bool,

    /// Local names of the currently open elements
    stack: Vec<Vec<u8>>,

    sequence: Option<PartialSequence>,
    definition: Option<PartialDefinition>,
    /// `Some(None)` while a `Component` is open without a `displayId` yet
    component: Option<Option<String>>,
    capture: Option<Capture>,
}

impl ReaderState {
    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), LoadError> {
        let local = e.local_name();
        let name = local.as_ref();
        let depth = self.stack.len();

        if depth == 0 {
            if name != b"RDF" {
                return Err(LoadError::InvalidFormat(format!(
                    "expected RDF root element, found '{}'",
                    String::from_utf8_lossy(name)
                )));
            }
            self.seen_root = true;
        } else if depth == RECORD_DEPTH {
            match name {
                b"Sequence" => self.sequence = Some(PartialSequence::default()),
                b"ComponentDefinition" => self.definition = Some(PartialDefinition::default()),
                _ => {}
            }
        } else if depth == COMPONENT_DEPTH
            && name == b"Component"
            && self.definition.is_some()
            && self.parent_is(b"component")
        {
            self.component = Some(None);
        } else {
            let field = match name {
                b"displayId" if depth == RECORD_DEPTH + 1 && self.sequence.is_some() => {
                    Some(Field::SequenceId)
                }
                b"elements" if depth == RECORD_DEPTH + 1 && self.sequence.is_some() => {
                    Some(Field::SequenceElements)
                }
                b"displayId" if depth == RECORD_DEPTH + 1 && self.definition.is_some() => {
                    Some(Field::DefinitionId)
                }
                b"displayId" if depth == COMPONENT_DEPTH + 1 && self.component.is_some() => {
                    Some(Field::ComponentId)
                }
                _ => None,
            };
            if let Some(field) = field {
                self.capture = Some(Capture {
                    field,
                    depth,
                    text: String::new(),
                });
            }
        }

        self.stack.push(name.to_vec());
        Ok(())
    }

    fn parent_is(&self, name: &[u8]) -> bool {
        self.stack.last().is_some_and(|parent| parent == name)
    }

    fn text(&mut self, text: &str) {
        if let Some(capture) = &mut self.capture {
            capture.text.push_str(text);
        }
    }

    fn close(&mut self) -> Result<(), LoadError> {
        if self.stack.pop().is_none() {
            return Err(LoadError::Xml("unbalanced closing tag".to_string()));
        }
        let depth = self.stack.len();

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.store(capture);
            }
        } else if depth == COMPONENT_DEPTH {
            if let Some(display_id) = self.component.take() {
                let display_id = display_id.ok_or_else(|| {
                    LoadError::InvalidFormat("Component without displayId".to_string())
                })?;
                if let Some(definition) = &mut self.definition {
                    definition.components.push(SubComponent { display_id });
                }
            }
        } else if depth == RECORD_DEPTH {
            self.finish_record()?;
        }
        Ok(())
    }

    fn store(&mut self, capture: Capture) {
        match capture.field {
            Field::SequenceId => {
                if let Some(seq) = &mut self.sequence {
                    seq.display_id = Some(capture.text);
                }
            }
            Field::SequenceElements => {
                if let Some(seq) = &mut self.sequence {
                    seq.elements = capture.text;
                }
            }
            Field::DefinitionId => {
                if let Some(def) = &mut self.definition {
                    def.display_id = Some(capture.text);
                }
            }
            Field::ComponentId => {
                if let Some(component) = &mut self.component {
                    *component = Some(capture.text);
                }
            }
        }
    }

    fn finish_record(&mut self) -> Result<(), LoadError> {
        let count = self.doc.sequences.len() + self.doc.component_definitions.len();

        if let Some(seq) = self.sequence.take() {
            if let Some(msg) = check_record_limit(count) {
                return Err(LoadError::InvalidFormat(msg));
            }
            let display_id = seq.display_id.ok_or_else(|| {
                LoadError::InvalidFormat("Sequence without displayId".to_string())
            })?;
            self.doc.sequences.push(SequenceRecord {
                display_id,
                elements: seq.elements,
            });
        }

        if let Some(def) = self.definition.take() {
            if let Some(msg) = check_record_limit(count) {
                return Err(LoadError::InvalidFormat(msg));
            }
            let display_id = def.display_id.ok_or_else(|| {
                LoadError::InvalidFormat("ComponentDefinition without displayId".to_string())
            })?;
            self.doc.component_definitions.push(ComponentDefinition {
                display_id,
                components: def.components,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SBOL_XML: &str = r#"<?xml version="1.0" ?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:sbol="http://sbols.org/v2#" xmlns:dcterms="http://purl.org/dc/terms/">
  <sbol:ComponentDefinition rdf:about="http://example.org/X1/1">
    <sbol:displayId>X1</sbol:displayId>
    <sbol:type rdf:resource="http://www.biopax.org/release/biopax-level3.owl#DnaRegion"/>
    <sbol:component>
      <sbol:Component rdf:about="http://example.org/X1/A01/1">
        <sbol:displayId>A01</sbol:displayId>
        <sbol:definition rdf:resource="http://example.org/A/1"/>
      </sbol:Component>
    </sbol:component>
    <sbol:sequenceAnnotation>
      <sbol:SequenceAnnotation rdf:about="http://example.org/X1/anno/1">
        <sbol:displayId>anno</sbol:displayId>
      </sbol:SequenceAnnotation>
    </sbol:sequenceAnnotation>
    <sbol:component>
      <sbol:Component rdf:about="http://example.org/X1/B02/1">
        <sbol:displayId>B02</sbol:displayId>
      </sbol:Component>
    </sbol:component>
  </sbol:ComponentDefinition>
  <sbol:Sequence rdf:about="http://example.org/A_sequence/1">
    <sbol:displayId>A_sequence</sbol:displayId>
    <sbol:elements>att</sbol:elements>
    <sbol:encoding rdf:resource="http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html"/>
  </sbol:Sequence>
  <sbol:ComponentDefinition rdf:about="http://example.org/A/1">
    <sbol:displayId>A</sbol:displayId>
    <dcterms:title>Part &amp; promoter</dcterms:title>
  </sbol:ComponentDefinition>
  <sbol:Sequence rdf:about="http://example.org/B_sequence/1">
    <sbol:displayId>B_sequence</sbol:displayId>
    <sbol:elements>GGC</sbol:elements>
  </sbol:Sequence>
</rdf:RDF>
"#;

    #[test]
    fn test_parse_sbol_text() {
        let doc = parse_sbol_text(SBOL_XML).unwrap();

        assert_eq!(
            doc.sequences,
            vec![
                SequenceRecord::new("A_sequence", "att"),
                SequenceRecord::new("B_sequence", "GGC"),
            ]
        );
        assert_eq!(doc.component_definitions.len(), 2);

        let x1 = &doc.component_definitions[0];
        assert_eq!(x1.display_id, "X1");
        let ids: Vec<&str> = x1.components.iter().map(|c| c.display_id.as_str()).collect();
        // SequenceAnnotation displayId is not a sub-component
        assert_eq!(ids, vec!["A01", "B02"]);

        let a = &doc.component_definitions[1];
        assert_eq!(a.display_id, "A");
        assert!(a.components.is_empty());
    }

    #[test]
    fn test_parse_unprefixed_default_namespace() {
        let xml = r#"<RDF xmlns="http://sbols.org/v2#">
  <Sequence><displayId>P_sequence</displayId><elements>ac</elements></Sequence>
</RDF>"#;
        let doc = parse_sbol_text(xml).unwrap();
        assert_eq!(doc.sequences, vec![SequenceRecord::new("P_sequence", "ac")]);
    }

    #[test]
    fn test_empty_elements_tag() {
        let xml = r#"<rdf:RDF xmlns:rdf="r" xmlns:sbol="s">
  <sbol:Sequence><sbol:displayId>E_sequence</sbol:displayId><sbol:elements/></sbol:Sequence>
</rdf:RDF>"#;
        let doc = parse_sbol_text(xml).unwrap();
        assert_eq!(doc.sequences[0].elements, "");
    }

    #[test]
    fn test_wrong_root_is_invalid() {
        let result = parse_sbol_text("<GBSet><GBSeq/></GBSet>");
        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert!(matches!(
            parse_sbol_text(""),
            Err(LoadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_display_id_is_invalid() {
        let xml = r#"<rdf:RDF xmlns:rdf="r" xmlns:sbol="s">
  <sbol:Sequence><sbol:elements>acgt</sbol:elements></sbol:Sequence>
</rdf:RDF>"#;
        let err = parse_sbol_text(xml).unwrap_err();
        assert!(err.to_string().contains("Sequence without displayId"));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = r#"<rdf:RDF xmlns:rdf="r"><sbol:Sequence></rdf:RDF>"#;
        assert!(matches!(parse_sbol_text(xml), Err(LoadError::Xml(_))));
    }

    #[test]
    fn test_parse_sbol_file_plain_and_gzipped() {
        let mut plain = NamedTempFile::with_suffix(".xml").unwrap();
        plain.write_all(SBOL_XML.as_bytes()).unwrap();
        plain.flush().unwrap();

        let mut gz = NamedTempFile::with_suffix(".xml.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(gz.as_file_mut(), Compression::default());
            encoder.write_all(SBOL_XML.as_bytes()).unwrap();
            encoder.finish().unwrap();
        }

        let from_plain = parse_sbol_file(plain.path()).unwrap();
        let from_gz = parse_sbol_file(gz.path()).unwrap();
        assert_eq!(from_plain, from_gz);
        assert_eq!(from_plain.sequences.len(), 2);
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_sbol_file(Path::new("/nonexistent/design.xml"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
