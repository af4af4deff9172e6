//! Plan command - print the assembly plan derived from an SBOL document.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::assembly::AssemblyPlanExtractor;
use crate::cli::{ConventionArgs, OutputFormat};
use crate::core::document::Document;
use crate::core::plan::{sequence_md5, AssemblyPlan};

/// Arguments for the plan command
#[derive(Args)]
pub struct PlanArgs {
    /// SBOL RDF/XML file (optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Include the part table in text output
    #[arg(long)]
    pub show_parts: bool,

    #[command(flatten)]
    pub conventions: ConventionArgs,
}

/// Execute the plan command
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or the plan cannot be derived.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PlanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let plan = load_plan(&args.input, &args.conventions, verbose)?;

    match format {
        OutputFormat::Text => print_text(&args.input, &plan, args.show_parts),
        OutputFormat::Json => print_json(&plan)?,
        OutputFormat::Tsv => print!("{}", format_tsv(&plan)),
    }

    Ok(())
}

/// Load a document and derive its plan with the given conventions
pub(crate) fn load_plan(
    path: &Path,
    conventions: &ConventionArgs,
    verbose: bool,
) -> anyhow::Result<AssemblyPlan> {
    let doc = Document::from_path(path)?;
    if verbose {
        eprintln!(
            "Loaded {} sequences and {} component definitions from {}",
            doc.sequences.len(),
            doc.component_definitions.len(),
            path.display()
        );
    }

    let extractor = AssemblyPlanExtractor::with_config(conventions.to_config());
    Ok(extractor.extract(&doc)?)
}

fn print_text(path: &Path, plan: &AssemblyPlan, show_parts: bool) {
    println!("\nAssembly plan: {}", path.display());
    println!(
        "   {} parts, {} constructs",
        plan.part_count(),
        plan.construct_count()
    );

    if show_parts {
        println!("\nParts:");
        for id in plan.sorted_part_ids() {
            let seq = &plan.part_sequences[id];
            println!("   {id}\t{} bp", seq.chars().count());
        }
    }

    println!("\nConstructs:");
    for (id, parts, sequence) in plan.constructs() {
        println!(
            "   {id}: {} ({} bp)",
            parts.join(" + "),
            sequence.chars().count()
        );
    }
}

fn plan_json(plan: &AssemblyPlan) -> serde_json::Value {
    let parts: serde_json::Map<String, serde_json::Value> = plan
        .sorted_part_ids()
        .into_iter()
        .map(|id| {
            (
                id.to_string(),
                serde_json::Value::String(plan.part_sequences[id].clone()),
            )
        })
        .collect();

    let constructs: Vec<serde_json::Value> = plan
        .constructs()
        .map(|(id, part_ids, sequence)| {
            serde_json::json!({
                "id": id,
                "parts": part_ids,
                "sequence": sequence,
                "length": sequence.chars().count(),
                "md5": sequence_md5(sequence),
            })
        })
        .collect();

    serde_json::json!({
        "parts": parts,
        "constructs": constructs,
    })
}

fn print_json(plan: &AssemblyPlan) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&plan_json(plan))?);
    Ok(())
}

fn format_tsv(plan: &AssemblyPlan) -> String {
    let mut out = String::from("construct\tparts\tlength\tmd5\tsequence\n");
    for (id, parts, sequence) in plan.constructs() {
        out.push_str(&format!(
            "{id}\t{}\t{}\t{}\t{sequence}\n",
            parts.join(","),
            sequence.chars().count(),
            sequence_md5(sequence),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{ComponentDefinition, SequenceRecord};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DESIGN_XML: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:sbol="http://sbols.org/v2#">
  <sbol:ComponentDefinition>
    <sbol:displayId>X1</sbol:displayId>
    <sbol:component><sbol:Component><sbol:displayId>A01</sbol:displayId></sbol:Component></sbol:component>
    <sbol:component><sbol:Component><sbol:displayId>B02</sbol:displayId></sbol:Component></sbol:component>
  </sbol:ComponentDefinition>
  <sbol:Sequence><sbol:displayId>A_sequence</sbol:displayId><sbol:elements>att</sbol:elements></sbol:Sequence>
  <sbol:Sequence><sbol:displayId>B_sequence</sbol:displayId><sbol:elements>GGC</sbol:elements></sbol:Sequence>
</rdf:RDF>"#;

    fn example_plan() -> AssemblyPlan {
        let doc = Document::new()
            .with_sequence(SequenceRecord::new("A_sequence", "att"))
            .with_sequence(SequenceRecord::new("B_sequence", "GGC"))
            .with_component_definition(
                ComponentDefinition::new("X2").with_components(["B01"]),
            )
            .with_component_definition(
                ComponentDefinition::new("X1").with_components(["A01", "B02"]),
            );
        crate::assembly::extract(&doc).unwrap()
    }

    #[test]
    fn test_load_plan_from_file() {
        let mut file = NamedTempFile::with_suffix(".xml").unwrap();
        file.write_all(DESIGN_XML.as_bytes()).unwrap();
        file.flush().unwrap();

        let conventions = ConventionArgs {
            part_suffix: "_sequence".to_string(),
            suffix_len: 2,
        };
        let plan = load_plan(file.path(), &conventions, false).unwrap();
        assert_eq!(plan.construct_sequences.get("X1").unwrap(), "ATTGGC");
    }

    #[test]
    fn test_plan_json_keeps_construct_order() {
        let json = plan_json(&example_plan());

        let constructs = json["constructs"].as_array().unwrap();
        assert_eq!(constructs.len(), 2);
        assert_eq!(constructs[0]["id"], "X2");
        assert_eq!(constructs[1]["id"], "X1");
        assert_eq!(constructs[1]["parts"], serde_json::json!(["A", "B"]));
        assert_eq!(constructs[1]["sequence"], "ATTGGC");
        assert_eq!(constructs[1]["length"], 6);
        assert_eq!(constructs[1]["md5"], "68fbcc13240f0867b07123a5abff6b8b");
        assert_eq!(json["parts"]["A"], "ATT");
    }

    #[test]
    fn test_format_tsv() {
        let tsv = format_tsv(&example_plan());
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("construct\tparts"));
        assert!(lines[1].starts_with("X2\tB\t3\t"));
        assert!(lines[2].starts_with("X1\tA,B\t6\t"));
        assert!(lines[2].ends_with("\tATTGGC"));
    }
}
