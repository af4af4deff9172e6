//! Fasta command - write derived sequences as FASTA using noodles.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use noodles::fasta;
use tracing::info;

use crate::cli::plan::load_plan;
use crate::cli::ConventionArgs;
use crate::core::plan::AssemblyPlan;

/// Arguments for the fasta command
#[derive(Args)]
pub struct FastaArgs {
    /// SBOL RDF/XML file (optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write part sequences, after the constructs
    #[arg(long)]
    pub parts: bool,

    /// Bases per line
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u16).range(1..))]
    pub line_width: u16,

    #[command(flatten)]
    pub conventions: ConventionArgs,
}

/// Execute the fasta command
///
/// # Errors
///
/// Returns an error if the plan cannot be derived or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FastaArgs, verbose: bool) -> anyhow::Result<()> {
    let plan = load_plan(&args.input, &args.conventions, verbose)?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let written = write_fasta(sink, &plan, args.parts, usize::from(args.line_width))?;

    if let Some(path) = &args.output {
        info!(records = written, path = %path.display(), "Wrote FASTA");
    }
    Ok(())
}

/// Write construct sequences (then part sequences if requested), returning the record count
fn write_fasta<W: Write>(
    sink: W,
    plan: &AssemblyPlan,
    include_parts: bool,
    line_width: usize,
) -> io::Result<usize> {
    let mut writer = fasta::io::writer::Builder::default()
        .set_line_base_count(line_width)
        .build_with_writer(sink);

    let mut count = 0;
    for (id, _, sequence) in plan.constructs() {
        writer.write_record(&fasta_record(id, sequence))?;
        count += 1;
    }

    if include_parts {
        for id in plan.sorted_part_ids() {
            writer.write_record(&fasta_record(id, &plan.part_sequences[id]))?;
            count += 1;
        }
    }

    writer.get_mut().flush()?;
    Ok(count)
}

fn fasta_record(name: &str, sequence: &str) -> fasta::Record {
    let definition = fasta::record::Definition::new(name.as_bytes().to_vec(), None);
    let sequence = fasta::record::Sequence::from(sequence.as_bytes().to_vec());
    fasta::Record::new(definition, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{ComponentDefinition, Document, SequenceRecord};

    fn example_plan() -> AssemblyPlan {
        let doc = Document::new()
            .with_sequence(SequenceRecord::new("A_sequence", "att"))
            .with_sequence(SequenceRecord::new("B_sequence", "GGC"))
            .with_component_definition(
                ComponentDefinition::new("X1").with_components(["A01", "B02"]),
            );
        crate::assembly::extract(&doc).unwrap()
    }

    #[test]
    fn test_write_constructs_only() {
        let mut out = Vec::new();
        let count = write_fasta(&mut out, &example_plan(), false, 60).unwrap();

        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap(), ">X1\nATTGGC\n");
    }

    #[test]
    fn test_write_with_parts_and_wrapping() {
        let mut out = Vec::new();
        let count = write_fasta(&mut out, &example_plan(), true, 4).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">X1\nATTG\nGC\n>A\nATT\n>B\nGGC\n"
        );
    }
}
