//! Command-line interface for sbol-plan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **plan**: Print the assembly plan (parts, constructs, sequences) of an SBOL file
//! - **fasta**: Write construct (and optionally part) sequences as FASTA
//!
//! ## Usage
//!
//! ```text
//! # Summarise the assembly plan
//! sbol-plan plan design.xml
//!
//! # JSON output for scripting
//! sbol-plan plan design.xml --format json
//!
//! # Construct sequences as FASTA
//! sbol-plan fasta design.xml -o constructs.fa
//! ```

use clap::{Parser, Subcommand};

use crate::assembly::ExtractConfig;
use crate::utils::validation::{PART_SEQUENCE_SUFFIX, SUBCOMPONENT_SUFFIX_LEN};

pub mod fasta;
pub mod plan;

#[derive(Parser)]
#[command(name = "sbol-plan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Extract DNA assembly plans from SBOL documents")]
#[command(
    long_about = "sbol-plan reads an SBOL design document and derives its assembly plan:\n- the sequence of every part\n- the ordered parts of every construct\n- the full sequence of every construct, concatenated from its parts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the assembly plan of an SBOL document
    Plan(plan::PlanArgs),

    /// Write construct sequences as FASTA
    Fasta(fasta::FastaArgs),
}

/// Identifier conventions shared by all commands
#[derive(clap::Args, Debug, Clone)]
pub struct ConventionArgs {
    /// Suffix stripped from sequence display ids to obtain part ids
    #[arg(long, default_value = PART_SEQUENCE_SUFFIX)]
    pub part_suffix: String,

    /// Number of trailing characters stripped from sub-component display ids
    #[arg(long, default_value_t = SUBCOMPONENT_SUFFIX_LEN)]
    pub suffix_len: usize,
}

impl ConventionArgs {
    #[must_use]
    pub fn to_config(&self) -> ExtractConfig {
        ExtractConfig {
            part_suffix: self.part_suffix.clone(),
            subcomponent_suffix_len: self.suffix_len,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
