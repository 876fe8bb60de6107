// src/main.rs
// Command-line converter from ROF recordings to text tables

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;
use rof_reader::{RofError, RofFile};

/// Convert a Rigol power supply .rof recording to a ;-separated text table.
///
/// Each output line is one sample: elapsed time, then voltage and current
/// for every channel.
#[derive(Parser, Debug)]
#[command(name = "rof_reader")]
#[command(version)]
#[command(after_help = "Example:\n  rof_reader capture.rof > capture.csv")]
struct Cli {
    /// Path to the .rof file
    file: PathBuf,

    /// Write the table to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the decoded header as '# key: value' lines before the table
    #[arg(long)]
    print_head: bool,

    /// Log decoding details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // Usage errors exit here, before anything is decoded.
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let rof = match RofFile::open(&cli.file) {
        Ok(rof) => rof,
        Err(e) => {
            eprintln!("Error loading ROF file '{}': {}", cli.file.display(), e);
            process::exit(1);
        }
    };

    let result = match &cli.output {
        Some(path) => File::create(path)
            .map_err(RofError::from)
            .and_then(|file| write_output(&rof, BufWriter::new(file), cli.print_head))
            .map_err(|e| format!("Error writing '{}': {}", path.display(), e)),
        None => write_output(&rof, BufWriter::new(io::stdout().lock()), cli.print_head)
            .map_err(|e| format!("Error writing output: {}", e)),
    };

    if let Err(message) = result {
        eprintln!("{}", message);
        process::exit(1);
    }
}

fn write_output<W: Write>(rof: &RofFile, mut writer: W, print_head: bool) -> rof_reader::Result<()> {
    if print_head {
        rof.write_header(&mut writer)?;
    }
    rof.write_table(writer)
}
