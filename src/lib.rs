// src/lib.rs
// ROF Reader Library - Public API

//! # ROF Reader
//!
//! A Rust library for reading `.rof` waveform recordings written by Rigol
//! DP800-series bench power supplies.
//!
//! ## Features
//!
//! - Decode the fixed ROF header, including the raw checksum fields
//! - Resolve the channel layout from the model code
//! - Convert raw samples to volts and amperes
//! - Synthesize the elapsed-time column from the sample period
//! - Export the table as `;`-separated text
//!
//! Checksums are read but never verified.
//!
//! ## Example
//!
//! ```no_run
//! use rof_reader::RofFile;
//!
//! let rof = RofFile::open("capture.rof").expect("Failed to load file");
//!
//! println!("Model: {}", rof.header().model.label);
//! println!("Points: {}", rof.header().points);
//!
//! // Voltage and current of the first channel
//! if let Some((voltage, current)) = rof.channel(0) {
//!     println!("First sample: {} V, {} A", voltage[0], current[0]);
//! }
//!
//! rof.write_csv("output.csv").expect("Failed to write table");
//! ```

mod decoder;
mod error;
mod grid;
mod header;
mod models;
mod rof_tools;

pub use decoder::{
    assemble_table, convert_units, decode, decode_samples, time_axis, ByteCursor, SAMPLE_BYTES,
    VOLTS_AMPERES_COEFF,
};
pub use error::{Result, RofError};
pub use grid::{Grid, SampleTable};
pub use header::{RofHeader, HEADER_SIZE};
pub use models::{resolve_model, ModelLayout, MODELS};
pub use rof_tools::{format_row, RofFile, CSV_SEPARATOR};
