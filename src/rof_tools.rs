// ROFReader Module
// Decoded ROF captures and their text export

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::decoder::decode;
use crate::error::Result;
use crate::grid::SampleTable;
use crate::header::RofHeader;

/// Separator between values of one output row
pub const CSV_SEPARATOR: &str = ";";

/// A fully decoded ROF capture.
#[derive(Debug, Clone)]
pub struct RofFile {
    file_path: String,
    header: RofHeader,
    table: SampleTable,
}

impl RofFile {
    /// Read and decode a ROF file from disk.
    ///
    /// The file handle is released before decoding starts.
    pub fn open<P: AsRef<Path>>(input_file: P) -> Result<Self> {
        let bytes = {
            let mut file_handle = File::open(&input_file)?;
            let mut buf = Vec::new();
            file_handle.read_to_end(&mut buf)?;
            buf
        };

        let mut rof = Self::from_bytes(&bytes)?;
        rof.file_path = input_file.as_ref().to_string_lossy().to_string();
        info!(
            "loaded {}: {} points, {} columns",
            rof.file_path,
            rof.table.num_rows(),
            rof.table.num_columns()
        );
        Ok(rof)
    }

    /// Decode a ROF image from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    /// Decode a ROF image already held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, table) = decode(bytes)?;
        Ok(RofFile {
            file_path: String::new(),
            header,
            table,
        })
    }

    /// Path the capture was loaded from; empty for in-memory sources.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn header(&self) -> &RofHeader {
        &self.header
    }

    pub fn table(&self) -> &SampleTable {
        &self.table
    }

    /// Consume the capture, keeping only its parts.
    pub fn into_parts(self) -> (RofHeader, SampleTable) {
        (self.header, self.table)
    }

    /// One output row: time, then voltage/current per channel.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.table.row(index)
    }

    /// Get time values for all rows
    pub fn time_values(&self) -> Vec<f64> {
        self.table.column(0).unwrap_or_default()
    }

    /// Voltage and current columns of a zero-based channel.
    pub fn channel(&self, channel: usize) -> Option<(Vec<f64>, Vec<f64>)> {
        if channel >= self.header.model.channels {
            return None;
        }
        let voltage = self.table.column(1 + channel * 2)?;
        let current = self.table.column(2 + channel * 2)?;
        Some((voltage, current))
    }

    /// Write the table as `;`-separated text, one row per line, no header row.
    pub fn write_table<W: Write>(&self, mut writer: W) -> Result<()> {
        for row in self.table.rows() {
            writeln!(writer, "{}", format_row(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write header fields as `# key: value` comment lines.
    pub fn write_header<W: Write>(&self, mut writer: W) -> Result<()> {
        for line in self.header.to_string().lines() {
            writeln!(writer, "# {}", line)?;
        }
        Ok(())
    }

    /// Write the table to a file
    pub fn write_csv<P: AsRef<Path>>(&self, output_file: P) -> Result<()> {
        let file = File::create(output_file)?;
        self.write_table(BufWriter::new(file))
    }
}

/// Join one table row into a line of output text.
pub fn format_row(row: &[f64]) -> String {
    let mut fields = Vec::with_capacity(row.len());
    if let Some((&time, samples)) = row.split_first() {
        fields.push(time.to_string());
        fields.extend(samples.iter().map(|&v| format_measurement(v)));
    }
    fields.join(CSV_SEPARATOR)
}

// Measurements always carry a fractional part, so 1 V prints as "1.0".
fn format_measurement(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text + ".0"
    } else {
        text
    }
}
