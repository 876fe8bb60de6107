// src/header.rs
// ROF file header decoding

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::decoder::ByteCursor;
use crate::error::{Result, RofError};
use crate::models::{resolve_model, ModelLayout};

/// Size of the fixed header in bytes; the sample block starts right after it.
pub const HEADER_SIZE: usize = 28;

/// Representation of the ROF file header as decoded.
///
/// The checksum and oldest-data subscript fields are kept as raw bytes.
/// They are never validated: a damaged but well-shaped file decodes
/// without error.
#[derive(Clone, Debug, PartialEq)]
pub struct RofHeader {
    pub file_type: String,
    pub model: ModelLayout,
    pub data_info_len: i16,
    pub data_len: i32,
    pub head_crc: [u8; 2],
    pub data_crc: [u8; 2],
    /// Sample period in device time units
    pub period: i32,
    /// Number of rows in the sample block
    pub points: i32,
    pub oldest_data_subscript: [u8; 4],
}

impl RofHeader {
    /// Parse the header from the start of a byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(&mut ByteCursor::new(bytes))
    }

    /// Parse the header at the cursor, leaving it on the first sample byte.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let file_type = decode_latin1(field(cursor, "file type", 3)?);
        field(cursor, "reserved", 1)?;
        let model = *resolve_model(field(cursor, "model code", 1)?[0])?;
        field(cursor, "reserved", 1)?;

        let data_info_len = LittleEndian::read_i16(field(cursor, "data info length", 2)?);
        let data_len = LittleEndian::read_i32(field(cursor, "data length", 4)?);
        let head_crc = field_array::<2>(cursor, "header checksum")?;
        let data_crc = field_array::<2>(cursor, "data checksum")?;
        let period = LittleEndian::read_i32(field(cursor, "sample period", 4)?);
        let points = LittleEndian::read_i32(field(cursor, "point count", 4)?);
        let oldest_data_subscript = field_array::<4>(cursor, "oldest data subscript")?;

        debug!(
            "header: type={:?} model={} period={} points={}",
            file_type, model.label, period, points
        );

        Ok(RofHeader {
            file_type,
            model,
            data_info_len,
            data_len,
            head_crc,
            data_crc,
            period,
            points,
            oldest_data_subscript,
        })
    }
}

impl fmt::Display for RofHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "filetype: {}", self.file_type)?;
        writeln!(f, "model: {}", self.model.label)?;
        writeln!(f, "channels: {}", self.model.channels)?;
        writeln!(f, "data_info_len: {}", self.data_info_len)?;
        writeln!(f, "data_len: {}", self.data_len)?;
        writeln!(f, "head_crc: {}", hex(&self.head_crc))?;
        writeln!(f, "data_crc: {}", hex(&self.data_crc))?;
        writeln!(f, "period: {}", self.period)?;
        writeln!(f, "points: {}", self.points)?;
        write!(f, "oldest_data_subscript: {}", hex(&self.oldest_data_subscript))
    }
}

fn field<'a>(cursor: &mut ByteCursor<'a>, name: &'static str, len: usize) -> Result<&'a [u8]> {
    let offset = cursor.position();
    let available = cursor.remaining();
    cursor.take(len).ok_or(RofError::TruncatedHeader {
        field: name,
        offset,
        needed: len,
        available,
    })
}

fn field_array<const N: usize>(cursor: &mut ByteCursor<'_>, name: &'static str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(field(cursor, name, N)?);
    Ok(out)
}

// Latin-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
