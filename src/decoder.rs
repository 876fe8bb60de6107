// src/decoder.rs
// ROF sample block decoding pipeline

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::error::{Result, RofError};
use crate::grid::{Grid, SampleTable};
use crate::header::RofHeader;
use crate::models::ModelLayout;

/// Each sample is a little-endian i32
pub const SAMPLE_BYTES: usize = 4;

/// Converts raw sample counts to volts and amperes
pub const VOLTS_AMPERES_COEFF: f64 = 0.0001;

/// Forward-only read position over an in-memory buffer.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Consume `len` bytes, or nothing at all if fewer remain.
    pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.remaining() < len {
            return None;
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }
}

/// Decode a complete ROF image into its header and sample table.
///
/// This is a pure function of `bytes`: any error aborts the decode and no
/// partial table is produced. Trailing bytes after the sample block are
/// ignored.
pub fn decode(bytes: &[u8]) -> Result<(RofHeader, SampleTable)> {
    let mut cursor = ByteCursor::new(bytes);
    let header = RofHeader::parse(&mut cursor)?;

    let raw = decode_samples(&mut cursor, header.points, &header.model)?;
    let block_len = raw.cells().len() * SAMPLE_BYTES;
    if i64::from(header.data_len) != block_len as i64 {
        // Not enforced: the device's meaning of this field is undocumented.
        debug!(
            "declared data length {} differs from sample block size {}",
            header.data_len, block_len
        );
    }

    let converted = convert_units(&raw);
    let time = time_axis(raw.num_rows(), header.period);
    let table = assemble_table(&time, &converted);
    trace!(
        "assembled table: {} rows x {} columns, {} trailing bytes ignored",
        table.num_rows(),
        table.num_columns(),
        cursor.remaining()
    );

    Ok((header, table))
}

/// Read `points` rows of interleaved voltage/current samples for `model`.
///
/// The whole block length is checked before any sample is decoded.
pub fn decode_samples(
    cursor: &mut ByteCursor<'_>,
    points: i32,
    model: &ModelLayout,
) -> Result<Grid<i32>> {
    if points < 0 {
        return Err(RofError::NegativePointCount(points));
    }

    let rows = points as usize;
    let columns = model.sample_columns();
    let expected = rows as u64 * columns as u64 * SAMPLE_BYTES as u64;
    let available = cursor.remaining() as u64;
    if expected > available {
        return Err(RofError::TruncatedData { expected, available });
    }

    let block = cursor
        .take(expected as usize)
        .ok_or(RofError::TruncatedData { expected, available })?;

    let mut cells = vec![0i32; rows * columns];
    LittleEndian::read_i32_into(block, &mut cells);
    trace!("decoded {} samples ({} rows x {} columns)", cells.len(), rows, columns);

    Ok(Grid::from_cells(rows, columns, cells))
}

/// Scale raw counts to physical units.
pub fn convert_units(raw: &Grid<i32>) -> Grid<f64> {
    raw.map(|v| f64::from(v) * VOLTS_AMPERES_COEFF)
}

/// Elapsed time of each row: `index * period`.
pub fn time_axis(points: usize, period: i32) -> Vec<f64> {
    // integer product first so row 0 is always +0.0
    let period = i64::from(period);
    (0..points).map(|i| (i as i64 * period) as f64).collect()
}

/// Prepend the time column to the converted samples.
///
/// `time` must hold one value per sample row; extra entries on either side
/// are dropped.
pub fn assemble_table(time: &[f64], samples: &Grid<f64>) -> SampleTable {
    let columns = samples.num_columns() + 1;

    let mut cells = Vec::with_capacity(time.len() * columns);
    let mut rows = 0;
    for (&t, row) in time.iter().zip(samples.rows()) {
        cells.push(t);
        cells.extend_from_slice(row);
        rows += 1;
    }

    Grid::from_cells(rows, columns, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_SIZE;
    use crate::models::resolve_model;

    fn build_rof(period: i32, points: i32, samples: &[i32]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_SIZE];
        buf[0..3].copy_from_slice(b"ROF");
        buf[4] = 0x0A;
        buf[8..12].copy_from_slice(&((samples.len() * SAMPLE_BYTES) as i32).to_le_bytes());
        buf[16..20].copy_from_slice(&period.to_le_bytes());
        buf[20..24].copy_from_slice(&points.to_le_bytes());
        for s in samples {
            buf.extend_from_slice(&s.to_le_bytes());
        }
        buf
    }

    #[test]
    fn test_cursor_take() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take(2), Some(&data[..2]));
        assert_eq!(cursor.take(2), None);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.take(1), Some(&data[2..]));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_reference_capture() {
        let samples = [10000, 20000, 30000, 40000, 50000, 60000, 70000, 80000];
        let (header, table) = decode(&build_rof(100, 2, &samples)).unwrap();

        assert_eq!(header.file_type, "ROF");
        assert_eq!(header.model.label, "DP821A");
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 5);
        assert_eq!(table.row(0).unwrap(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(table.row(1).unwrap(), &[100.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_samples_are_row_major() {
        let model = resolve_model(0x0A).unwrap();
        let bytes: Vec<u8> = (0..8i32).flat_map(|v| v.to_le_bytes()).collect();
        let mut cursor = ByteCursor::new(&bytes);
        let grid = decode_samples(&mut cursor, 2, model).unwrap();

        assert_eq!(grid.row(0).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(grid.row(1).unwrap(), &[4, 5, 6, 7]);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_negative_samples() {
        let model = resolve_model(0x0A).unwrap();
        let bytes: Vec<u8> = [-1i32, i32::MIN, i32::MAX, -10000]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let grid = decode_samples(&mut ByteCursor::new(&bytes), 1, model).unwrap();
        assert_eq!(grid.row(0).unwrap(), &[-1, i32::MIN, i32::MAX, -10000]);

        let converted = convert_units(&grid);
        assert_eq!(converted.get(0, 3), Some(-10000.0 * VOLTS_AMPERES_COEFF));
    }

    #[test]
    fn test_truncated_data() {
        let model = resolve_model(0x0A).unwrap();
        let bytes = vec![0u8; 2 * 4 * SAMPLE_BYTES - 1];
        let mut cursor = ByteCursor::new(&bytes);
        let result = decode_samples(&mut cursor, 2, model);
        assert!(matches!(
            result,
            Err(RofError::TruncatedData { expected: 32, available: 31 })
        ));
        // nothing consumed on failure
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_negative_point_count() {
        let result = decode(&build_rof(1, -1, &[]));
        assert!(matches!(result, Err(RofError::NegativePointCount(-1))));
    }

    #[test]
    fn test_zero_points() {
        let (header, table) = decode(&build_rof(100, 0, &[])).unwrap();
        assert_eq!(header.points, 0);
        assert!(table.is_empty());
        assert_eq!(table.num_columns(), 5);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = build_rof(10, 1, &[1, 2, 3, 4]);
        data.extend_from_slice(&[0xEE; 7]);
        let (_, table) = decode(&data).unwrap();
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.get(0, 4), Some(4.0 * VOLTS_AMPERES_COEFF));
    }

    #[test]
    fn test_time_axis() {
        assert_eq!(time_axis(3, 5), vec![0.0, 5.0, 10.0]);
        assert_eq!(time_axis(3, -2), vec![0.0, -2.0, -4.0]);
        assert!(time_axis(0, 5).is_empty());
    }

    #[test]
    fn test_assemble_table_leaves_inputs() {
        let samples = Grid::from_cells(2, 2, vec![0.1, 0.2, 0.3, 0.4]);
        let time = vec![0.0, 7.0];
        let table = assemble_table(&time, &samples);

        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.cells(), &[0.0, 0.1, 0.2, 7.0, 0.3, 0.4]);
        assert_eq!(samples.cells(), &[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(time, vec![0.0, 7.0]);
    }
}
