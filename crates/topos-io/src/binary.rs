//! Raw binary persistence of decomposition results.
//!
//! All files are flat sequences of little-endian 8-byte floats with no
//! header and no shape metadata — the on-disk layout is a compatibility
//! contract. Matrices are stored in column-major element order. Because the
//! files carry no structure, the reader takes the row count as an argument
//! and infers the column count from the byte length; a length that does not
//! divide evenly is the only mismatch that can be detected.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use ndarray::{Array2, ShapeBuilder};

/// Write a flat slice of floats.
pub fn write_vector(path: &Path, data: &[f64]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in data {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()
}

/// Read a whole file back as a flat vector of floats.
pub fn read_vector(path: &Path) -> io::Result<Vec<f64>> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    if bytes.len() % 8 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: length {} is not a multiple of 8", path.display(), bytes.len()),
        ));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| f64::from_le_bytes(chunk.try_into().unwrap()))
        .collect())
}

/// Write a matrix in column-major element order.
pub fn write_matrix(path: &Path, matrix: &Array2<f64>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for column in matrix.columns() {
        for value in column.iter() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()
}

/// Read a column-major matrix whose row count is known to the caller; the
/// column count is inferred from the file length.
pub fn read_matrix(path: &Path, rows: usize) -> io::Result<Array2<f64>> {
    let values = read_vector(path)?;
    if rows == 0 || values.len() % rows != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{}: {} values do not divide into rows of {}",
                path.display(),
                values.len(),
                rows
            ),
        ));
    }
    let cols = values.len() / rows;
    Array2::from_shape_vec((rows, cols).f(), values)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
}
