//! IDX (MNIST) file reader.
//!
//! Layout: a big-endian magic number `0x0000_08DD` where `08` marks unsigned
//! bytes and `DD` the number of dimensions, followed by one big-endian `u32`
//! per dimension and the raw bytes.

use super::dataset::{DataSplits, Dataset};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use std::fs;
use std::path::Path;

/// Unsigned-byte data type code.
const UBYTE: u8 = 0x08;

/// MNIST has ten digit classes.
pub const MNIST_CLASSES: usize = 10;

/// Standard MNIST file names.
pub const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
pub const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
pub const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

/// Parsed IDX payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxArray {
    /// Dimension sizes.
    pub dims: Vec<usize>,
    /// Raw bytes in row-major order.
    pub data: Vec<u8>,
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_be_bytes)
        .ok_or_else(|| Error::Data(format!("IDX header truncated at byte {offset}")))
}

/// Number of elements spanned by `dims`, or an error if it overflows `usize`.
fn element_count(dims: &[usize]) -> Result<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| Error::Data(format!("IDX dimensions {dims:?} overflow the element count")))
}

/// Parse an unsigned-byte IDX buffer.
pub fn parse_idx(bytes: &[u8]) -> Result<IdxArray> {
    let magic = read_u32(bytes, 0)?;
    let [zero_a, zero_b, kind, ndim] = magic.to_be_bytes();
    if zero_a != 0 || zero_b != 0 {
        return Err(Error::Data(format!("bad IDX magic {magic:#010x}")));
    }
    if kind != UBYTE {
        return Err(Error::Data(format!("unsupported IDX element type {kind:#04x}")));
    }

    let ndim = usize::from(ndim);
    let dims = (0..ndim)
        .map(|i| read_u32(bytes, 4 + 4 * i).map(|d| d as usize))
        .collect::<Result<Vec<_>>>()?;

    let header = 4 + 4 * ndim;
    let expected = element_count(&dims)?;
    let payload = &bytes[header.min(bytes.len())..];
    if payload.len() != expected {
        return Err(Error::Data(format!(
            "IDX payload has {} bytes, dimensions {dims:?} need {expected}",
            payload.len()
        )));
    }
    Ok(IdxArray { dims, data: payload.to_vec() })
}

/// Read an unsigned-byte IDX file.
pub fn read_idx(path: &Path) -> Result<IdxArray> {
    let bytes = fs::read(path)
        .map_err(|e| Error::Data(format!("failed to read {}: {e}", path.display())))?;
    parse_idx(&bytes)
}

/// Build a dataset from IDX image and label arrays, scaling pixels to [0, 1].
pub fn dataset_from_idx(images: IdxArray, labels: IdxArray, num_classes: usize) -> Result<Dataset> {
    if images.dims.is_empty() || labels.dims.len() != 1 {
        return Err(Error::Data(format!(
            "expected N-d images and 1-d labels, got {:?} and {:?}",
            images.dims, labels.dims
        )));
    }
    let samples = images.dims[0];
    let features = element_count(&images.dims[1..])?;

    let pixels: Vec<f32> = images.data.iter().map(|&p| f32::from(p) / 255.0).collect();
    let features = Array2::from_shape_vec((samples, features), pixels)
        .map_err(|e| Error::Data(format!("image buffer does not match its dimensions: {e}")))?;
    let labels = Array1::from_iter(labels.data.iter().map(|&l| usize::from(l)));
    Dataset::new(features, labels, num_classes)
}

/// Load the four standard MNIST files from `dir`.
pub fn load_mnist(dir: &Path) -> Result<DataSplits> {
    let train = dataset_from_idx(
        read_idx(&dir.join(TRAIN_IMAGES))?,
        read_idx(&dir.join(TRAIN_LABELS))?,
        MNIST_CLASSES,
    )?;
    let test = dataset_from_idx(
        read_idx(&dir.join(TEST_IMAGES))?,
        read_idx(&dir.join(TEST_LABELS))?,
        MNIST_CLASSES,
    )?;
    DataSplits::new(train, test)
}

/// Encode `data` with `dims` as an unsigned-byte IDX buffer.
pub fn encode_idx(dims: &[usize], data: &[u8]) -> Vec<u8> {
    let mut out = vec![0, 0, UBYTE, dims.len() as u8];
    for &d in dims {
        out.extend_from_slice(&(d as u32).to_be_bytes());
    }
    out.extend_from_slice(data);
    out
}
