//! Packed measurement results.
//!
//! Layout: `<rep0><rep1>...`, where each repetition is
//! `<key0 bit0>..<key0 bit(n0-1)><key1 bit0>...` in the order the keys were
//! given. Bits are packed eight to a byte in little-endian bit order (the
//! first bit of a group is the byte's least-significant bit) and the final
//! byte is zero-padded. The buffer carries no header; the reader supplies
//! the repetition count and the `(key, width)` layout.

use ndarray::{Array2, ArrayD, ArrayView2, Axis, Ix2, s};
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};

use crate::error::{WireError, WireResult};

/// Pack named `(repetitions × bits)` boolean matrices into bytes.
///
/// All matrices must be 2-D and share the same repetition count. An empty
/// input packs to an empty buffer.
#[instrument(skip_all, fields(keys = measurements.len()))]
pub fn pack_results<K: AsRef<str>>(measurements: &[(K, ArrayD<bool>)]) -> WireResult<Vec<u8>> {
    let Some((_, first)) = measurements.first() else {
        return Ok(Vec::new());
    };

    let views = measurements
        .iter()
        .map(|(key, data)| {
            data.view()
                .into_dimensionality::<Ix2>()
                .map_err(|_| WireError::ShapeMismatch {
                    key: key.as_ref().to_string(),
                    shape: data.shape().to_vec(),
                })
        })
        .collect::<WireResult<Vec<_>>>()?;

    let repetitions = first.shape()[0];
    for ((key, _), view) in measurements.iter().zip(&views) {
        if view.nrows() != repetitions {
            return Err(WireError::RepetitionMismatch {
                key: key.as_ref().to_string(),
                expected: repetitions,
                got: view.nrows(),
            });
        }
    }

    let combined = ndarray::concatenate(Axis(1), &views)?;
    let bytes = bits_to_bytes(&flatten_rows_padded(combined.view()));

    debug!(
        "Packed {} repetitions × {} bits into {} bytes",
        repetitions,
        combined.ncols(),
        bytes.len()
    );
    Ok(bytes)
}

/// Unpack a buffer produced by [`pack_results`].
///
/// `key_sizes` must list the same keys and widths, in the same order, as
/// were packed. Bytes past `repetitions × Σ width` bits are ignored.
#[instrument(skip_all, fields(bytes = data.len(), repetitions = repetitions, keys = key_sizes.len()))]
pub fn unpack_results<K: AsRef<str>>(
    data: &[u8],
    repetitions: usize,
    key_sizes: &[(K, usize)],
) -> WireResult<MeasurementResults> {
    let mut seen = FxHashSet::default();
    for (key, _) in key_sizes {
        if !seen.insert(key.as_ref()) {
            return Err(WireError::DuplicateMeasurementKey(key.as_ref().to_string()));
        }
    }

    let bits_per_rep = key_sizes.iter().try_fold(0usize, |total, (key, size)| {
        total
            .checked_add(*size)
            .ok_or_else(|| WireError::LayoutOverflow {
                key: key.as_ref().to_string(),
            })
    })?;
    let available_bits = data.len().saturating_mul(8);
    let total_bits = repetitions
        .checked_mul(bits_per_rep)
        .filter(|&total| total <= available_bits)
        .ok_or(WireError::TruncatedBuffer {
            expected_bits: repetitions.saturating_mul(bits_per_rep),
            available_bits,
        })?;

    let mut bits = bytes_to_bits(data);
    bits.truncate(total_bits);
    let all = Array2::from_shape_vec((repetitions, bits_per_rep), bits)?;

    let mut results = Vec::with_capacity(key_sizes.len());
    let mut offset = 0;
    for (key, size) in key_sizes {
        let columns = all.slice(s![.., offset..offset + size]).to_owned();
        results.push((key.as_ref().to_string(), columns));
        offset += size;
    }

    Ok(MeasurementResults { results })
}

/// Flatten a matrix row-major and zero-pad to a multiple of 8 bits.
pub fn flatten_rows_padded(bits: ArrayView2<'_, bool>) -> Vec<bool> {
    let mut flat: Vec<bool> = bits.iter().copied().collect();
    let padded_len = flat.len().div_ceil(8) * 8;
    flat.resize(padded_len, false);
    flat
}

/// Pack bits eight to a byte, the first bit of each group in the
/// least-significant position. A trailing partial group is zero-padded.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << i))
        })
        .collect()
}

/// Inverse of [`bits_to_bytes`]: eight bits per byte, least-significant first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// Unpacked results, one `(repetitions × width)` matrix per key, in layout order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementResults {
    results: Vec<(String, Array2<bool>)>,
}

impl MeasurementResults {
    /// Look up the matrix for `key`.
    pub fn get(&self, key: &str) -> Option<&Array2<bool>> {
        self.results
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bits)| bits)
    }

    /// Keys in layout order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, matrix)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Array2<bool>)> {
        self.results.iter().map(|(k, bits)| (k.as_str(), bits))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Take the `(key, matrix)` pairs.
    pub fn into_inner(self) -> Vec<(String, Array2<bool>)> {
        self.results
    }
}

impl IntoIterator for MeasurementResults {
    type Item = (String, Array2<bool>);
    type IntoIter = std::vec::IntoIter<(String, Array2<bool>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
