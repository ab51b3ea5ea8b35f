//! On-disk sample ingestion for TenvolveRS.
//!
//! Parses the whitespace-separated activation dump used by the USPS
//! digits data: a header line `<row_count> <row_len>` followed by one
//! sample per line with at least `row_len` float fields. Fields beyond
//! `row_len` (labels, trailing annotations) are ignored; blank lines
//! are skipped. Parsed samples convert into activation [`Volume`]s of
//! a caller-chosen extent.

use std::fs;
use std::path::Path;
use tenvolve_core::{Result, Volume, VolumeError};

/// A parsed set of equally sized activation samples.
#[derive(Debug, Clone)]
pub struct SampleSet {
    sample_len: usize,
    samples: Vec<Vec<f32>>,
}

impl SampleSet {
    /// Load and parse a sample file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            VolumeError::io(
                "sample_set_load",
                &format!("{}: {e}", path.as_ref().display()),
            )
        })?;
        Self::parse(&contents)
    }

    /// Parse sample text. The header's declared row count must match
    /// the number of non-empty sample lines.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();
        let header = lines
            .next()
            .ok_or_else(|| VolumeError::parse("sample_set_parse", "missing header line"))?;
        let mut fields = header.split_whitespace();
        let row_count: usize = parse_header_field(fields.next(), "row count")?;
        let sample_len: usize = parse_header_field(fields.next(), "row length")?;
        if sample_len == 0 {
            return Err(VolumeError::parse(
                "sample_set_parse",
                "row length must be positive",
            ));
        }

        let mut samples = Vec::with_capacity(row_count);
        for (line_no, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let values = parse_sample_line(line, line_no + 2, sample_len)?;
            samples.push(values);
        }
        if samples.len() != row_count {
            return Err(VolumeError::parse(
                "sample_set_parse",
                &format!(
                    "header declares {row_count} samples, found {}",
                    samples.len()
                ),
            ));
        }
        Ok(Self {
            sample_len,
            samples,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Activation count per sample.
    pub fn sample_len(&self) -> usize {
        self.sample_len
    }

    pub fn sample(&self, index: usize) -> Option<&[f32]> {
        self.samples.get(index).map(Vec::as_slice)
    }

    /// Convert every sample into a [`Volume`] of the given extents;
    /// `depth * width * height` must equal the sample length.
    pub fn to_volumes(&self, depth: usize, width: usize, height: usize) -> Result<Vec<Volume>> {
        if depth * width * height != self.sample_len {
            return Err(VolumeError::shape_mismatch(
                "sample_set_to_volumes",
                &format!("{} elements per sample", self.sample_len),
                &format!("[{depth}, {width}, {height}] = {} elements", depth * width * height),
            ));
        }
        self.samples
            .iter()
            .map(|sample| Volume::from_vec(sample.clone(), depth, width, height))
            .collect()
    }
}

fn parse_header_field(field: Option<&str>, what: &str) -> Result<usize> {
    let field = field
        .ok_or_else(|| VolumeError::parse("sample_set_parse", &format!("header missing {what}")))?;
    field.parse().map_err(|e| {
        VolumeError::parse(
            "sample_set_parse",
            &format!("invalid {what} '{field}': {e}"),
        )
    })
}

fn parse_sample_line(line: &str, line_no: usize, sample_len: usize) -> Result<Vec<f32>> {
    let values: Vec<f32> = line
        .split_whitespace()
        .take(sample_len)
        .map(|field| {
            field.parse::<f32>().map_err(|e| {
                VolumeError::parse(
                    "sample_set_parse",
                    &format!("line {line_no}: '{field}': {e}"),
                )
            })
        })
        .collect::<Result<_>>()?;
    if values.len() != sample_len {
        return Err(VolumeError::parse(
            "sample_set_parse",
            &format!(
                "line {line_no} has {} fields, expected {sample_len}",
                values.len()
            ),
        ));
    }
    Ok(values)
}
