//! Triple normalizer: tabular text → `Vec<Triple>`.
//!
//! Purpose
//! - Turn the two supported layouts (`"array"` matrix, `"triples"` rows) into
//!   one normalized sequence, validating every numeric field on the way.
//! - Keep format-specific parsing behind `TableFormat` so a new layout is one
//!   more implementation, not a change to the engine.
//!
//! Error policy
//! - Structure mismatches (ragged matrix, wrong field count, unparseable
//!   number, unknown tag) are `PolarError::Format`.
//! - Out-of-domain numbers are `PolarError::Value` (raised by `Triple::new`).
//! - All or nothing: on error no triples are returned.

mod array;
mod triples;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PolarError, Result};
use crate::triple::Triple;

pub use array::ArrayFormat;
pub use triples::TriplesFormat;

/// Input layout tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Header of wind speeds, then one row per wind angle.
    Array,
    /// One `ws, wa, bs` row per observation.
    #[default]
    Triples,
}

impl Format {
    pub fn tag(self) -> &'static str {
        self.parser().tag()
    }

    pub fn parser(self) -> &'static dyn TableFormat {
        match self {
            Format::Array => &ArrayFormat,
            Format::Triples => &TriplesFormat,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Format {
    type Err = PolarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(Format::Array),
            "triples" => Ok(Format::Triples),
            other => Err(PolarError::format(format!("unknown format tag `{other}`"))),
        }
    }
}

/// Field separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Byte(u8),
    /// Any run of blanks.
    Whitespace,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Byte(b',')
    }
}

impl FromStr for Delimiter {
    type Err = PolarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ws" | "whitespace" | " " => Ok(Delimiter::Whitespace),
            "tab" | "\\t" | "\t" => Ok(Delimiter::Byte(b'\t')),
            _ if s.len() == 1 && s.is_ascii() => Ok(Delimiter::Byte(s.as_bytes()[0])),
            _ => Err(PolarError::format(format!(
                "delimiter must be a single ASCII character, `tab` or `whitespace`, got `{s}`"
            ))),
        }
    }
}

/// Normalizer configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeCfg {
    pub format: Format,
    pub delimiter: Delimiter,
    /// Skip the first record of `"triples"` input. `"array"` always has a header.
    pub header: bool,
}

impl NormalizeCfg {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// One input layout.
pub trait TableFormat: Sync {
    /// Format tag as accepted by `Format::from_str`.
    fn tag(&self) -> &'static str;

    /// Turn split, trimmed records into triples.
    fn parse(&self, records: &[Vec<String>], cfg: &NormalizeCfg) -> Result<Vec<Triple>>;
}

/// Parse a numeric field; failures are structural (`Format`), not domain errors.
pub(crate) fn parse_field(field: &str, what: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|_| {
        if field.is_empty() {
            PolarError::format(format!("record {line}: missing {what}"))
        } else {
            PolarError::format(format!("record {line}: {what} `{field}` is not a number"))
        }
    })
}

/// Split the input into trimmed records; blank lines are skipped.
pub fn read_records<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<Vec<String>>> {
    match delimiter {
        Delimiter::Byte(b) => {
            let mut rdr = csv::ReaderBuilder::new()
                .delimiter(b)
                .has_headers(false)
                .flexible(true)
                .trim(csv::Trim::All)
                .from_reader(reader);
            let mut out = Vec::new();
            for record in rdr.records() {
                let record = record?;
                if record.iter().all(|f| f.is_empty()) {
                    continue;
                }
                out.push(record.iter().map(str::to_string).collect());
            }
            Ok(out)
        }
        Delimiter::Whitespace => {
            let mut out = Vec::new();
            for line in BufReader::new(reader).lines() {
                let line = line?;
                let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
                if !fields.is_empty() {
                    out.push(fields);
                }
            }
            Ok(out)
        }
    }
}

pub fn normalize_reader<R: Read>(reader: R, cfg: &NormalizeCfg) -> Result<Vec<Triple>> {
    let records = read_records(reader, cfg.delimiter)?;
    let triples = cfg.format.parser().parse(&records, cfg)?;
    tracing::debug!(
        format = cfg.format.tag(),
        records = records.len(),
        triples = triples.len(),
        "normalized"
    );
    Ok(triples)
}

pub fn normalize_str(input: &str, cfg: &NormalizeCfg) -> Result<Vec<Triple>> {
    normalize_reader(input.as_bytes(), cfg)
}

/// Read and normalize a file. The handle lives only for the duration of the call.
pub fn normalize_path<P: AsRef<Path>>(path: P, cfg: &NormalizeCfg) -> Result<Vec<Triple>> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading polar data");
    let file = File::open(path)?;
    normalize_reader(BufReader::new(file), cfg)
}

#[cfg(test)]
mod tests;
