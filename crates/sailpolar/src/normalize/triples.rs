use crate::error::{PolarError, Result};
use crate::triple::Triple;

use super::{parse_field, NormalizeCfg, TableFormat};

/// Row-per-observation layout `ws, wa, bs`.
pub struct TriplesFormat;

impl TableFormat for TriplesFormat {
    fn tag(&self) -> &'static str {
        "triples"
    }

    fn parse(&self, records: &[Vec<String>], cfg: &NormalizeCfg) -> Result<Vec<Triple>> {
        let skip = usize::from(cfg.header && !records.is_empty());
        let body = &records[skip..];
        if body.is_empty() {
            return Err(PolarError::format("triples input has no observations"));
        }
        body.iter()
            .enumerate()
            .map(|(i, row)| {
                let line = i + skip + 1;
                if row.len() != 3 {
                    return Err(PolarError::format(format!(
                        "record {line}: expected 3 fields (ws, wa, bs), found {}",
                        row.len()
                    )));
                }
                let ws = parse_field(&row[0], "wind speed", line)?;
                let wa = parse_field(&row[1], "wind angle", line)?;
                let bs = parse_field(&row[2], "boat speed", line)?;
                Triple::new(ws, wa, bs)
            })
            .collect()
    }
}
