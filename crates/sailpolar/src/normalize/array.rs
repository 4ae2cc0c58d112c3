use crate::error::{PolarError, Result};
use crate::triple::Triple;

use super::{parse_field, NormalizeCfg, TableFormat};

/// Matrix layout:
///
/// ```text
/// TWA\TWS, 6,   8,   10
/// 52,      5.1, 6.0, 6.6
/// 90,      5.9, 6.9, 7.4
/// ```
///
/// The first cell is a free label. Output is wind-speed-major.
pub struct ArrayFormat;

impl TableFormat for ArrayFormat {
    fn tag(&self) -> &'static str {
        "array"
    }

    fn parse(&self, records: &[Vec<String>], _cfg: &NormalizeCfg) -> Result<Vec<Triple>> {
        let (header, rows) = records
            .split_first()
            .ok_or_else(|| PolarError::format("array input is empty"))?;
        if header.len() < 2 {
            return Err(PolarError::format(
                "array header needs a label cell and at least one wind speed",
            ));
        }
        if rows.is_empty() {
            return Err(PolarError::format("array input has no wind angle rows"));
        }
        let speeds = header[1..]
            .iter()
            .map(|f| parse_field(f, "wind speed", 1))
            .collect::<Result<Vec<f64>>>()?;

        let mut angles = Vec::with_capacity(rows.len());
        let mut grid = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let line = i + 2;
            if row.len() != header.len() {
                return Err(PolarError::format(format!(
                    "record {line}: expected {} fields, found {} (array must be rectangular)",
                    header.len(),
                    row.len()
                )));
            }
            angles.push(parse_field(&row[0], "wind angle", line)?);
            grid.push(
                row[1..]
                    .iter()
                    .map(|f| parse_field(f, "boat speed", line))
                    .collect::<Result<Vec<f64>>>()?,
            );
        }

        let mut out = Vec::with_capacity(speeds.len() * angles.len());
        for (j, &ws) in speeds.iter().enumerate() {
            for (i, &wa) in angles.iter().enumerate() {
                out.push(Triple::new(ws, wa, grid[i][j])?);
            }
        }
        Ok(out)
    }
}
