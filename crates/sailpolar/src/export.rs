//! Write diagrams back to delimited text.
//!
//! Numbers are written with Rust's shortest round-trip formatting, so reading
//! the output back through `normalize` reproduces every value exactly.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagram::{Diagram, Repr};
use crate::error::{PolarError, Result};
use crate::normalize::{Delimiter, Format, NormalizeCfg};
use crate::repr::{PolarRepr, Table};
use crate::triple::Triple;

/// Label of the top-left cell in the `"array"` layout.
pub const ARRAY_CORNER: &str = "TWA\\TWS";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportCfg {
    pub delimiter: u8,
    /// Emit a `ws,wa,bs` header line for the `"triples"` layout.
    pub header: bool,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header: true,
        }
    }
}

impl ExportCfg {
    /// Normalizer settings that read this output back.
    pub fn reader_cfg(&self, format: Format) -> NormalizeCfg {
        NormalizeCfg::new(format)
            .with_delimiter(Delimiter::Byte(self.delimiter))
            .with_header(self.header)
    }
}

fn writer<W: Write>(out: W, cfg: &ExportCfg) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(cfg.delimiter)
        .flexible(false)
        .from_writer(out)
}

/// One `ws, wa, bs` record per triple.
pub fn write_triples<W: Write>(out: W, triples: &[Triple], cfg: &ExportCfg) -> Result<()> {
    let mut wtr = writer(out, cfg);
    if cfg.header {
        wtr.write_record(["ws", "wa", "bs"])?;
    }
    for t in triples {
        wtr.write_record([t.ws().to_string(), t.wa().to_string(), t.bs().to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Table in the `"array"` layout: header of wind speeds, then one row per angle.
pub fn write_array<W: Write>(out: W, table: &Table, cfg: &ExportCfg) -> Result<()> {
    let mut wtr = writer(out, cfg);
    let speeds = table.speeds();
    let mut header = Vec::with_capacity(speeds.len() + 1);
    header.push(ARRAY_CORNER.to_string());
    header.extend(speeds.iter().map(f64::to_string));
    wtr.write_record(&header)?;

    let angles = table.angles().unwrap_or_default();
    for (i, wa) in angles.iter().enumerate() {
        let mut row = Vec::with_capacity(speeds.len() + 1);
        row.push(wa.to_string());
        row.extend(table.grid().row(i).iter().map(f64::to_string));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a diagram in the given layout. `"array"` needs a table.
pub fn write_diagram<W: Write>(out: W, diagram: &Diagram, format: Format, cfg: &ExportCfg) -> Result<()> {
    match (format, diagram.repr()) {
        (Format::Array, Repr::Table(t)) => write_array(out, t, cfg),
        (Format::Array, other) => Err(PolarError::domain(format!(
            "the array layout needs a table, got a {}",
            other.name()
        ))),
        (Format::Triples, _) => write_triples(out, &diagram.to_triples(), cfg),
    }
}

/// Write to a file. The handle is closed before returning.
pub fn write_path<P: AsRef<Path>>(
    path: P,
    diagram: &Diagram,
    format: Format,
    cfg: &ExportCfg,
) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), format = format.tag(), "writing polar data");
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_diagram(&mut out, diagram, format, cfg)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::DiagramCfg;
    use crate::normalize::{normalize_path, normalize_str};
    use crate::repr::TableCfg;

    fn table() -> Table {
        Table::from_columns(
            vec![10.0, 20.0],
            vec![0.0, 90.0, 180.0],
            &[vec![2.0, 5.0, 3.0], vec![4.0, 8.0, 6.5]],
            TableCfg::default(),
        )
        .unwrap()
    }

    #[test]
    fn array_layout_matches_reader() {
        let mut buf = Vec::new();
        write_array(&mut buf, &table(), &ExportCfg::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "TWA\\TWS,10,20\n0,2,4\n90,5,8\n180,3,6.5\n");
        let back = normalize_str(&text, &NormalizeCfg::new(Format::Array)).unwrap();
        assert_eq!(back, table().to_triples());
    }

    #[test]
    fn triples_layout_with_and_without_header() {
        let triples = table().to_triples();
        let cfg = ExportCfg {
            delimiter: b';',
            header: false,
        };
        let mut buf = Vec::new();
        write_triples(&mut buf, &triples[..2], &cfg).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "10;0;2\n10;90;5\n");

        let mut buf = Vec::new();
        write_triples(&mut buf, &triples, &ExportCfg::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("ws,wa,bs\n"));
        let back = normalize_str(&text, &ExportCfg::default().reader_cfg(Format::Triples)).unwrap();
        assert_eq!(back, triples);
    }

    #[test]
    fn array_layout_needs_a_table() {
        let cloud = Diagram::from_triples(
            crate::diagram::Kind::Cloud,
            &table().to_triples(),
            &DiagramCfg::default(),
        )
        .unwrap();
        let err = write_diagram(Vec::new(), &cloud, Format::Array, &ExportCfg::default());
        assert!(matches!(err, Err(PolarError::Domain(_))));
    }

    #[test]
    fn write_path_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polar.csv");
        let diagram = Diagram::from(table());
        write_path(&path, &diagram, Format::Array, &ExportCfg::default()).unwrap();
        let back = normalize_path(&path, &NormalizeCfg::new(Format::Array)).unwrap();
        assert_eq!(back, diagram.to_triples());

        let missing = dir.path().join("no/such/dir/polar.csv");
        assert!(matches!(
            write_path(&missing, &diagram, Format::Triples, &ExportCfg::default()),
            Err(PolarError::Io(_))
        ));
    }
}
