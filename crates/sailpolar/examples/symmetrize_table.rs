//! Half-range table → full circle, with slices and hulls per wind speed.
//!
//! Purpose
//! - Show the whole pipeline on a small, typical upwind/downwind table:
//!   normalize `"array"` text, build a table, mirror it, then print what a
//!   renderer would draw for each stored wind speed.
//!
//! Run: `cargo run -p sailpolar --example symmetrize_table`

use sailpolar::prelude::*;

const POLAR: &str = "\
TWA\\TWS  6    8    10   12
0        0    0    0    0
45       4.8  5.7  6.3  6.6
60       5.4  6.3  6.9  7.2
90       5.9  6.9  7.5  7.9
120      5.6  6.8  7.6  8.2
150      4.6  5.7  6.8  7.6
180      4.0  5.0  6.0  6.9
";

fn main() -> Result<()> {
    let cfg = NormalizeCfg::new(Format::Array).with_delimiter(Delimiter::Whitespace);
    let triples = sailpolar::normalize::normalize_str(POLAR, &cfg)?;
    let half = Diagram::from_triples(Kind::Table, &triples, &DiagramCfg::default())?;
    let full = half.symmetrize()?;

    println!("stored angles: {:?}", full.angles().unwrap_or_default());
    for slice in full.default_slices()? {
        let hull = full.hull_slice(slice.ws)?;
        println!(
            "ws={:>4}: {} points, hull keeps {}",
            slice.ws,
            slice.points.len(),
            hull.len()
        );
    }
    println!("query(9, 300) = {:.3}", full.query(9.0, 300.0)?);
    Ok(())
}
