use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polars::prelude::*;
use sailpolar::api::{normalize_path, Delimiter, Diagram, DiagramCfg, Family, Format, Kind, NormalizeCfg};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{DiagramRecord, InputRecord, Sidecar};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Polar diagram queries, slices and exports")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Table,
    Curve,
    Cloud,
}

/// Where the polar data comes from and how to model it.
#[derive(Args, Debug)]
struct Source {
    #[arg(long)]
    input: PathBuf,
    /// `array` or `triples`
    #[arg(long, default_value = "triples")]
    format: Format,
    /// Single character, `tab` or `whitespace`
    #[arg(long, default_value = ",")]
    delimiter: Delimiter,
    /// Skip the first record of triples input
    #[arg(long)]
    header: bool,
    #[arg(long, value_enum, default_value_t = KindArg::Table)]
    kind: KindArg,
    /// Cosine-series terms when fitting a curve
    #[arg(long, default_value_t = 3)]
    terms: usize,
    /// Mirror half-range data onto the full circle
    #[arg(long)]
    symmetrize: bool,
    /// JSON file with a (partial) DiagramCfg
    #[arg(long)]
    cfg: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Action {
    /// Print the boat speed at one wind speed and angle
    Query {
        #[command(flatten)]
        src: Source,
        #[arg(long)]
        ws: f64,
        #[arg(long)]
        wa: f64,
    },
    /// Print one wind speed's (angle, boat speed) pairs as JSON
    Slice {
        #[command(flatten)]
        src: Source,
        #[arg(long)]
        ws: f64,
        /// Only the convex hull of the slice
        #[arg(long)]
        hull: bool,
    },
    /// Write normalized triples as CSV or Parquet (by extension) plus a provenance sidecar
    Export {
        #[command(flatten)]
        src: Source,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Query { src, ws, wa } => query(&src, ws, wa),
        Action::Slice { src, ws, hull } => slice(&src, ws, hull),
        Action::Export { src, out } => export(&src, &out),
        Action::Report => report(),
    }
}

fn load_cfg(path: Option<&Path>) -> Result<DiagramCfg> {
    match path {
        Some(p) => {
            let bytes = fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", p.display()))
        }
        None => Ok(DiagramCfg::default()),
    }
}

fn load(src: &Source) -> Result<(Diagram, DiagramCfg)> {
    let cfg = load_cfg(src.cfg.as_deref())?;
    let ncfg = NormalizeCfg::new(src.format)
        .with_delimiter(src.delimiter)
        .with_header(src.header);
    let triples = normalize_path(&src.input, &ncfg)
        .with_context(|| format!("loading {}", src.input.display()))?;
    let kind = match src.kind {
        KindArg::Table => Kind::Table,
        KindArg::Curve => Kind::Curve(Family::CosineSeries { terms: src.terms }),
        KindArg::Cloud => Kind::Cloud,
    };
    let diagram = Diagram::from_triples(kind, &triples, &cfg)?;
    tracing::info!(
        input = %src.input.display(),
        triples = triples.len(),
        repr = diagram.repr().name(),
        "loaded"
    );
    if src.symmetrize {
        return Ok((diagram.symmetrize()?, cfg));
    }
    Ok((diagram, cfg))
}

fn query(src: &Source, ws: f64, wa: f64) -> Result<()> {
    let (diagram, _) = load(src)?;
    let bs = diagram.query(ws, wa)?;
    tracing::info!(ws, wa, bs, "query");
    println!("{bs}");
    Ok(())
}

fn slice(src: &Source, ws: f64, hull: bool) -> Result<()> {
    let (diagram, _) = load(src)?;
    let pairs = if hull {
        diagram.hull_slice(ws)?
    } else {
        diagram.slice(ws)?
    };
    tracing::info!(ws, hull, points = pairs.len(), "slice");
    println!("{}", serde_json::to_string(&pairs)?);
    Ok(())
}

fn triples_frame(diagram: &Diagram) -> Result<DataFrame> {
    let triples = diagram.to_triples();
    let df = df!(
        "ws" => triples.iter().map(|t| t.ws()).collect::<Vec<f64>>(),
        "wa" => triples.iter().map(|t| t.wa()).collect::<Vec<f64>>(),
        "bs" => triples.iter().map(|t| t.bs()).collect::<Vec<f64>>(),
    )?;
    Ok(df)
}

fn export(src: &Source, out: &Path) -> Result<()> {
    let (diagram, cfg) = load(src)?;
    let mut df = triples_frame(&diagram)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let parquet = out.extension().and_then(|e| e.to_str()) == Some("parquet");
    if parquet {
        ParquetWriter::new(file).finish(&mut df)?;
    } else {
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
    }
    tracing::info!(out = %out.display(), rows = df.height(), parquet, "export");

    let sidecar = Sidecar::new(
        InputRecord::inspect(&src.input, src.format)?,
        DiagramRecord::describe(&diagram, src.symmetrize, df.height()),
        cfg,
    );
    let path = sidecar.write_beside(out)?;
    tracing::debug!(sidecar = %path.display(), "provenance");
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "sailpolar": sailpolar::VERSION,
        "formats": [Format::Array.tag(), Format::Triples.tag()],
        "defaults": DiagramCfg::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
