//! priority-flood: fill depressions in every band of a TIFF raster.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use priority_flood::{Connectivity, FloodParams, Phases, read_raster, write_raster};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Neighbourhood {
    #[value(name = "4")]
    Four,
    #[value(name = "8")]
    Eight,
}

impl From<Neighbourhood> for Connectivity {
    fn from(n: Neighbourhood) -> Self {
        match n {
            Neighbourhood::Four => Connectivity::Four,
            Neighbourhood::Eight => Connectivity::Eight,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "priority-flood")]
#[command(version, about = "Priority-Flood depression filling (Barnes, Lehman & Mulla 2014, Algorithm 2)")]
struct Cli {
    /// Input TIFF raster
    #[arg(short, long)]
    input: PathBuf,

    /// Output TIFF raster
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the difference between the filled and the input raster
    #[arg(short, long)]
    diff: Option<PathBuf>,

    /// Neighbourhood used while flooding
    #[arg(short, long, value_enum, default_value = "4")]
    connectivity: Neighbourhood,

    /// Narrate every traversal step
    #[arg(short, long)]
    verbose: bool,

    /// Report phase timings to FILE, or to stdout with "-"
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "-")]
    timings: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut phases = Phases::new();
    phases.mark("start");

    let output = cli.output.clone().unwrap_or_else(|| {
        warn!("no output given, writing to output.tif");
        PathBuf::from("output.tif")
    });
    let params = FloodParams {
        connectivity: cli.connectivity.into(),
        verbose: cli.verbose,
    };

    let original = read_raster(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let (rows, cols) = original.shape();
    info!(
        "{} has {} {} band(s) of {}x{} cells",
        cli.input.display(),
        original.band_count(),
        original.sample_type(),
        cols,
        rows
    );
    info!("pits per band before filling: {:?}", original.count_pits(params.connectivity));
    phases.mark("read");

    let mut filled = original.clone();
    let stats = filled
        .fill_depressions(&params)
        .context("filling depressions")?;
    for (band, s) in stats.iter().enumerate() {
        info!(
            "band {}: seeded {}, expanded {}, raised {} cells by {}",
            band, s.seeded, s.expanded, s.raised, s.volume
        );
    }
    let remaining = filled.count_pits(params.connectivity);
    if remaining.iter().any(|&n| n > 0) {
        bail!("pits remain after filling: {:?}", remaining);
    }
    phases.mark("fill");

    write_raster(&output, &filled).with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {}", output.display());
    phases.mark("write");

    if let Some(diff_path) = &cli.diff {
        let diff = filled.difference(&original).context("computing difference")?;
        write_raster(diff_path, &diff).with_context(|| format!("writing {}", diff_path.display()))?;
        info!("wrote difference to {}", diff_path.display());
        phases.mark("diff");
    }

    match cli.timings.as_deref() {
        None if cli.verbose => phases.log_report(),
        None => {}
        Some("-") => phases.write_report(&mut io::stdout().lock())?,
        Some(path) => {
            let mut out = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path))?);
            phases.write_report(&mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
