mod render;
mod settings;

use std::{
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

use clap::{
    builder::styling,
    Parser,
};
use color_eyre::eyre::Error;
use galmap_catalog::{
    radial_distances,
    spiral_arms,
    Clusters,
    GalactocentricFrame,
    PositionTable,
};
use tracing_subscriber::EnvFilter;

use crate::settings::PlotSettings;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Blue.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Milky Way map of open clusters
///
/// Places the embedded clusters in the Galactocentric frame once per distance
/// catalog, prints their Galactocentric radii and draws them together with the
/// spiral arms.
#[derive(Debug, Parser)]
#[command(version = clap::crate_version!(), styles = STYLES)]
pub struct Args {
    /// Where to write the figure.
    #[arg(short, long, default_value = "plots/MWmap.png")]
    output: PathBuf,

    /// Plot settings file. Defaults to `plot_pars.toml` in the working
    /// directory if it exists.
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

impl Args {
    pub fn run(self) -> Result<(), Error> {
        let settings = PlotSettings::load(self.settings.as_deref())?;
        let stdout = std::io::stdout();
        run_pipeline(&settings, &self.output, &mut stdout.lock())
    }
}

/// Loads the clusters, writes the radial distance report to `report` and
/// renders the figure to `output`.
fn run_pipeline(
    settings: &PlotSettings,
    output: &Path,
    report: &mut impl Write,
) -> Result<(), Error> {
    let clusters = Clusters::embedded()?;
    let table = PositionTable::compute(&clusters, &GalactocentricFrame::default());

    write!(report, "{}", radial_distances(&table))?;
    report.flush()?;

    render::render_figure(output, &table, spiral_arms(), settings)?;
    tracing::info!(output = %output.display(), "wrote figure");

    Ok(())
}

fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.run()?;

    Ok(())
}
