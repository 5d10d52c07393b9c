use std::path::Path;

use color_eyre::eyre::{
    bail,
    eyre,
    Error,
    WrapErr,
};
use palette::Srgb;
use plotters::style::RGBColor;
use serde::Deserialize;

/// Settings file that is picked up from the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "plot_pars.toml";

/// Columns and rows the fixed panel layout needs.
const MIN_GRID: (u32, u32) = (8, 4);

const POINTS_PER_INCH: f64 = 72.0;

/// Rendering parameters.
///
/// ```toml
/// dpi = 150
/// grid_x = 8
/// grid_y = 8
/// figure_size = [17.0, 17.0]
/// scatter_size = 50.0
/// scatter_edge_color = "#000000"
/// scatter_line_width = 0.5
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub dpi: f64,
    /// Grid columns.
    pub grid_x: u32,
    /// Grid rows.
    pub grid_y: u32,
    /// Width and height in inches.
    pub figure_size: [f64; 2],
    /// Marker area in pt².
    pub scatter_size: f64,
    pub scatter_edge_color: String,
    /// Marker edge width in pt.
    pub scatter_line_width: f64,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            grid_x: 8,
            grid_y: 8,
            figure_size: [17.0, 17.0],
            scatter_size: 50.0,
            scatter_edge_color: "#000000".to_owned(),
            scatter_line_width: 0.5,
        }
    }
}

impl PlotSettings {
    /// Reads `path` if given, otherwise [`DEFAULT_SETTINGS_FILE`] if it
    /// exists, otherwise falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let settings = match path {
            Some(path) => Self::read(path)?,
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::read(path)?
                }
                else {
                    tracing::debug!("no {DEFAULT_SETTINGS_FILE}, using default plot settings");
                    Self::default()
                }
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    fn read(path: &Path) -> Result<Self, Error> {
        tracing::debug!(path = %path.display(), "reading plot settings");
        let toml = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Error while reading plot settings: {}", path.display()))?;
        Self::parse(&toml)
            .wrap_err_with(|| format!("Error while parsing plot settings: {}", path.display()))
    }

    pub fn parse(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            bail!("dpi must be positive: {}", self.dpi);
        }
        if self.grid_x < MIN_GRID.0 || self.grid_y < MIN_GRID.1 {
            bail!(
                "grid must have at least {}x{} cells: {}x{}",
                MIN_GRID.0,
                MIN_GRID.1,
                self.grid_x,
                self.grid_y
            );
        }
        if self
            .figure_size
            .iter()
            .any(|size| !(size.is_finite() && *size > 0.0))
        {
            bail!("figure size must be positive: {:?}", self.figure_size);
        }
        if !(self.scatter_size.is_finite() && self.scatter_size > 0.0) {
            bail!("scatter size must be positive: {}", self.scatter_size);
        }
        if !(self.scatter_line_width.is_finite() && self.scatter_line_width >= 0.0) {
            bail!(
                "scatter line width must not be negative: {}",
                self.scatter_line_width
            );
        }
        self.edge_color()?;
        Ok(())
    }

    pub fn edge_color(&self) -> Result<RGBColor, Error> {
        let color: Srgb<u8> = self
            .scatter_edge_color
            .parse()
            .map_err(|error| eyre!("invalid edge color {:?}: {error}", self.scatter_edge_color))?;
        Ok(RGBColor(color.red, color.green, color.blue))
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.figure_size[0] * self.dpi).round() as u32,
            (self.figure_size[1] * self.dpi).round() as u32,
        )
    }

    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    /// Radius in pixels of a marker covering `area` pt².
    pub fn marker_radius(&self, area: f64) -> i32 {
        (self.points_to_pixels(area.sqrt()) / 2.0).round().max(1.0) as i32
    }

    /// Line width in pixels, at least one pixel.
    pub fn stroke_width(&self, points: f64) -> u32 {
        self.points_to_pixels(points).round().max(1.0) as u32
    }

    /// Marker edge width in pixels, `None` for a zero width.
    pub fn edge_width(&self, points: f64) -> Option<u32> {
        (points > 0.0).then(|| self.stroke_width(points))
    }

    pub fn font_size(&self, points: f64) -> f64 {
        self.points_to_pixels(points).round()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn it_validates_defaults() {
        let settings = PlotSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.canvas_size(), (2550, 2550));
        assert_eq!(settings.edge_color().unwrap(), RGBColor(0, 0, 0));
    }

    #[test]
    fn it_fills_missing_fields_with_defaults() {
        let settings = PlotSettings::parse("dpi = 72\nscatter_edge_color = \"#ff8000\"\n").unwrap();
        assert_eq!(settings.dpi, 72.0);
        assert_eq!(settings.grid_x, 8);
        assert_eq!(settings.figure_size, [17.0, 17.0]);
        assert_eq!(settings.edge_color().unwrap(), RGBColor(255, 128, 0));
    }

    #[test]
    fn it_rejects_small_grids() {
        let settings = PlotSettings::parse("grid_x = 4\n").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn it_rejects_bad_edge_colors() {
        let settings = PlotSettings::parse("scatter_edge_color = \"black\"\n").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn it_rejects_unknown_types() {
        assert!(PlotSettings::parse("dpi = \"high\"\n").is_err());
    }

    #[test]
    fn it_converts_points_to_pixels() {
        let settings = PlotSettings {
            dpi: 144.0,
            ..Default::default()
        };
        assert_abs_diff_eq!(settings.points_to_pixels(15.0), 30.0);
        // 100 pt² is a 10 pt wide marker
        assert_eq!(settings.marker_radius(100.0), 10);
        assert_eq!(settings.stroke_width(0.5), 1);
        assert_eq!(settings.stroke_width(2.0), 4);
        assert_eq!(settings.font_size(12.0), 24.0);
    }

    #[test]
    fn it_drops_zero_width_edges() {
        let settings = PlotSettings::parse("scatter_line_width = 0.0\n").unwrap();
        settings.validate().unwrap();
        assert_eq!(settings.edge_width(settings.scatter_line_width), None);
        assert_eq!(settings.edge_width(0.5), Some(1));
    }

    #[test]
    fn it_reads_settings_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot_pars.toml");
        std::fs::write(&path, "dpi = 100\ngrid_y = 4\n").unwrap();

        let settings = PlotSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.dpi, 100.0);
        assert_eq!(settings.grid_y, 4);

        assert!(PlotSettings::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
