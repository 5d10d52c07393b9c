//! Three-panel map of the cluster positions.
//!
//! The main panel shows the Galactic plane (x-y) with the spiral arm traces,
//! the two side panels show the vertical distribution (x-z and y-z).

mod colormap;
mod layout;
mod marker;

use std::path::Path;

use color_eyre::eyre::{
    Error,
    WrapErr,
};
use galmap_catalog::{
    Arm,
    CatalogKey,
    GalacticPosition,
    PositionTable,
    SpiralArm,
};
use plotters::{
    chart::SeriesAnno,
    coord::{
        types::RangedCoordf64,
        Shift,
    },
    prelude::*,
    style::text_anchor::{
        HPos,
        Pos,
        VPos,
    },
};

use self::{
    layout::{
        GridSpec,
        Span,
    },
    marker::Marker,
};
use crate::settings::PlotSettings;

const MAIN_SPAN: Span = Span::new((0, 4), (0, 4));
const XZ_SPAN: Span = Span::new((0, 2), (4, 8));
const YZ_SPAN: Span = Span::new((2, 4), (4, 8));

const X_BOUNDS: (f64, f64) = (-24.0, 11.0);
const Y_BOUNDS: (f64, f64) = (-19.0, 16.0);
const Z_BOUNDS: (f64, f64) = (-2.6, 2.6);

const CATALOG_ALPHA: f64 = 0.8;
const SIDE_SCATTER_AREA: f64 = 100.0;
const SIDE_EDGE_WIDTH: f64 = 0.5;
const SUN_AREA: f64 = 50.0;
const GALACTIC_CENTER_AREA: f64 = 150.0;
const ARM_LINE_WIDTH: f64 = 2.0;
const ZERO_LINE_WIDTH: f64 = 1.0;
const TICK_FONT: f64 = 15.0;
const LEGEND_FONT: f64 = 12.0;
const FONT_FAMILY: &str = "sans-serif";

const ZERO_LINE_COLOR: RGBColor = RGBColor(128, 128, 128);
const SUN_COLOR: RGBColor = RGBColor(255, 255, 0);
const NO_EDGE: ShapeStyle = ShapeStyle {
    color: RGBAColor(0, 0, 0, 0.0),
    filled: false,
    stroke_width: 0,
};

type PanelCoord = Cartesian2d<RangedCoordf64, RangedCoordf64>;
type Chart<'a, DB> = ChartContext<'a, DB, PanelCoord>;

/// Pair of Galactocentric axes a panel plots against each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    XY,
    XZ,
    YZ,
}

impl Projection {
    pub fn project(&self, position: &GalacticPosition) -> (f64, f64) {
        match self {
            Self::XY => (position.x, position.y),
            Self::XZ => (position.x, position.z),
            Self::YZ => (position.y, position.z),
        }
    }

    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        match self {
            Self::XY => (X_BOUNDS, Y_BOUNDS),
            Self::XZ => (X_BOUNDS, Z_BOUNDS),
            Self::YZ => (Y_BOUNDS, Z_BOUNDS),
        }
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::XY => ("x_GC [kpc]", "y_GC [kpc]"),
            Self::XZ => ("x_GC [kpc]", "z_GC [kpc]"),
            Self::YZ => ("y_GC [kpc]", "z_GC [kpc]"),
        }
    }
}

/// Projected positions of all clusters with a distance in `catalog`.
pub fn scatter_points(
    table: &PositionTable,
    catalog: CatalogKey,
    projection: Projection,
) -> Vec<(f64, f64)> {
    table
        .defined(catalog)
        .map(|position| projection.project(position))
        .collect()
}

pub fn catalog_color(catalog: CatalogKey) -> RGBColor {
    // interior samples at 3/14, 6/14, 9/14 and 12/14
    let index = match catalog {
        CatalogKey::Mwsc => 2,
        CatalogKey::Webda => 5,
        CatalogKey::Oc02 => 8,
        CatalogKey::Cg20 => 11,
    };
    colormap::to_rgb(colormap::palette(13)[index])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stroke {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl Stroke {
    /// Dash and gap length in pt. A dash-dot line is drawn as long dashes.
    fn dashes(&self) -> Option<(f64, f64)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((7.4, 3.2)),
            Self::DashDot => Some((12.8, 3.2)),
            Self::Dotted => Some((2.0, 3.3)),
        }
    }
}

fn arm_style(arm: Arm) -> (RGBColor, Stroke) {
    match arm {
        Arm::Outer => (RGBColor(0x0b, 0x5c, 0xa4), Stroke::DashDot),
        Arm::Perseus => (RGBColor(255, 165, 0), Stroke::Dashed),
        Arm::OrionCygnus => (BLACK, Stroke::Solid),
        Arm::CarinaSagittarius => (BLUE, Stroke::Dotted),
        Arm::CruxScutum => (RGBColor(128, 0, 128), Stroke::DashDot),
        Arm::Norma => (RGBColor(0, 128, 0), Stroke::Dotted),
    }
}

struct Panel {
    projection: Projection,
    span: Span,
    scatter_area: f64,
    edge_color: RGBColor,
    edge_width: f64,
    /// Spiral arms and legends.
    overlays: bool,
}

impl Panel {
    fn main(settings: &PlotSettings) -> Result<Self, Error> {
        Ok(Self {
            projection: Projection::XY,
            span: MAIN_SPAN,
            scatter_area: 2.0 * settings.scatter_size,
            edge_color: settings.edge_color()?,
            edge_width: settings.scatter_line_width,
            overlays: true,
        })
    }

    fn side(projection: Projection, span: Span) -> Self {
        Self {
            projection,
            span,
            scatter_area: SIDE_SCATTER_AREA,
            edge_color: BLACK,
            edge_width: SIDE_EDGE_WIDTH,
            overlays: false,
        }
    }

    /// Marker edge, `None` for a zero edge width.
    fn edge_style(&self, settings: &PlotSettings) -> Option<ShapeStyle> {
        settings
            .edge_width(self.edge_width)
            .map(|width| self.edge_color.stroke_width(width))
    }
}

/// Renders the figure to a PNG at `path`, creating the parent directory if
/// needed.
pub fn render_figure(
    path: &Path,
    table: &PositionTable,
    arms: &[SpiralArm],
    settings: &PlotSettings,
) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Error while creating directory: {}", parent.display()))?;
    }

    if table.is_empty() {
        tracing::warn!("no clusters to draw");
    }

    let panels = [
        Panel::main(settings)?,
        Panel::side(Projection::XZ, XZ_SPAN),
        Panel::side(Projection::YZ, YZ_SPAN),
    ];

    let grid = GridSpec::new(settings.grid_y, settings.grid_x, settings.canvas_size());
    let spans = panels.iter().map(|panel| panel.span).collect::<Vec<_>>();
    let bounds = grid.bounding_box(&spans);
    tracing::debug!(
        width = bounds.width,
        height = bounds.height,
        "rendering figure"
    );

    let root = BitMapBackend::new(path, (bounds.width, bounds.height)).into_drawing_area();
    root.fill(&WHITE)?;

    for panel in &panels {
        let rect = grid.rect(panel.span);
        let area = root
            .clone()
            .shrink(rect.offset_from(&bounds), (rect.width, rect.height));
        draw_panel(&area, panel, table, arms, settings)?;
    }

    root.present()
        .wrap_err_with(|| format!("Error while writing figure: {}", path.display()))?;

    Ok(())
}

/// Draws one panel and returns its data to pixel mapping.
fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    table: &PositionTable,
    arms: &[SpiralArm],
    settings: &PlotSettings,
) -> Result<PanelCoord, Error>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let tick_font = settings.font_size(TICK_FONT);
    let ((x_min, x_max), (y_min, y_max)) = panel.projection.bounds();
    let (x_label, y_label) = panel.projection.axis_labels();

    let mut chart = ChartBuilder::on(area)
        .margin(tick_font as i32)
        .x_label_area_size((3.0 * tick_font) as i32)
        .y_label_area_size((4.0 * tick_font) as i32)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style((FONT_FAMILY, tick_font))
        .axis_desc_style((FONT_FAMILY, tick_font))
        .draw()?;

    let zero_line = ZERO_LINE_COLOR.stroke_width(settings.stroke_width(ZERO_LINE_WIDTH));
    draw_line(
        &mut chart,
        vec![(x_min, 0.0), (x_max, 0.0)],
        zero_line,
        Stroke::Dotted,
        settings,
    )?;
    draw_line(
        &mut chart,
        vec![(0.0, y_min), (0.0, y_max)],
        zero_line,
        Stroke::Dotted,
        settings,
    )?;

    if panel.overlays {
        for arm in arms {
            let (color, stroke) = arm_style(arm.arm);
            draw_line(
                &mut chart,
                arm.points.iter().map(|point| (point.x, point.y)).collect(),
                color.stroke_width(settings.stroke_width(ARM_LINE_WIDTH)),
                stroke,
                settings,
            )?;
        }
    }

    let edge = panel.edge_style(settings);
    let radius = settings.marker_radius(panel.scatter_area);
    for catalog in CatalogKey::all() {
        let points = scatter_points(table, catalog, panel.projection);
        let marker = Marker::for_catalog(catalog);
        let fill = catalog_color(catalog).mix(CATALOG_ALPHA).filled();
        tracing::trace!(%catalog, points = points.len(), "drawing scatter");

        let series = draw_markers(&mut chart, points, marker, radius, fill, edge)?;
        if panel.overlays {
            let legend_radius = settings.marker_radius(settings.scatter_size);
            series
                .label(catalog.label())
                .legend(move |(x, y)| {
                    Polygon::new(
                        marker
                            .vertices(legend_radius)
                            .into_iter()
                            .map(|(dx, dy)| (x + dx, y + dy))
                            .collect::<Vec<_>>(),
                        fill,
                    )
                });
        }
    }

    // the Sun sits right above the Galactic Center in the y-z panel
    draw_markers(
        &mut chart,
        vec![(0.0, 0.0)],
        Marker::Circle,
        settings.marker_radius(GALACTIC_CENTER_AREA),
        BLACK.filled(),
        None,
    )?;
    let sun = table.sun();
    draw_markers(
        &mut chart,
        vec![panel.projection.project(&sun)],
        Marker::Circle,
        settings.marker_radius(SUN_AREA),
        SUN_COLOR.filled(),
        settings
            .edge_width(SIDE_EDGE_WIDTH)
            .map(|width| BLACK.stroke_width(width)),
    )?;

    if panel.overlays {
        let legend_font = settings.font_size(LEGEND_FONT);
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, legend_font))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        draw_arm_legend(&mut chart, arms, panel.projection, settings)?;
    }

    Ok(chart.as_coord_spec().clone())
}

fn draw_markers<'a, 'b, DB>(
    chart: &'b mut Chart<'a, DB>,
    points: Vec<(f64, f64)>,
    marker: Marker,
    radius: i32,
    fill: ShapeStyle,
    edge: Option<ShapeStyle>,
) -> Result<&'b mut SeriesAnno<'a, DB>, Error>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    let series = chart.draw_series(PointSeries::of_element(
        points,
        radius,
        fill,
        &move |coord, size, style| {
            EmptyElement::at(coord)
                + Polygon::new(marker.vertices(size), style)
                + PathElement::new(marker.outline(size), edge.unwrap_or(NO_EDGE))
        },
    ))?;
    Ok(series)
}

fn draw_line<DB>(
    chart: &mut Chart<'_, DB>,
    points: Vec<(f64, f64)>,
    style: ShapeStyle,
    stroke: Stroke,
    settings: &PlotSettings,
) -> Result<(), Error>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    match stroke.dashes() {
        None => {
            chart.draw_series(LineSeries::new(points, style))?;
        }
        Some((dash, gap)) => {
            let dash = settings.points_to_pixels(dash).round().max(1.0) as i32;
            let gap = settings.points_to_pixels(gap).round().max(1.0) as i32;
            chart.draw_series(DashedLineSeries::new(points, dash, gap, style))?;
        }
    }
    Ok(())
}

/// Legend of the arm line styles, in the lower right corner of the panel.
fn draw_arm_legend<DB>(
    chart: &mut Chart<'_, DB>,
    arms: &[SpiralArm],
    projection: Projection,
    settings: &PlotSettings,
) -> Result<(), Error>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let font = settings.font_size(LEGEND_FONT);
    let ((x_min, x_max), (y_min, y_max)) = projection.bounds();

    // data units per pixel
    let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
    let x_scale = (x_max - x_min) / f64::from((x_pixels.end - x_pixels.start).max(1));
    let y_scale = (y_max - y_min) / f64::from((y_pixels.end - y_pixels.start).max(1));

    let longest_name = arms
        .iter()
        .map(|arm| arm.name().chars().count())
        .max()
        .unwrap_or(0);
    let padding = 0.6 * font;
    let row_height = 1.5 * font;
    let sample_length = 2.5 * font;
    let width = 2.0 * padding + sample_length + padding + 0.6 * font * longest_name as f64;
    let height = 2.0 * padding + row_height * arms.len() as f64;

    let right = x_max - padding * x_scale;
    let left = right - width * x_scale;
    let bottom = y_min + padding * y_scale;
    let top = bottom + height * y_scale;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, top), (right, bottom)],
        WHITE.mix(0.8).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, top), (right, bottom)],
        BLACK.stroke_width(1),
    )))?;

    let text_style = TextStyle::from((FONT_FAMILY, font).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (row, arm) in arms.iter().enumerate() {
        let y = top - (padding + row_height * (row as f64 + 0.5)) * y_scale;
        let sample_start = left + padding * x_scale;
        let sample_end = sample_start + sample_length * x_scale;

        let (color, stroke) = arm_style(arm.arm);
        draw_line(
            chart,
            vec![(sample_start, y), (sample_end, y)],
            color.stroke_width(settings.stroke_width(ARM_LINE_WIDTH)),
            stroke,
            settings,
        )?;
        chart.draw_series(std::iter::once(Text::new(
            arm.name(),
            (sample_end + padding * x_scale, y),
            text_style.clone(),
        )))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use galmap_catalog::{
        spiral_arms,
        Clusters,
        GalactocentricFrame,
    };
    use plotters::coord::CoordTranslate;

    use super::*;

    fn table() -> PositionTable {
        let clusters = Clusters::embedded().unwrap();
        PositionTable::compute(&clusters, &GalactocentricFrame::default())
    }

    #[test]
    fn it_leaves_out_undefined_distances() {
        let table = table();
        let counts = CatalogKey::all()
            .map(|catalog| scatter_points(&table, catalog, Projection::XY).len())
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![24, 21, 21, 16]);

        // FSR1212 has no WEBDA distance but is drawn for MWSC and CG20
        let index = table
            .names()
            .iter()
            .position(|name| name == "FSR1212")
            .unwrap();
        let mwsc = table.position(CatalogKey::Mwsc, index).unwrap();
        let cg20 = table.position(CatalogKey::Cg20, index).unwrap();
        assert!(table.position(CatalogKey::Webda, index).is_none());
        assert!(scatter_points(&table, CatalogKey::Mwsc, Projection::XY)
            .contains(&Projection::XY.project(&mwsc)));
        assert!(scatter_points(&table, CatalogKey::Cg20, Projection::YZ)
            .contains(&Projection::YZ.project(&cg20)));
    }

    #[test]
    fn it_projects_onto_axis_pairs() {
        let position = GalacticPosition::new(1.0, 2.0, 3.0);
        assert_eq!(Projection::XY.project(&position), (1.0, 2.0));
        assert_eq!(Projection::XZ.project(&position), (1.0, 3.0));
        assert_eq!(Projection::YZ.project(&position), (2.0, 3.0));
    }

    #[test]
    fn it_colors_catalogs_distinctly() {
        let colors = CatalogKey::all().map(catalog_color).collect::<Vec<_>>();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn it_styles_every_arm() {
        for arm in spiral_arms() {
            let (_, stroke) = arm_style(arm.arm);
            assert_eq!(stroke == Stroke::Solid, arm.arm == Arm::OrionCygnus);
        }
    }

    #[test]
    fn it_skips_zero_width_edges() {
        let settings = PlotSettings {
            scatter_line_width: 0.0,
            ..Default::default()
        };
        assert!(Panel::main(&settings).unwrap().edge_style(&settings).is_none());
        assert!(Panel::side(Projection::XZ, XZ_SPAN)
            .edge_style(&settings)
            .is_some());
    }

    #[test]
    fn it_draws_the_sun_over_the_galactic_center() {
        let settings = PlotSettings::default();
        let table = table();
        let panel = Panel::side(Projection::YZ, YZ_SPAN);
        let grid = GridSpec::new(settings.grid_y, settings.grid_x, settings.canvas_size());
        let rect = grid.rect(panel.span);

        let mut buffer = vec![0u8; rect.width as usize * rect.height as usize * 3];
        let coord = {
            let area = BitMapBackend::with_buffer(&mut buffer, (rect.width, rect.height))
                .into_drawing_area();
            area.fill(&WHITE).unwrap();
            let coord = draw_panel(&area, &panel, &table, spiral_arms(), &settings).unwrap();
            area.present().unwrap();
            coord
        };

        let (x, y) = coord.translate(&Projection::YZ.project(&table.sun()));
        let offset = (y as usize * rect.width as usize + x as usize) * 3;
        assert_eq!(&buffer[offset..offset + 3], &[255, 255, 0]);
    }

    #[test]
    fn it_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("map.png");
        let settings = PlotSettings {
            dpi: 20.0,
            ..Default::default()
        };

        render_figure(&path, &table(), spiral_arms(), &settings).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert!(data.starts_with(b"\x89PNG"));
    }
}
