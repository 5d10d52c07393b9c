use std::f64::consts::{
    FRAC_PI_2,
    PI,
    TAU,
};

use galmap_catalog::CatalogKey;

/// Scatter marker shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Star,
    TriangleDown,
    TriangleUp,
}

impl Marker {
    pub fn for_catalog(catalog: CatalogKey) -> Self {
        match catalog {
            CatalogKey::Mwsc => Self::Circle,
            CatalogKey::Webda => Self::Star,
            CatalogKey::Oc02 => Self::TriangleDown,
            CatalogKey::Cg20 => Self::TriangleUp,
        }
    }

    /// Polygon vertices around the marker center, in pixels with y pointing
    /// down. `radius` is the radius of the circle enclosing the marker.
    pub fn vertices(&self, radius: i32) -> Vec<(i32, i32)> {
        let radius = f64::from(radius);
        match self {
            Self::Circle => regular(24, radius, 0.0),
            // five-pointed star, inner radius as in matplotlib's `*`
            Self::Star => {
                (0..10)
                    .map(|i| {
                        let r = if i % 2 == 0 { radius } else { 0.381966 * radius };
                        polar(r, FRAC_PI_2 + f64::from(i) * PI / 5.0)
                    })
                    .collect()
            }
            Self::TriangleDown => regular(3, radius, -FRAC_PI_2),
            Self::TriangleUp => regular(3, radius, FRAC_PI_2),
        }
    }

    /// Closed outline for drawing the marker edge.
    pub fn outline(&self, radius: i32) -> Vec<(i32, i32)> {
        let mut outline = self.vertices(radius);
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        outline
    }
}

fn regular(sides: u32, radius: f64, start: f64) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|i| polar(radius, start + f64::from(i) * TAU / f64::from(sides)))
        .collect()
}

/// Mathematical angle, counterclockwise from +x, flipped into screen space.
fn polar(radius: f64, angle: f64) -> (i32, i32) {
    (
        (radius * angle.cos()).round() as i32,
        (-radius * angle.sin()).round() as i32,
    )
}
