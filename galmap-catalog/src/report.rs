use std::fmt::Display;

use crate::{
    catalog::CatalogKey,
    positions::PositionTable,
};

/// Galactocentric radii of all clusters, one line per cluster.
///
/// ```text
/// Ber73             15.37  14.40  17.20  13.75
/// FSR1212            9.59    nan    nan  16.47
/// ```
pub fn radial_distances(table: &PositionTable) -> RadialDistances<'_> {
    RadialDistances(table)
}

#[derive(Debug)]
pub struct RadialDistances<'a>(&'a PositionTable);

impl<'a> Display for RadialDistances<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, name) in self.0.names().iter().enumerate() {
            write!(f, "{name:<15} ")?;
            for catalog in CatalogKey::all() {
                write!(f, " {}", FormattedRadius(self.0.radius(catalog, index)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct FormattedRadius(Option<f64>);

impl Display for FormattedRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(radius) => write!(f, "{radius:>6.2}"),
            None => write!(f, "{:>6}", "nan"),
        }
    }
}
