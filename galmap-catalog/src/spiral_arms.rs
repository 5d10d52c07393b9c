//! Spiral arm traces of the Milky Way.
//!
//! Obtained from Momany et al. (2006), "Outer structure of the Galactic warp
//! and flare: explaining the Canis Major over-density". Points are (x, y) in
//! kpc in the Galactocentric frame.

use itertools::Itertools;
use lazy_static::lazy_static;
use nalgebra::Point2;
use serde::Deserialize;
use strum::{
    Display,
    EnumIter,
    IntoEnumIterator,
};

use crate::Error;

lazy_static! {
    static ref MOMANY_2006: Vec<SpiralArm> =
        SpiralArm::load_table(include_str!("../data/momany2006.csv")).unwrap();
}

/// All spiral arms, in the order [`Arm`] declares them.
pub fn spiral_arms() -> &'static [SpiralArm] {
    &MOMANY_2006
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Display, EnumIter,
)]
pub enum Arm {
    Outer,
    Perseus,
    #[serde(rename = "Orion-Cygnus")]
    #[strum(serialize = "Orion-Cygnus")]
    OrionCygnus,
    #[serde(rename = "Carina-Sagittarius")]
    #[strum(serialize = "Carina-Sagittarius")]
    CarinaSagittarius,
    #[serde(rename = "Crux-Scutum")]
    #[strum(serialize = "Crux-Scutum")]
    CruxScutum,
    Norma,
}

#[derive(Clone, Debug)]
pub struct SpiralArm {
    pub arm: Arm,
    pub points: Vec<Point2<f64>>,
}

impl SpiralArm {
    pub fn name(&self) -> String {
        self.arm.to_string()
    }

    /// Parses a table of `arm,x,y` rows. Rows of one arm must be contiguous
    /// and in trace order.
    fn load_table(table: &str) -> Result<Vec<Self>, Error> {
        #[derive(Deserialize)]
        struct Row {
            arm: Arm,
            x: f64,
            y: f64,
        }

        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let rows = reader
            .deserialize::<Row>()
            .collect::<Result<Vec<Row>, _>>()
            .map_err(|source| {
                Error::Csv {
                    source,
                    table: "spiral arms",
                }
            })?;

        let mut arms: Vec<SpiralArm> = vec![];
        let chunks = rows.iter().chunk_by(|row| row.arm);
        for (arm, chunk) in &chunks {
            if arms.iter().any(|spiral_arm| spiral_arm.arm == arm) {
                return Err(Error::DuplicateArm { arm });
            }
            arms.push(SpiralArm {
                arm,
                points: chunk.map(|row| Point2::new(row.x, row.y)).collect(),
            });
        }

        arms.sort_by_key(|spiral_arm| spiral_arm.arm);

        for arm in Arm::iter() {
            if !arms.iter().any(|spiral_arm| spiral_arm.arm == arm) {
                return Err(Error::EmptyArm { arm });
            }
        }

        Ok(arms)
    }
}
