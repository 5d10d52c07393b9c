//! Cluster catalog and Galactocentric coordinates.
//!
//! The crate embeds the literature table of open clusters together with the
//! four distance catalogs it quotes, transforms every cluster into the
//! Galactocentric frame once per catalog and provides the Momany et al. (2006)
//! spiral arm traces used as a reference overlay.

pub mod catalog;
pub mod clusters;
pub mod coords;
pub mod positions;
pub mod report;
pub mod spiral_arms;

pub use crate::{
    catalog::CatalogKey,
    clusters::{
        CatalogEstimate,
        ClusterRecord,
        Clusters,
    },
    coords::{
        EquatorialCoordinates,
        GalacticCoordinates,
        GalactocentricFrame,
        GalactocentricTransform,
    },
    positions::{
        GalacticPosition,
        PositionTable,
    },
    report::radial_distances,
    spiral_arms::{
        spiral_arms,
        Arm,
        SpiralArm,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error while parsing embedded table: {table}")]
    Csv {
        #[source]
        source: csv::Error,
        table: &'static str,
    },
    #[error("Embedded table has no rows: {table}")]
    EmptyTable { table: &'static str },
    #[error("Coordinates of {cluster} out of range: ra = {ra}, dec = {dec}")]
    InvalidCoordinates { cluster: String, ra: f64, dec: f64 },
    #[error("Invalid {catalog} distance for {cluster}: {distance} pc")]
    InvalidDistance {
        cluster: String,
        catalog: CatalogKey,
        distance: f64,
    },
    #[error("Spiral arm has no points: {arm}")]
    EmptyArm { arm: Arm },
    #[error("Spiral arm appears twice in table: {arm}")]
    DuplicateArm { arm: Arm },
}
