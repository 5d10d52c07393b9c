use std::collections::BTreeMap;

use nalgebra::Point3;

use crate::{
    catalog::CatalogKey,
    clusters::Clusters,
    coords::GalactocentricFrame,
};

/// Galactocentric (x, y, z) in kpc.
pub type GalacticPosition = Point3<f64>;

/// Galactocentric positions of every cluster under every catalog.
///
/// Rows follow the order of the cluster table. A cluster without a distance
/// in some catalog has `None` in that catalog's column.
#[derive(Clone, Debug)]
pub struct PositionTable {
    names: Vec<String>,
    positions: BTreeMap<CatalogKey, Vec<Option<GalacticPosition>>>,
    sun: GalacticPosition,
}

impl PositionTable {
    pub fn compute(clusters: &Clusters, frame: &GalactocentricFrame) -> Self {
        let transform = frame.transform();

        let names = clusters
            .iter()
            .map(|cluster| cluster.name.clone())
            .collect::<Vec<_>>();

        // shared by all catalogs
        let galactic = clusters
            .iter()
            .map(|cluster| {
                let galactic = cluster.position.to_galactic();
                tracing::debug!(
                    cluster = %cluster.name,
                    l = galactic.longitude,
                    b = galactic.latitude,
                    "galactic coordinates"
                );
                galactic
            })
            .collect::<Vec<_>>();

        let mut positions = BTreeMap::new();
        for catalog in CatalogKey::all() {
            let column = clusters
                .iter()
                .zip(&galactic)
                .map(|(cluster, galactic)| {
                    let position = transform.apply(galactic, cluster.distance(catalog));
                    if let Some(position) = &position {
                        tracing::debug!(
                            cluster = %cluster.name,
                            %catalog,
                            x = position.x,
                            y = position.y,
                            z = position.z,
                            "galactocentric position"
                        );
                    }
                    position
                })
                .collect::<Vec<_>>();

            tracing::info!(
                %catalog,
                defined = column.iter().flatten().count(),
                total = column.len(),
                "transformed catalog"
            );

            positions.insert(catalog, column);
        }

        Self {
            names,
            positions,
            sun: transform.sun(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn sun(&self) -> GalacticPosition {
        self.sun
    }

    /// One entry per cluster, `None` where the catalog has no distance.
    pub fn positions(&self, catalog: CatalogKey) -> &[Option<GalacticPosition>] {
        self.positions
            .get(&catalog)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Only the clusters that have a position in this catalog.
    pub fn defined(&self, catalog: CatalogKey) -> impl Iterator<Item = &GalacticPosition> + '_ {
        self.positions(catalog).iter().flatten()
    }

    pub fn position(&self, catalog: CatalogKey, index: usize) -> Option<GalacticPosition> {
        self.positions(catalog).get(index).copied().flatten()
    }

    /// Galactocentric radius in kpc.
    pub fn radius(&self, catalog: CatalogKey, index: usize) -> Option<f64> {
        self.position(catalog, index)
            .map(|position| position.coords.norm())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn table() -> PositionTable {
        let clusters = Clusters::embedded().unwrap();
        PositionTable::compute(&clusters, &GalactocentricFrame::default())
    }

    fn index_of(table: &PositionTable, name: &str) -> usize {
        table.names().iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn it_has_a_column_per_catalog() {
        let table = table();
        assert_eq!(table.len(), 25);
        for catalog in CatalogKey::all() {
            assert_eq!(table.positions(catalog).len(), table.len());
        }
    }

    #[test]
    fn it_has_finite_radii_for_defined_distances() {
        let clusters = Clusters::embedded().unwrap();
        let table = PositionTable::compute(&clusters, &GalactocentricFrame::default());

        for (index, cluster) in clusters.iter().enumerate() {
            for catalog in CatalogKey::all() {
                let radius = table.radius(catalog, index);
                match cluster.distance(catalog) {
                    Some(_) => {
                        let radius = radius.unwrap();
                        assert!(radius.is_finite());
                        assert!(radius >= 0.0);
                    }
                    None => assert_eq!(radius, None),
                }
            }
        }
    }

    #[test]
    fn it_leaves_undefined_distances_out() {
        let table = table();

        // FSR1212 only lacks WEBDA and OC02 distances
        let fsr1212 = index_of(&table, "FSR1212");
        assert!(table.position(CatalogKey::Mwsc, fsr1212).is_some());
        assert!(table.position(CatalogKey::Cg20, fsr1212).is_some());
        assert!(table.position(CatalogKey::Webda, fsr1212).is_none());
        assert!(table.position(CatalogKey::Oc02, fsr1212).is_none());

        // vdBH4 is only in WEBDA
        let vdbh4 = index_of(&table, "vdBH4");
        assert!(table.position(CatalogKey::Webda, vdbh4).is_some());
        assert!(table.position(CatalogKey::Mwsc, vdbh4).is_none());

        assert_eq!(table.defined(CatalogKey::Mwsc).count(), 24);
        assert_eq!(table.defined(CatalogKey::Webda).count(), 21);
        assert_eq!(table.defined(CatalogKey::Oc02).count(), 21);
        assert_eq!(table.defined(CatalogKey::Cg20).count(), 16);
    }

    #[test]
    fn it_reports_the_sun() {
        let table = table();
        assert_abs_diff_eq!(table.sun().x, -8.29996, epsilon = 1e-4);
        assert_abs_diff_eq!(table.sun().z, 0.027, epsilon = 1e-12);
    }

    #[test]
    fn it_computes_radii() {
        let table = table();
        let ber73 = index_of(&table, "Ber73");
        let radius = table.radius(CatalogKey::Mwsc, ber73).unwrap();
        assert_abs_diff_eq!(radius, 15.374, epsilon = 1e-3);
        let radius = table.radius(CatalogKey::Cg20, ber73).unwrap();
        assert_abs_diff_eq!(radius, 13.753, epsilon = 1e-3);

        let vdbh4 = index_of(&table, "vdBH4");
        let radius = table.radius(CatalogKey::Webda, vdbh4).unwrap();
        assert_abs_diff_eq!(radius, 23.456, epsilon = 1e-3);
    }
}
