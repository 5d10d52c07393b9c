use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Deserializer,
};

use crate::{
    catalog::CatalogKey,
    coords::EquatorialCoordinates,
    Error,
};

/*
Cluster,RA,DEC,Dm,A_OC02,D_OC02,A_CG20,D_CG20,A_WEBDA,D_WEBDA,A_MWSC,D_MWSC
Ber73,95.50,-6.35,2,9.18,9800,9.15,6158,9.36,6850,9.15,7881
*/
const CLUSTERS_TABLE: &str = include_str!("../data/clusters.csv");

/// One catalog's entry for a cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CatalogEstimate {
    /// `A_*` column: log10 of the age in years.
    pub log_age: Option<f64>,

    /// `D_*` column: heliocentric distance in parsec.
    pub distance: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct ClusterRecord {
    pub name: String,
    pub position: EquatorialCoordinates,
    /// Apparent diameter in arcmin.
    pub diameter: Option<f64>,
    pub estimates: BTreeMap<CatalogKey, CatalogEstimate>,
}

impl ClusterRecord {
    pub fn estimate(&self, catalog: CatalogKey) -> CatalogEstimate {
        self.estimates.get(&catalog).copied().unwrap_or_default()
    }

    /// Distance in parsec, if the catalog lists one.
    pub fn distance(&self, catalog: CatalogKey) -> Option<f64> {
        self.estimate(catalog).distance
    }
}

#[derive(Clone, Debug, Deserialize)]
struct Row {
    #[serde(rename = "Cluster")]
    name: String,
    #[serde(rename = "RA")]
    ra: f64,
    #[serde(rename = "DEC")]
    dec: f64,
    #[serde(rename = "Dm", deserialize_with = "nan_option")]
    diameter: Option<f64>,
    #[serde(rename = "A_OC02", deserialize_with = "nan_option")]
    a_oc02: Option<f64>,
    #[serde(rename = "D_OC02", deserialize_with = "nan_option")]
    d_oc02: Option<f64>,
    #[serde(rename = "A_CG20", deserialize_with = "nan_option")]
    a_cg20: Option<f64>,
    #[serde(rename = "D_CG20", deserialize_with = "nan_option")]
    d_cg20: Option<f64>,
    #[serde(rename = "A_WEBDA", deserialize_with = "nan_option")]
    a_webda: Option<f64>,
    #[serde(rename = "D_WEBDA", deserialize_with = "nan_option")]
    d_webda: Option<f64>,
    #[serde(rename = "A_MWSC", deserialize_with = "nan_option")]
    a_mwsc: Option<f64>,
    #[serde(rename = "D_MWSC", deserialize_with = "nan_option")]
    d_mwsc: Option<f64>,
}

impl Row {
    fn into_record(self) -> Result<ClusterRecord, Error> {
        if !(0.0..360.0).contains(&self.ra) || !(-90.0..=90.0).contains(&self.dec) {
            return Err(Error::InvalidCoordinates {
                cluster: self.name,
                ra: self.ra,
                dec: self.dec,
            });
        }

        let estimates = [
            (CatalogKey::Mwsc, self.a_mwsc, self.d_mwsc),
            (CatalogKey::Webda, self.a_webda, self.d_webda),
            (CatalogKey::Oc02, self.a_oc02, self.d_oc02),
            (CatalogKey::Cg20, self.a_cg20, self.d_cg20),
        ];

        let mut by_catalog = BTreeMap::new();
        for (catalog, log_age, distance) in estimates {
            if let Some(distance) = distance {
                if !distance.is_finite() || distance <= 0.0 {
                    return Err(Error::InvalidDistance {
                        cluster: self.name,
                        catalog,
                        distance,
                    });
                }
            }
            by_catalog.insert(catalog, CatalogEstimate { log_age, distance });
        }

        Ok(ClusterRecord {
            name: self.name,
            position: EquatorialCoordinates {
                right_ascension: self.ra,
                declination: self.dec,
            },
            diameter: self.diameter,
            estimates: by_catalog,
        })
    }
}

/// `nan` marks a missing value in the table.
fn nan_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_nan()))
}

/// The cluster table, in table order.
#[derive(Clone, Debug)]
pub struct Clusters {
    records: Vec<ClusterRecord>,
}

impl Clusters {
    /// Loads the table compiled into the crate.
    pub fn embedded() -> Result<Self, Error> {
        Self::parse(CLUSTERS_TABLE)
    }

    pub fn parse(table: &str) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(table.as_bytes());

        let mut records = vec![];
        for row in reader.deserialize::<Row>() {
            let row = row.map_err(|source| {
                Error::Csv {
                    source,
                    table: "clusters",
                }
            })?;
            records.push(row.into_record()?);
        }

        let clusters = Self { records };
        if clusters.is_empty() {
            return Err(Error::EmptyTable { table: "clusters" });
        }
        Ok(clusters)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClusterRecord> {
        self.records.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ClusterRecord> {
        self.records.iter().find(|record| record.name == name)
    }
}

impl<'a> IntoIterator for &'a Clusters {
    type Item = &'a ClusterRecord;
    type IntoIter = std::slice::Iter<'a, ClusterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Cluster,RA,DEC,Dm,A_OC02,D_OC02,A_CG20,D_CG20,A_WEBDA,D_WEBDA,A_MWSC,D_MWSC";

    #[test]
    fn it_loads_the_embedded_table() {
        let clusters = Clusters::embedded().unwrap();
        assert_eq!(clusters.len(), 25);
        assert_eq!(clusters.iter().next().unwrap().name, "Ber73");
        assert_eq!(clusters.iter().last().unwrap().name, "Ber102");
    }

    #[test]
    fn it_maps_columns_to_catalogs() {
        let clusters = Clusters::embedded().unwrap();
        let ber73 = clusters.get("Ber73").unwrap();

        assert_eq!(ber73.position.right_ascension, 95.5);
        assert_eq!(ber73.position.declination, -6.35);
        assert_eq!(ber73.diameter, Some(2.0));
        assert_eq!(ber73.distance(CatalogKey::Mwsc), Some(7881.0));
        assert_eq!(ber73.distance(CatalogKey::Webda), Some(6850.0));
        assert_eq!(ber73.distance(CatalogKey::Oc02), Some(9800.0));
        assert_eq!(ber73.distance(CatalogKey::Cg20), Some(6158.0));
        assert_eq!(ber73.estimate(CatalogKey::Webda).log_age, Some(9.36));
    }

    #[test]
    fn it_reads_nan_as_missing() {
        let clusters = Clusters::embedded().unwrap();

        let fsr1212 = clusters.get("FSR1212").unwrap();
        assert_eq!(fsr1212.diameter, None);
        assert_eq!(fsr1212.distance(CatalogKey::Webda), None);
        assert_eq!(fsr1212.distance(CatalogKey::Oc02), None);
        assert_eq!(fsr1212.distance(CatalogKey::Mwsc), Some(1780.0));

        // distance without an age
        let kronberger39 = clusters.get("Kronberger39").unwrap();
        assert_eq!(
            kronberger39.estimate(CatalogKey::Oc02),
            CatalogEstimate {
                log_age: None,
                distance: Some(11100.0)
            }
        );
    }

    #[test]
    fn it_only_has_positive_distances() {
        let clusters = Clusters::embedded().unwrap();
        for cluster in &clusters {
            for catalog in CatalogKey::all() {
                if let Some(distance) = cluster.distance(catalog) {
                    assert!(distance.is_finite() && distance > 0.0);
                }
            }
        }
    }

    #[test]
    fn it_rejects_non_positive_distances() {
        let table = format!("{HEADER}\nBad1,10.0,10.0,1,nan,nan,nan,nan,nan,-5,nan,nan\n");
        match Clusters::parse(&table) {
            Err(Error::InvalidDistance {
                cluster, catalog, ..
            }) => {
                assert_eq!(cluster, "Bad1");
                assert_eq!(catalog, CatalogKey::Webda);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn it_rejects_out_of_range_coordinates() {
        let table = format!("{HEADER}\nBad2,10.0,95.0,1,nan,nan,nan,nan,nan,nan,nan,1000\n");
        assert!(matches!(
            Clusters::parse(&table),
            Err(Error::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn it_rejects_malformed_rows() {
        let table = format!("{HEADER}\nBad3,ten,10.0,1,nan,nan,nan,nan,nan,nan,nan,1000\n");
        assert!(matches!(
            Clusters::parse(&table),
            Err(Error::Csv {
                table: "clusters",
                ..
            })
        ));
    }

    #[test]
    fn it_rejects_empty_tables() {
        assert!(matches!(
            Clusters::parse(&format!("{HEADER}\n")),
            Err(Error::EmptyTable { table: "clusters" })
        ));
    }
}
