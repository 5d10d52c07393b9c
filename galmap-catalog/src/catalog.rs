use strum::{
    Display,
    EnumIter,
    IntoEnumIterator,
    IntoStaticStr,
};

/// Literature source of the cluster distances.
///
/// The declaration order is the order in which catalogs are reported and
/// drawn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr,
)]
pub enum CatalogKey {
    /// Milky Way Star Clusters (Kharchenko et al. 2013)
    #[strum(serialize = "MWSC")]
    Mwsc,
    /// WEBDA open cluster database
    #[strum(serialize = "WEBDA")]
    Webda,
    /// Dias et al. (2002)
    #[strum(serialize = "OC02")]
    Oc02,
    /// Cantat-Gaudin et al. (2020)
    #[strum(serialize = "CG20")]
    Cg20,
}

impl CatalogKey {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Name of the distance column in the cluster table.
    pub fn distance_column(&self) -> &'static str {
        match self {
            Self::Mwsc => "D_MWSC",
            Self::Webda => "D_WEBDA",
            Self::Oc02 => "D_OC02",
            Self::Cg20 => "D_CG20",
        }
    }

    /// Name of the age column in the cluster table.
    pub fn age_column(&self) -> &'static str {
        match self {
            Self::Mwsc => "A_MWSC",
            Self::Webda => "A_WEBDA",
            Self::Oc02 => "A_OC02",
            Self::Cg20 => "A_CG20",
        }
    }
}
