use lazy_static::lazy_static;
use nalgebra::{
    Matrix3,
    Point3,
    Vector3,
};

// J2000 orientation of the galactic frame: north galactic pole and the
// galactic longitude of the north celestial pole.
const NGP_RIGHT_ASCENSION: f64 = 192.8594812065348;
const NGP_DECLINATION: f64 = 27.12825118085622;
const NCP_GALACTIC_LONGITUDE: f64 = 122.9319185680026;

/// Roll that puts the galactic north pole in the x-z plane of the
/// Galactocentric frame.
const GALACTOCENTRIC_ROLL0: f64 = 58.5986320306;

const PARSEC_PER_KILOPARSEC: f64 = 1000.0;

lazy_static! {
    static ref EQUATORIAL_TO_GALACTIC: Matrix3<f64> =
        frame_rotation(Axis::Z, 180.0 - NCP_GALACTIC_LONGITUDE)
            * frame_rotation(Axis::Y, 90.0 - NGP_DECLINATION)
            * frame_rotation(Axis::Z, NGP_RIGHT_ASCENSION);
}

/// ICRS sky position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquatorialCoordinates {
    pub right_ascension: f64,
    pub declination: f64,
}

impl EquatorialCoordinates {
    pub fn to_galactic(&self) -> GalacticCoordinates {
        let v = *EQUATORIAL_TO_GALACTIC * unit_vector(self.right_ascension, self.declination);
        let (longitude, latitude) = spherical_angles(&v);
        GalacticCoordinates {
            longitude,
            latitude,
        }
    }
}

/// Galactic longitude and latitude in degrees. Longitude is wrapped into
/// (-180, 180].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalacticCoordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl GalacticCoordinates {
    /// Unit vector towards this position, in equatorial axes.
    pub fn equatorial_direction(&self) -> Vector3<f64> {
        EQUATORIAL_TO_GALACTIC.transpose() * unit_vector(self.longitude, self.latitude)
    }

    pub fn to_equatorial(&self) -> EquatorialCoordinates {
        let (right_ascension, declination) = spherical_angles(&self.equatorial_direction());
        EquatorialCoordinates {
            right_ascension: right_ascension.rem_euclid(360.0),
            declination,
        }
    }
}

/// Parameters of the Galactocentric frame.
///
/// The defaults place the Galactic Center 8.3 kpc from the Sun
/// (Gillessen et al. 2009) with the Sun 27 pc above the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalactocentricFrame {
    /// Sky position of the Galactic Center.
    pub galcen: EquatorialCoordinates,
    /// Sun to Galactic Center, in kpc.
    pub galcen_distance: f64,
    /// Height of the Sun above the midplane, in kpc.
    pub z_sun: f64,
    /// Extra rotation about the x axis, in degrees.
    pub roll: f64,
}

impl Default for GalactocentricFrame {
    fn default() -> Self {
        Self {
            galcen: EquatorialCoordinates {
                right_ascension: 266.4051,
                declination: -28.936175,
            },
            galcen_distance: 8.3,
            z_sun: 0.027,
            roll: 0.0,
        }
    }
}

impl GalactocentricFrame {
    pub fn transform(&self) -> GalactocentricTransform {
        // align x with the direction to the Galactic Center
        let alignment = frame_rotation(Axis::X, GALACTOCENTRIC_ROLL0 - self.roll)
            * frame_rotation(Axis::Y, -self.galcen.declination)
            * frame_rotation(Axis::Z, self.galcen.right_ascension);

        // tilt for the height of the Sun above the midplane
        let tilt = frame_rotation(
            Axis::Y,
            -(self.z_sun / self.galcen_distance).asin().to_degrees(),
        );

        GalactocentricTransform {
            rotation: tilt * alignment,
            offset: -(tilt * Vector3::new(self.galcen_distance, 0.0, 0.0)),
        }
    }
}

/// Maps heliocentric positions into the Galactocentric frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalactocentricTransform {
    rotation: Matrix3<f64>,
    offset: Vector3<f64>,
}

impl GalactocentricTransform {
    /// Position of the Sun, in kpc.
    pub fn sun(&self) -> Point3<f64> {
        Point3::from(self.offset)
    }

    /// Transforms a galactic sky position at `distance` parsec to
    /// Galactocentric (x, y, z) in kpc. A missing distance gives a missing
    /// position.
    pub fn apply(
        &self,
        galactic: &GalacticCoordinates,
        distance: Option<f64>,
    ) -> Option<Point3<f64>> {
        distance.map(|distance| {
            let heliocentric =
                galactic.equatorial_direction() * (distance / PARSEC_PER_KILOPARSEC);
            Point3::from(self.rotation * heliocentric + self.offset)
        })
    }

    pub fn apply_equatorial(
        &self,
        equatorial: &EquatorialCoordinates,
        distance: Option<f64>,
    ) -> Option<Point3<f64>> {
        self.apply(&equatorial.to_galactic(), distance)
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
    Z,
}

/// Rotation of the coordinate axes by `angle` degrees about `axis`, i.e. the
/// matrix that expresses a fixed vector in the rotated frame.
fn frame_rotation(axis: Axis, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.to_radians().sin_cos();
    match axis {
        Axis::X => Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c),
        Axis::Y => Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c),
        Axis::Z => Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0),
    }
}

fn unit_vector(longitude: f64, latitude: f64) -> Vector3<f64> {
    let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();
    let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

fn spherical_angles(v: &Vector3<f64>) -> (f64, f64) {
    let longitude = v.y.atan2(v.x).to_degrees();
    let latitude = v.z.atan2(v.x.hypot(v.y)).to_degrees();
    (longitude, latitude)
}
