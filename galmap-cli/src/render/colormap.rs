use lazy_static::lazy_static;
use palette::Srgb;
use plotters::style::RGBColor;

lazy_static! {
    /// ColorBrewer "Spectral", evenly spaced anchors from 0 to 1.
    static ref SPECTRAL: Vec<Srgb> = [
        0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4,
        0x66c2a5, 0x3288bd, 0x5e4fa2,
    ]
    .into_iter()
    .map(|hex: u32| Srgb::<u8>::from(hex).into_format())
    .collect();
}

/// Samples the Spectral colormap at `t` in `[0, 1]`, interpolating linearly
/// between anchors in sRGB.
pub fn spectral(t: f32) -> Srgb {
    let t = t.clamp(0.0, 1.0);
    let segments = (SPECTRAL.len() - 1) as f32;
    let position = t * segments;
    let lower = (position.floor() as usize).min(SPECTRAL.len() - 2);
    let k = position - lower as f32;

    let a = SPECTRAL[lower];
    let b = SPECTRAL[lower + 1];
    Srgb::new(
        (1.0 - k) * a.red + k * b.red,
        (1.0 - k) * a.green + k * b.green,
        (1.0 - k) * a.blue + k * b.blue,
    )
}

/// `n` colors from the interior of the colormap, leaving out both ends.
pub fn palette(n: usize) -> Vec<Srgb> {
    (1..=n)
        .map(|i| spectral(i as f32 / (n + 1) as f32))
        .collect()
}

pub fn to_rgb(color: Srgb) -> RGBColor {
    let color: Srgb<u8> = color.into_format();
    RGBColor(color.red, color.green, color.blue)
}
