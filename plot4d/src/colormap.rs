//! Color gradients for mapping values to pixels
use plotters::prelude::{BlackWhite, Bone, ColorMap, Copper, RGBColor, ViridisRGB};

/// A continuous color gradient over `[0, 1]`
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Colormap {
    /// Perceptually uniform purple-to-yellow gradient
    #[default]
    Viridis,
    /// Black through orange to pale copper
    Copper,
    /// Black to white with a blue tint
    Bone,
    /// Black to white
    Gray,
}

impl Colormap {
    /// Looks up a color; `t` is clamped to `[0, 1]`
    pub fn color(&self, t: f64) -> [u8; 3] {
        let RGBColor(r, g, b) = self.rgb(t);
        [r, g, b]
    }

    pub(crate) fn rgb(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = t as f32;
        match self {
            Colormap::Viridis => ViridisRGB.get_color(t),
            Colormap::Copper => Copper.get_color(t),
            Colormap::Bone => Bone.get_color(t),
            Colormap::Gray => BlackWhite.get_color(t),
        }
    }

    /// Returns a color that stands out against every entry of this gradient
    pub(crate) fn highlight(&self) -> RGBColor {
        match self {
            Colormap::Viridis | Colormap::Copper => RGBColor(0xe4, 0x1a, 0x1c),
            Colormap::Bone | Colormap::Gray => RGBColor(0xe6, 0x55, 0x0d),
        }
    }
}
