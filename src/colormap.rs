//! Colormaps
//!
//! Colormaps are referred to by their customary scientific names (`Greys`, `Blues`, `viridis`, ...),
//! a `_r` suffix reverses the color gradient (`Greys_r`).

use plotters::style::RGBColor;
use std::{collections::BTreeMap, fmt, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ColorMapError {
    #[error("{0:?} is not a known colormap, expected one of: {list}", list = Palette::names().join(", "))]
    Unknown(String),
    #[error("the colormap cycle is empty")]
    EmptyCycle,
}
type Result<T> = std::result::Result<T, ColorMapError>;

/// Color gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
pub enum Palette {
    Greys,
    Blues,
    Greens,
    Oranges,
    Purples,
    Reds,
    BuGn,
    BuPu,
    GnBu,
    OrRd,
    PuBu,
    PuBuGn,
    PuRd,
    RdPu,
    YlGn,
    YlGnBu,
    YlOrBr,
    YlOrRd,
    #[strum(serialize = "viridis")]
    Viridis,
    #[strum(serialize = "plasma")]
    Plasma,
    #[strum(serialize = "inferno")]
    Inferno,
    #[strum(serialize = "magma")]
    Magma,
    #[strum(serialize = "cividis")]
    Cividis,
    #[strum(serialize = "turbo")]
    Turbo,
    #[strum(serialize = "cubehelix")]
    Cubehelix,
    #[strum(serialize = "rainbow")]
    Rainbow,
    BrBG,
    PRGn,
    PiYG,
    PuOr,
    RdBu,
    RdGy,
    RdYlBu,
    RdYlGn,
    Spectral,
}
impl Palette {
    /// Names of all the palettes
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|p| p.name()).collect()
    }
    /// Palette name
    pub fn name(&self) -> &'static str {
        (*self).into()
    }
    /// The color gradient
    ///
    /// Sequential and diverging gradients go from light (or the first hue) at 0 to dark at 1
    pub fn gradient(&self) -> colorous::Gradient {
        use Palette::*;
        match self {
            Greys => colorous::GREYS,
            Blues => colorous::BLUES,
            Greens => colorous::GREENS,
            Oranges => colorous::ORANGES,
            Purples => colorous::PURPLES,
            Reds => colorous::REDS,
            BuGn => colorous::BLUE_GREEN,
            BuPu => colorous::BLUE_PURPLE,
            GnBu => colorous::GREEN_BLUE,
            OrRd => colorous::ORANGE_RED,
            PuBu => colorous::PURPLE_BLUE,
            PuBuGn => colorous::PURPLE_BLUE_GREEN,
            PuRd => colorous::PURPLE_RED,
            RdPu => colorous::RED_PURPLE,
            YlGn => colorous::YELLOW_GREEN,
            YlGnBu => colorous::YELLOW_GREEN_BLUE,
            YlOrBr => colorous::YELLOW_ORANGE_BROWN,
            YlOrRd => colorous::YELLOW_ORANGE_RED,
            Viridis => colorous::VIRIDIS,
            Plasma => colorous::PLASMA,
            Inferno => colorous::INFERNO,
            Magma => colorous::MAGMA,
            Cividis => colorous::CIVIDIS,
            Turbo => colorous::TURBO,
            Cubehelix => colorous::CUBEHELIX,
            Rainbow => colorous::RAINBOW,
            BrBG => colorous::BROWN_GREEN,
            PRGn => colorous::PURPLE_GREEN,
            PiYG => colorous::PINK_GREEN,
            PuOr => colorous::PURPLE_ORANGE,
            RdBu => colorous::RED_BLUE,
            RdGy => colorous::RED_GREY,
            RdYlBu => colorous::RED_YELLOW_BLUE,
            RdYlGn => colorous::RED_YELLOW_GREEN,
            Spectral => colorous::SPECTRAL,
        }
    }
}

/// A colormap: a palette, possibly reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    pub palette: Palette,
    pub reversed: bool,
}
impl ColorMap {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            reversed: false,
        }
    }
    /// Reverses the colormap
    pub fn reverse(self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self
        }
    }
    /// Grey scale, black for the lowest counts
    pub fn greys_r() -> Self {
        Self::new(Palette::Greys).reverse()
    }
    /// Returns the color at `t`, `t` is clamped to [0,1]
    pub fn eval(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
        let t = if self.reversed { 1. - t } else { t };
        let (r, g, b) = self.palette.gradient().eval_continuous(t).as_tuple();
        RGBColor(r, g, b)
    }
}
impl Default for ColorMap {
    fn default() -> Self {
        Self::new(Palette::Greys)
    }
}
impl From<Palette> for ColorMap {
    fn from(palette: Palette) -> Self {
        Self::new(palette)
    }
}
impl FromStr for ColorMap {
    type Err = ColorMapError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, reversed) = match s.strip_suffix("_r") {
            Some(name) => (name, true),
            None => (s, false),
        };
        let palette =
            Palette::from_str(name).map_err(|_| ColorMapError::Unknown(s.to_string()))?;
        Ok(Self { palette, reversed })
    }
}
impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.palette.name(),
            if self.reversed { "_r" } else { "" }
        )
    }
}

/// Assigns a colormap to each element
///
/// Elements found in `overrides` get their own colormap, the other elements
/// cycle through `cycle` in order; overridden elements do not consume a slot of the cycle.
pub fn assign_colormaps<'a, I>(
    elements: I,
    cycle: &[ColorMap],
    overrides: &BTreeMap<String, ColorMap>,
) -> Result<BTreeMap<String, ColorMap>>
where
    I: IntoIterator<Item = &'a str>,
{
    if cycle.is_empty() {
        return Err(ColorMapError::EmptyCycle);
    }
    let mut cycle = cycle.iter().cycle();
    let mut assignment = BTreeMap::new();
    for element in elements {
        let cmap = match overrides.get(element) {
            Some(cmap) => *cmap,
            None => *cycle.next().ok_or(ColorMapError::EmptyCycle)?,
        };
        assignment.insert(element.to_string(), cmap);
    }
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp_override() -> BTreeMap<String, ColorMap> {
        BTreeMap::from([("CP".to_string(), ColorMap::greys_r())])
    }

    #[test]
    fn parse_names() {
        assert_eq!("Greys".parse::<ColorMap>().unwrap(), ColorMap::new(Palette::Greys));
        assert_eq!("Greys_r".parse::<ColorMap>().unwrap(), ColorMap::greys_r());
        assert_eq!(
            "viridis".parse::<ColorMap>().unwrap(),
            ColorMap::new(Palette::Viridis)
        );
        assert_eq!(
            "YlOrBr_r".parse::<ColorMap>().unwrap().to_string(),
            "YlOrBr_r"
        );
    }

    #[test]
    fn all_names_parse_back() {
        for name in Palette::names() {
            let cmap: ColorMap = name.parse().unwrap();
            assert_eq!(cmap.to_string(), name);
        }
    }

    #[test]
    fn unknown_name() {
        let err = "Jet".parse::<ColorMap>().unwrap_err();
        assert_eq!(err, ColorMapError::Unknown("Jet".to_string()));
        assert!(err.to_string().contains("Greys"));
    }

    #[test]
    fn greys_extremes() {
        let greys = ColorMap::new(Palette::Greys);
        let RGBColor(low, _, _) = greys.eval(0.);
        let RGBColor(high, _, _) = greys.eval(1.);
        assert!(low > high);
        assert_eq!(greys.reverse().eval(0.), greys.eval(1.));
        assert_eq!(greys.eval(-3.), greys.eval(0.));
        assert_eq!(greys.eval(7.), greys.eval(1.));
    }

    #[test]
    fn cycle_with_reserved_label() {
        let a = ColorMap::new(Palette::Purples);
        let b = ColorMap::new(Palette::Blues);
        let assignment =
            assign_colormaps(["Fe", "Cu", "CP", "Mn"], &[a, b], &cp_override()).unwrap();
        assert_eq!(
            assignment,
            BTreeMap::from([
                ("Fe".to_string(), a),
                ("Cu".to_string(), b),
                ("CP".to_string(), ColorMap::greys_r()),
                ("Mn".to_string(), a),
            ])
        );
    }

    #[test]
    fn single_colormap() {
        let a = ColorMap::new(Palette::Reds);
        let assignment = assign_colormaps(["CP", "Fe", "Ni"], &[a], &cp_override()).unwrap();
        assert_eq!(assignment["Fe"], a);
        assert_eq!(assignment["Ni"], a);
        assert_eq!(assignment["CP"], ColorMap::greys_r());
    }

    #[test]
    fn empty_cycle() {
        assert_eq!(
            assign_colormaps(["Fe"], &[], &BTreeMap::new()),
            Err(ColorMapError::EmptyCycle)
        );
    }
}
