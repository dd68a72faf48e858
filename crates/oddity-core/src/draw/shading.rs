//! Shading of shapes and partition sections.
//!
//! A [`Shading`] is what a diagram description asks for ("grey",
//! "diagonal_slash", ...). A [`Palette`] resolves it into a [`FillPaint`]
//! the renderer can emit: a concrete color, a hatch pattern, or nothing.

use std::str::FromStr;

use crate::color::Color;

/// Direction of hatch lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatchDirection {
    /// Lines parallel to `y = x`
    Slash,
    /// Lines parallel to `x + y = 100`
    Backslash,
    Horizontal,
    Vertical,
}

impl HatchDirection {
    /// Distance between adjacent hatch lines in canvas units
    pub fn spacing(self) -> f64 {
        match self {
            Self::Slash | Self::Backslash => 3.0,
            Self::Horizontal | Self::Vertical => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Slash => "diagonal_slash",
            Self::Backslash => "diagonal_backslash",
            Self::Horizontal => "horizontal_lines",
            Self::Vertical => "vertical_lines",
        }
    }
}

/// Named fill tones with palette-controlled colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Black,
    Grey,
    LightGrey,
    /// White that is only painted when the shape is opaque
    White,
    /// White that is always painted
    WhiteFill,
}

/// Requested shading of a shape or section.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    #[default]
    None,
    Tone(Tone),
    Custom(Color),
    Hatch(HatchDirection),
}

impl Shading {
    pub fn is_hatch(self) -> bool {
        matches!(self, Self::Hatch(_))
    }
}

impl FromStr for Shading {
    type Err = String;

    /// Parses a named shading, falling back to any CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::draw::{HatchDirection, Shading, Tone};
    /// assert_eq!("grey".parse::<Shading>(), Ok(Shading::Tone(Tone::Grey)));
    /// assert_eq!(
    ///     "diagonal_slash".parse::<Shading>(),
    ///     Ok(Shading::Hatch(HatchDirection::Slash))
    /// );
    /// assert!("#123456".parse::<Shading>().is_ok());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "solid_black" | "black" => Ok(Self::Tone(Tone::Black)),
            "grey" | "gray" => Ok(Self::Tone(Tone::Grey)),
            "grey_light" | "light_grey" | "gray_light" => Ok(Self::Tone(Tone::LightGrey)),
            "white" => Ok(Self::Tone(Tone::White)),
            "white_fill" => Ok(Self::Tone(Tone::WhiteFill)),
            "diagonal_slash" => Ok(Self::Hatch(HatchDirection::Slash)),
            "diagonal_backslash" => Ok(Self::Hatch(HatchDirection::Backslash)),
            "horizontal_lines" => Ok(Self::Hatch(HatchDirection::Horizontal)),
            "vertical_lines" => Ok(Self::Hatch(HatchDirection::Vertical)),
            other => Color::new(other)
                .map(Self::Custom)
                .map_err(|_| format!("unknown shading `{other}`")),
        }
    }
}

/// What the renderer actually paints for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPaint {
    None,
    Color(Color),
    Hatch(HatchDirection),
}

/// Colors for the named tones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    black: Color,
    grey: Color,
    light_grey: Color,
    white: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            black: Color::default(),
            grey: Color::new("#808080").expect("valid hex color"),
            light_grey: Color::new("#d0d0d0").expect("valid hex color"),
            white: Color::new("#ffffff").expect("valid hex color"),
        }
    }
}

impl Palette {
    pub fn new(black: Color, grey: Color, light_grey: Color, white: Color) -> Self {
        Self {
            black,
            grey,
            light_grey,
            white,
        }
    }

    pub fn black(&self) -> Color {
        self.black
    }

    pub fn grey(&self) -> Color {
        self.grey
    }

    pub fn light_grey(&self) -> Color {
        self.light_grey
    }

    pub fn white(&self) -> Color {
        self.white
    }

    /// Resolves a shading for a region of a shape that is (or is not) opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::draw::{FillPaint, Palette, Shading, Tone};
    /// let palette = Palette::default();
    /// assert_eq!(palette.resolve(Shading::Tone(Tone::White), false), FillPaint::None);
    /// assert!(matches!(palette.resolve(Shading::Tone(Tone::White), true), FillPaint::Color(_)));
    /// ```
    pub fn resolve(&self, shading: Shading, opaque: bool) -> FillPaint {
        match shading {
            Shading::None => FillPaint::None,
            Shading::Tone(Tone::Black) => FillPaint::Color(self.black),
            Shading::Tone(Tone::Grey) => FillPaint::Color(self.grey),
            Shading::Tone(Tone::LightGrey) => FillPaint::Color(self.light_grey),
            Shading::Tone(Tone::White) if opaque => FillPaint::Color(self.white),
            Shading::Tone(Tone::White) => FillPaint::None,
            Shading::Tone(Tone::WhiteFill) => FillPaint::Color(self.white),
            Shading::Custom(color) => FillPaint::Color(color),
            Shading::Hatch(direction) => FillPaint::Hatch(direction),
        }
    }
}
