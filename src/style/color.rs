//! Color model: classify raw color strings and resolve them to paintable colors.
//!
//! Resolution order is fixed: hex (`#RGB` / `#RRGGBB`), then `rgb(r, g, b)`,
//! then the closed set of named colors (case-insensitive). Anything else is
//! kept as [`ColorSpec::Unresolved`] and paints as nothing.

use crossterm::style::Color as TermColor;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`.
    pub fn from_hex(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = digits.chars().filter_map(|c| c.to_digit(16));
                let mut next = || channels.next().map(|d| (d * 17) as u8);
                Some(Self::new(next()?, next()?, next()?))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }

    /// Parse `rgb(r, g, b)` with three decimal components in `0..=255`.
    pub fn from_rgb_function(raw: &str) -> Option<Self> {
        let inner = raw.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut parts = inner.split(',').map(str::trim);
        let mut component = || -> Option<u8> {
            let part = parts.next()?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };
        let rgb = Self::new(component()?, component()?, component()?);
        // exactly three components
        if parts.next().is_some() {
            return None;
        }
        Some(rgb)
    }

    /// Nearest entry of the xterm 256-color palette (cube or gray ramp).
    pub fn to_ansi256(self) -> u8 {
        fn cube_index(v: u8) -> u8 {
            match v {
                0..=47 => 0,
                48..=114 => 1,
                _ => (v - 35) / 40,
            }
        }
        const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

        let (ri, gi, bi) = (cube_index(self.r), cube_index(self.g), cube_index(self.b));
        let cube = Self::new(LEVELS[ri as usize], LEVELS[gi as usize], LEVELS[bi as usize]);

        let avg = (u16::from(self.r) + u16::from(self.g) + u16::from(self.b)) / 3;
        let gray_index = if avg > 238 { 23 } else { avg.saturating_sub(3) / 10 };
        #[allow(clippy::cast_possible_truncation)]
        let gray_level = (8 + gray_index * 10) as u8;
        let gray = Self::new(gray_level, gray_level, gray_level);

        if self.distance(gray) < self.distance(cube) {
            #[allow(clippy::cast_possible_truncation)]
            let idx = 232 + gray_index as u8;
            idx
        } else {
            16 + 36 * ri + 6 * gi + bi
        }
    }

    fn distance(self, other: Self) -> u32 {
        let d = |a: u8, b: u8| {
            let v = i32::from(a) - i32::from(b);
            v.unsigned_abs() * v.unsigned_abs()
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// The closed set of supported color names.
///
/// `gray` and `grey` are the same color (bright black).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NamedColor {
    /// black
    Black,
    /// red
    Red,
    /// green
    Green,
    /// yellow
    Yellow,
    /// blue
    Blue,
    /// magenta
    Magenta,
    /// cyan
    Cyan,
    /// white
    White,
    /// gray / grey
    Gray,
}

impl NamedColor {
    /// Look up a color name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            "gray" | "grey" => Self::Gray,
            _ => return None,
        };
        Some(color)
    }

    /// Standard-palette terminal color.
    pub const fn to_terminal(self) -> TermColor {
        match self {
            Self::Black => TermColor::Black,
            Self::Red => TermColor::DarkRed,
            Self::Green => TermColor::DarkGreen,
            Self::Yellow => TermColor::DarkYellow,
            Self::Blue => TermColor::DarkBlue,
            Self::Magenta => TermColor::DarkMagenta,
            Self::Cyan => TermColor::DarkCyan,
            Self::White => TermColor::Grey,
            Self::Gray => TermColor::DarkGrey,
        }
    }
}

/// A classified color input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ColorSpec {
    /// One of the fixed color names.
    Named(NamedColor),
    /// `#RGB` or `#RRGGBB`, already expanded.
    Hex(Rgb),
    /// `rgb(r, g, b)`.
    Rgb(Rgb),
    /// Matched nothing; painting with it is a no-op.
    Unresolved(String),
}

impl ColorSpec {
    /// Classify a raw color string. Never fails.
    pub fn resolve(raw: &str) -> Self {
        if raw.starts_with('#') {
            if let Some(rgb) = Rgb::from_hex(raw) {
                return Self::Hex(rgb);
            }
        }
        if raw.starts_with("rgb(") {
            if let Some(rgb) = Rgb::from_rgb_function(raw) {
                return Self::Rgb(rgb);
            }
        }
        NamedColor::from_name(raw).map_or_else(|| Self::Unresolved(raw.to_owned()), Self::Named)
    }

    /// Whether this spec resolved to something paintable.
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved(_))
    }

    /// The paintable color, or `None` for unresolved input.
    pub const fn paint(&self) -> Option<Color> {
        match self {
            Self::Named(named) => Some(Color::Named(*named)),
            Self::Hex(rgb) | Self::Rgb(rgb) => Some(Color::Rgb(*rgb)),
            Self::Unresolved(_) => None,
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(raw: &str) -> Self {
        Self::resolve(raw)
    }
}

/// A resolved color that can be stored in a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// Standard palette color.
    Named(NamedColor),
    /// 24-bit color.
    Rgb(Rgb),
}

impl Color {
    /// Convert to a crossterm color for the given output mode.
    pub fn to_terminal(self, mode: ColorMode) -> TermColor {
        match (self, mode) {
            (Self::Named(named), _) => named.to_terminal(),
            (Self::Rgb(Rgb { r, g, b }), ColorMode::TrueColor) => TermColor::Rgb { r, g, b },
            (Self::Rgb(rgb), ColorMode::Ansi256) => TermColor::AnsiValue(rgb.to_ansi256()),
        }
    }
}

/// How 24-bit colors are emitted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    /// `38;2;r;g;b` sequences.
    #[default]
    TrueColor,
    /// Nearest xterm-256 palette entry.
    Ansi256,
}

impl ColorMode {
    /// Pick a mode from the `COLORTERM` environment variable.
    pub fn detect() -> Self {
        Self::from_colorterm(std::env::var("COLORTERM").ok().as_deref())
    }

    /// Pick a mode from a `COLORTERM` value.
    pub fn from_colorterm(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit") => {
                Self::TrueColor
            }
            _ => Self::Ansi256,
        }
    }
}
