//! Style declarations: translate loosely-typed `property: value` pairs into
//! the closed [`Style`] struct.
//!
//! Unknown properties and unparsable values are dropped here, at translation
//! time, so painting never has to look at strings again.

use log::debug;

use super::border::{BorderStyle, Borders};
use super::color::ColorSpec;
use crate::layout::{Edge, Insets};

/// A length hint for the layout engine.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Dimension {
    /// Sized by content / flex rules.
    #[default]
    Auto,
    /// Fixed number of cells.
    Cells(f32),
    /// Fraction of the parent (0.0-1.0).
    Percent(f32),
}

impl Dimension {
    /// Parse `N`, `Npx`, `N%` or `auto`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        if let Some(percent) = value.strip_suffix('%') {
            return percent.trim().parse::<f32>().ok().map(|p| Self::Percent(p / 100.0));
        }
        parse_cells(value).map(Self::Cells)
    }
}

/// Main axis of a flex container.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FlexDirection {
    /// Left to right.
    Row,
    /// Top to bottom.
    #[default]
    Column,
    /// Right to left.
    RowReverse,
    /// Bottom to top.
    ColumnReverse,
}

/// Line wrapping of a flex container.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FlexWrap {
    /// Single line.
    #[default]
    NoWrap,
    /// Wrap onto new lines.
    Wrap,
    /// Wrap onto new lines in reverse order.
    WrapReverse,
}

/// Main-axis distribution (`justify-content`) and cross-axis line
/// distribution (`align-content`).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Justify {
    /// Pack at the start.
    #[default]
    FlexStart,
    /// Pack at the end.
    FlexEnd,
    /// Pack in the middle.
    Center,
    /// Stretch lines (align-content only).
    Stretch,
    /// Even gaps, none at the ends.
    SpaceBetween,
    /// Even gaps, half-size at the ends.
    SpaceAround,
    /// Even gaps everywhere.
    SpaceEvenly,
}

/// Cross-axis alignment of items (`align-items`).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AlignItems {
    /// Fill the cross axis.
    #[default]
    Stretch,
    /// Align at the start.
    FlexStart,
    /// Align at the end.
    FlexEnd,
    /// Align in the middle.
    Center,
    /// Align baselines.
    Baseline,
}

/// Positioning scheme.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Position {
    /// In normal flow, offset by insets.
    #[default]
    Relative,
    /// Out of flow, placed by insets.
    Absolute,
}

/// Layout hints consumed by the layout engine.
#[derive(Clone, PartialEq, Debug)]
pub struct FlexStyle {
    /// `display: none` removes the node from layout.
    pub hidden: bool,
    /// Content-box width.
    pub width: Dimension,
    /// Content-box height.
    pub height: Dimension,
    /// Margin extents in cells.
    pub margin: Insets<f32>,
    /// Padding extents in cells.
    pub padding: Insets<f32>,
    /// Positioning scheme.
    pub position: Position,
    /// `top`/`right`/`bottom`/`left` offsets.
    pub inset: Insets<Option<f32>>,
    /// Main axis.
    pub direction: FlexDirection,
    /// Line wrapping.
    pub wrap: FlexWrap,
    /// `justify-content`.
    pub justify_content: Justify,
    /// `align-items`.
    pub align_items: AlignItems,
    /// `align-content`.
    pub align_content: Justify,
    /// `flex-grow`.
    pub grow: f32,
    /// `flex-shrink`.
    pub shrink: f32,
    /// `flex-basis`.
    pub basis: Dimension,
    /// Gap between rows.
    pub row_gap: f32,
    /// Gap between columns.
    pub column_gap: f32,
}

impl Default for FlexStyle {
    fn default() -> Self {
        Self {
            hidden: false,
            width: Dimension::Auto,
            height: Dimension::Auto,
            margin: Insets::default(),
            padding: Insets::default(),
            position: Position::Relative,
            inset: Insets::default(),
            direction: FlexDirection::Column,
            wrap: FlexWrap::NoWrap,
            justify_content: Justify::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: Justify::FlexStart,
            grow: 0.0,
            shrink: 1.0,
            basis: Dimension::Auto,
            row_gap: 0.0,
            column_gap: 0.0,
        }
    }
}

/// The closed style of a node.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Style {
    /// Interior fill color.
    pub background: Option<ColorSpec>,
    /// Text color, inherited by descendants that do not set one.
    pub color: Option<ColorSpec>,
    /// Per-edge borders.
    pub borders: Borders,
    /// Layout hints.
    pub flex: FlexStyle,
}

/// An ordered list of `property: value` declarations.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StylePatch {
    declarations: Vec<(String, String)>,
}

impl StylePatch {
    /// An empty patch.
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Parse an inline `"key: value; key: value"` string.
    pub fn parse(inline: &str) -> Self {
        let declarations = inline
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { declarations }
    }

    /// Builder: append a declaration.
    #[must_use]
    pub fn set(mut self, property: impl Into<String>, value: impl ToString) -> Self {
        self.declarations.push((property.into(), value.to_string()));
        self
    }

    /// Declarations in application order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the patch has no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for StylePatch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |patch, (k, v)| patch.set(k, v))
    }
}

impl Style {
    /// Apply every declaration of `patch` in order.
    pub fn apply(&mut self, patch: &StylePatch) {
        for (property, value) in patch.declarations() {
            if !self.apply_declaration(property, value) {
                debug!("ignoring style declaration {property}: {value}");
            }
        }
    }

    /// Apply one declaration. Returns `false` if it was not recognized.
    pub fn apply_declaration(&mut self, property: &str, value: &str) -> bool {
        let key = to_camel_case(property.trim());
        let value = value.trim();

        if let Some(rest) = key.strip_prefix("border") {
            return self.apply_border(rest, value);
        }

        let flex = &mut self.flex;
        match key.as_str() {
            "color" => self.color = parse_color(value),
            "backgroundColor" | "background" => self.background = parse_color(value),
            "width" => return set_some(&mut flex.width, Dimension::parse(value)),
            "height" => return set_some(&mut flex.height, Dimension::parse(value)),
            "margin" => return set_some(&mut flex.margin, parse_box_shorthand(value, parse_cells)),
            "padding" => {
                return set_some(&mut flex.padding, parse_box_shorthand(value, parse_cells))
            }
            "display" => match value {
                "none" => flex.hidden = true,
                "flex" => flex.hidden = false,
                _ => return false,
            },
            "position" => match value {
                "absolute" => flex.position = Position::Absolute,
                "relative" | "static" => flex.position = Position::Relative,
                _ => return false,
            },
            "flexDirection" => {
                let direction = match value {
                    "row" => FlexDirection::Row,
                    "column" => FlexDirection::Column,
                    "row-reverse" => FlexDirection::RowReverse,
                    "column-reverse" => FlexDirection::ColumnReverse,
                    _ => return false,
                };
                flex.direction = direction;
            }
            "flexWrap" => {
                let wrap = match value {
                    "nowrap" => FlexWrap::NoWrap,
                    "wrap" => FlexWrap::Wrap,
                    "wrap-reverse" => FlexWrap::WrapReverse,
                    _ => return false,
                };
                flex.wrap = wrap;
            }
            "justifyContent" => return set_some(&mut flex.justify_content, parse_justify(value)),
            "alignContent" => return set_some(&mut flex.align_content, parse_justify(value)),
            "alignItems" => {
                let align = match value {
                    "stretch" => AlignItems::Stretch,
                    "flex-start" | "start" => AlignItems::FlexStart,
                    "flex-end" | "end" => AlignItems::FlexEnd,
                    "center" => AlignItems::Center,
                    "baseline" => AlignItems::Baseline,
                    _ => return false,
                };
                flex.align_items = align;
            }
            "flexGrow" => return set_some(&mut flex.grow, parse_number(value)),
            "flexShrink" => return set_some(&mut flex.shrink, parse_number(value)),
            "flexBasis" => return set_some(&mut flex.basis, Dimension::parse(value)),
            "gap" => {
                let Some(gap) = parse_cells(value) else {
                    return false;
                };
                flex.row_gap = gap;
                flex.column_gap = gap;
            }
            "rowGap" => return set_some(&mut flex.row_gap, parse_cells(value)),
            "columnGap" => return set_some(&mut flex.column_gap, parse_cells(value)),
            other => {
                if let Some((target, edge)) = split_edge_suffix(other) {
                    return self.apply_edge_property(target, edge, value);
                }
                if let Some(edge) = edge_from_name(other) {
                    let inset = if value == "auto" { Some(None) } else { parse_cells(value).map(Some) };
                    return set_some_edge(&mut self.flex.inset, edge, inset);
                }
                return false;
            }
        }
        true
    }

    fn apply_edge_property(&mut self, target: &str, edge: Edge, value: &str) -> bool {
        let Some(cells) = parse_cells(value) else {
            return false;
        };
        match target {
            "margin" => self.flex.margin.set(edge, cells),
            "padding" => self.flex.padding.set(edge, cells),
            _ => return false,
        }
        true
    }

    /// `rest` is the key with the leading `border` removed.
    fn apply_border(&mut self, rest: &str, value: &str) -> bool {
        match rest {
            "" => {
                let Some(spec) = parse_border_shorthand(value) else {
                    return false;
                };
                for edge in Edge::ALL {
                    spec.apply_to(&mut self.borders, edge);
                }
                true
            }
            "Width" => self.apply_border_boxed(value, |borders, edge, token| {
                let enabled = parse_border_width(token)?;
                borders.edge_mut(edge).set_width(u32::from(enabled));
                Some(())
            }),
            "Style" => self.apply_border_boxed(value, |borders, edge, token| {
                borders.edge_mut(edge).style = BorderStyle::from_keyword(token)?;
                Some(())
            }),
            "Color" => self.apply_border_boxed(value, |borders, edge, token| {
                borders.edge_mut(edge).color = parse_color(token);
                Some(())
            }),
            _ => {
                let (edge_name, longhand) = split_border_longhand(rest);
                let Some(edge) = edge_from_name(&to_lower_first(edge_name)) else {
                    return false;
                };
                let spec = self.borders.edge_mut(edge);
                match longhand {
                    "" => {
                        let Some(parsed) = parse_border_shorthand(value) else {
                            return false;
                        };
                        parsed.apply_to(&mut self.borders, edge);
                    }
                    "Width" => {
                        let Some(enabled) = parse_border_width(value) else {
                            return false;
                        };
                        spec.set_width(u32::from(enabled));
                    }
                    "Style" => {
                        let Some(style) = BorderStyle::from_keyword(value) else {
                            return false;
                        };
                        spec.style = style;
                    }
                    "Color" => spec.color = parse_color(value),
                    _ => return false,
                }
                true
            }
        }
    }

    /// Apply a 1-4 value border longhand (`borderWidth`, `borderStyle`, `borderColor`).
    fn apply_border_boxed(
        &mut self,
        value: &str,
        mut apply: impl FnMut(&mut Borders, Edge, &str) -> Option<()>,
    ) -> bool {
        let Some(tokens) = parse_box_shorthand(value, |token| Some(token.to_owned())) else {
            return false;
        };
        let mut applied = false;
        for edge in Edge::ALL {
            applied |= apply(&mut self.borders, edge, tokens.edge_ref(edge).as_str()).is_some();
        }
        applied
    }
}

/// Result of parsing a `border` shorthand value.
#[derive(Debug, Default)]
struct BorderShorthand {
    enabled: bool,
    style: BorderStyle,
    color: Option<ColorSpec>,
}

impl BorderShorthand {
    fn apply_to(&self, borders: &mut Borders, edge: Edge) {
        let spec = borders.edge_mut(edge);
        spec.set_width(u32::from(self.enabled));
        spec.style = self.style;
        spec.color.clone_from(&self.color);
    }
}

/// Tokens may come in any order: a style keyword, a width and a color.
/// A shorthand without a width token still enables the edge.
fn parse_border_shorthand(value: &str) -> Option<BorderShorthand> {
    if value.is_empty() {
        return None;
    }
    let mut shorthand = BorderShorthand {
        enabled: true,
        ..BorderShorthand::default()
    };
    for token in value.split_whitespace() {
        if let Some(style) = BorderStyle::from_keyword(token) {
            shorthand.style = style;
        } else if let Some(enabled) = parse_border_width(token) {
            shorthand.enabled = enabled;
        } else {
            let color = ColorSpec::resolve(token);
            if color.is_resolved() {
                shorthand.color = Some(color);
            } else {
                debug!("ignoring border token {token:?}");
            }
        }
    }
    Some(shorthand)
}

/// `Some(true)` for a non-zero width, `Some(false)` for `0`/`none`.
fn parse_border_width(token: &str) -> Option<bool> {
    match token {
        "none" | "hidden" => Some(false),
        "thin" | "medium" | "thick" => Some(true),
        _ => parse_cells(token).map(|w| w > 0.0),
    }
}

fn parse_color(value: &str) -> Option<ColorSpec> {
    if value.is_empty() || value == "none" || value == "transparent" {
        None
    } else {
        Some(ColorSpec::resolve(value))
    }
}

fn parse_justify(value: &str) -> Option<Justify> {
    let justify = match value {
        "flex-start" | "start" => Justify::FlexStart,
        "flex-end" | "end" => Justify::FlexEnd,
        "center" => Justify::Center,
        "stretch" => Justify::Stretch,
        "space-between" => Justify::SpaceBetween,
        "space-around" => Justify::SpaceAround,
        "space-evenly" => Justify::SpaceEvenly,
        _ => return None,
    };
    Some(justify)
}

fn parse_number(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parse `N` or `Npx` as a cell count.
fn parse_cells(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    parse_number(number.trim())
}

/// Expand a 1-4 value box shorthand (`top right bottom left` order).
fn parse_box_shorthand<T: Clone>(
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<Insets<T>> {
    let parts = value
        .split_whitespace()
        .map(parse)
        .collect::<Option<Vec<T>>>()?;
    let (top, right, bottom, left) = match parts.as_slice() {
        [all] => (all, all, all, all),
        [vertical, horizontal] => (vertical, horizontal, vertical, horizontal),
        [top, horizontal, bottom] => (top, horizontal, bottom, horizontal),
        [top, right, bottom, left] => (top, right, bottom, left),
        _ => return None,
    };
    Some(Insets {
        left: left.clone(),
        top: top.clone(),
        right: right.clone(),
        bottom: bottom.clone(),
    })
}

fn set_some<T>(slot: &mut T, value: Option<T>) -> bool {
    value.map(|v| *slot = v).is_some()
}

fn set_some_edge<T: Copy>(insets: &mut Insets<T>, edge: Edge, value: Option<T>) -> bool {
    value.map(|v| insets.set(edge, v)).is_some()
}

fn edge_from_name(name: &str) -> Option<Edge> {
    match name {
        "left" => Some(Edge::Left),
        "top" => Some(Edge::Top),
        "right" => Some(Edge::Right),
        "bottom" => Some(Edge::Bottom),
        _ => None,
    }
}

/// `marginLeft` -> (`margin`, Left).
fn split_edge_suffix(key: &str) -> Option<(&str, Edge)> {
    ["Left", "Top", "Right", "Bottom"]
        .into_iter()
        .zip(Edge::ALL)
        .find_map(|(suffix, edge)| key.strip_suffix(suffix).map(|target| (target, edge)))
}

/// `LeftWidth` -> (`Left`, `Width`).
fn split_border_longhand(rest: &str) -> (&str, &str) {
    ["Width", "Style", "Color"]
        .into_iter()
        .find_map(|suffix| rest.strip_suffix(suffix).map(|edge| (edge, suffix)))
        .unwrap_or((rest, ""))
}

fn to_lower_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_lowercase().to_string() + chars.as_str()
    })
}

/// `border-left-color` -> `borderLeftColor`; camelCase input is unchanged.
fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
