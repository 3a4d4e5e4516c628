use std::str::FromStr;

use crate::dom::Document;
use crate::foundation::core::{ElementId, Rect, Viewport};
use crate::foundation::error::ScrollError;

/// How a trigger refers to the element whose box defines its window.
///
/// Selectors are looked up on every resolution, so an element that appears later (or
/// disappears) is picked up on the next geometry refresh.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Anchor {
    /// A concrete element handle.
    Element(ElementId),
    /// First element matching a selector.
    Selector(String),
}

impl Anchor {
    /// Look the anchor up in `doc`.
    pub fn lookup(&self, doc: &dyn Document) -> Option<ElementId> {
        match self {
            Self::Element(el) => doc.layout_rect(*el).map(|_| *el),
            Self::Selector(sel) => doc.query(sel),
        }
    }

    /// Human readable form used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Element(el) => format!("element {}", el.0),
            Self::Selector(sel) => sel.clone(),
        }
    }
}

impl From<&str> for Anchor {
    fn from(value: &str) -> Self {
        Self::Selector(value.to_owned())
    }
}

impl From<ElementId> for Anchor {
    fn from(value: ElementId) -> Self {
        Self::Element(value)
    }
}

/// One side of an edge spec: a fraction of a length plus a pixel offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgePoint {
    /// Fraction of the element (or viewport) height, `0` = top, `1` = bottom.
    pub fraction: f64,
    /// Additional pixels below that point.
    pub pixels: f64,
}

impl EdgePoint {
    const TOP: Self = Self {
        fraction: 0.0,
        pixels: 0.0,
    };
    const BOTTOM: Self = Self {
        fraction: 1.0,
        pixels: 0.0,
    };

    fn at(self, len: f64) -> f64 {
        self.fraction * len + self.pixels
    }
}

impl FromStr for EdgePoint {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ScrollError::validation(format!("invalid edge position '{s}'"));
        let px = |v: &str| v.strip_suffix("px").unwrap_or(v).parse::<f64>();
        let (base, offset) = match s.find("+=").or_else(|| s.find("-=")) {
            Some(i) if i > 0 => {
                let sign = if s[i..].starts_with('-') { -1.0 } else { 1.0 };
                (&s[..i], sign * px(&s[i + 2..]).map_err(|_| bad())?)
            }
            _ => (s, 0.0),
        };
        let (fraction, pixels) = match base {
            "top" => (0.0, 0.0),
            "center" => (0.5, 0.0),
            "bottom" => (1.0, 0.0),
            _ => match base.strip_suffix('%') {
                Some(pct) => (pct.parse::<f64>().map_err(|_| bad())? / 100.0, 0.0),
                None => (0.0, px(base).map_err(|_| bad())?),
            },
        };
        let pixels = pixels + offset;
        if !(fraction.is_finite() && pixels.is_finite()) {
            return Err(bad());
        }
        Ok(Self { fraction, pixels })
    }
}

/// "Element point meets viewport point", e.g. `top 80%`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EdgeSpec {
    /// Point on the anchor element.
    pub element: EdgePoint,
    /// Point on the viewport.
    pub viewport: EdgePoint,
}

impl EdgeSpec {
    /// Default start: the element's top reaches the viewport's bottom.
    pub const TOP_BOTTOM: Self = Self {
        element: EdgePoint::TOP,
        viewport: EdgePoint::BOTTOM,
    };
    /// Default end: the element's bottom reaches the viewport's top.
    pub const BOTTOM_TOP: Self = Self {
        element: EdgePoint::BOTTOM,
        viewport: EdgePoint::TOP,
    };

    /// Absolute scroll offset at which this edge is reached.
    pub fn resolve(self, anchor: Rect, viewport: Viewport) -> f64 {
        anchor.y0 + self.element.at(anchor.height()) - self.viewport.at(viewport.height)
    }
}

impl FromStr for EdgeSpec {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let element = words
            .next()
            .ok_or_else(|| ScrollError::validation("empty edge spec"))?
            .parse()?;
        let viewport = match words.next() {
            Some(w) => w.parse()?,
            None => EdgePoint::TOP,
        };
        if words.next().is_some() {
            return Err(ScrollError::validation(format!(
                "edge spec '{s}' has more than two positions"
            )));
        }
        Ok(Self { element, viewport })
    }
}

fn percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 1e6).round() / 1e6
}

fn point_name(p: EdgePoint) -> String {
    let base = match p.fraction {
        f if f == 0.0 => "top".to_owned(),
        f if f == 0.5 => "center".to_owned(),
        f if f == 1.0 => "bottom".to_owned(),
        f => format!("{}%", percent(f)),
    };
    match p.pixels {
        px if px == 0.0 => base,
        px if p.fraction == 0.0 => format!("{px}px"),
        px if px > 0.0 => format!("{base}+={px}px"),
        px => format!("{base}-={}px", -px),
    }
}

impl std::fmt::Display for EdgeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            point_name(self.element),
            point_name(self.viewport)
        )
    }
}

impl TryFrom<String> for EdgeSpec {
    type Error = ScrollError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EdgeSpec> for String {
    fn from(value: EdgeSpec) -> Self {
        value.to_string()
    }
}

/// End of a trigger window: an absolute edge or a distance past the start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EndSpec {
    /// Resolved like a start edge (optionally against a different element).
    Edge(EdgeSpec),
    /// `+=N%` of the viewport height, `+=N` pixels, or both (`+=N%+=Mpx`) after the
    /// start.
    Relative {
        /// Fraction of the viewport height.
        viewport_fraction: f64,
        /// Additional pixels.
        pixels: f64,
    },
}

impl Default for EndSpec {
    fn default() -> Self {
        Self::Edge(EdgeSpec::BOTTOM_TOP)
    }
}

impl EndSpec {
    /// Absolute scroll offset of the end, given the already resolved start.
    pub fn resolve(self, start: f64, anchor: Rect, viewport: Viewport) -> f64 {
        match self {
            Self::Edge(edge) => edge.resolve(anchor, viewport),
            Self::Relative {
                viewport_fraction,
                pixels,
            } => start + viewport_fraction * viewport.height + pixels,
        }
    }
}

impl FromStr for EndSpec {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rel) = s.trim().strip_prefix("+=") else {
            return Ok(Self::Edge(s.parse()?));
        };
        let p: EdgePoint = rel.trim().parse()?;
        if p.fraction < 0.0 || p.pixels < 0.0 {
            return Err(ScrollError::validation(format!(
                "relative end '{s}' must be non-negative"
            )));
        }
        Ok(Self::Relative {
            viewport_fraction: p.fraction,
            pixels: p.pixels,
        })
    }
}

impl std::fmt::Display for EndSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edge(edge) => edge.fmt(f),
            Self::Relative {
                viewport_fraction,
                pixels,
            } => match (*viewport_fraction, *pixels) {
                (vf, px) if px == 0.0 => write!(f, "+={}%", percent(vf)),
                (vf, px) if vf == 0.0 => write!(f, "+={px}"),
                (vf, px) => write!(f, "+={}%+={px}px", percent(vf)),
            },
        }
    }
}

impl TryFrom<String> for EndSpec {
    type Error = ScrollError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EndSpec> for String {
    fn from(value: EndSpec) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/edge.rs"]
mod tests;
