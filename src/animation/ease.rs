use std::str::FromStr;

use crate::foundation::error::ScrollError;

/// Easing functions used to map normalized animation progress.
///
/// Names follow the `powerN.in|out|inOut` convention used in page scripts: `power1` is
/// quadratic, `power2` cubic, `power3` quartic and `power4` quintic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation (`none`).
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
}

#[derive(Clone, Copy)]
enum Shape {
    In,
    Out,
    InOut,
}

fn power(t: f64, n: i32, shape: Shape) -> f64 {
    match shape {
        Shape::In => t.powi(n),
        Shape::Out => 1.0 - (1.0 - t).powi(n),
        Shape::InOut => {
            if t < 0.5 {
                2f64.powi(n - 1) * t.powi(n)
            } else {
                1.0 - ((-2.0 * t + 2.0).powi(n) / 2.0)
            }
        }
    }
}

impl Ease {
    fn parts(self) -> Option<(i32, Shape)> {
        let parts = match self {
            Self::Linear => return None,
            Self::InQuad => (2, Shape::In),
            Self::OutQuad => (2, Shape::Out),
            Self::InOutQuad => (2, Shape::InOut),
            Self::InCubic => (3, Shape::In),
            Self::OutCubic => (3, Shape::Out),
            Self::InOutCubic => (3, Shape::InOut),
            Self::InQuart => (4, Shape::In),
            Self::OutQuart => (4, Shape::Out),
            Self::InOutQuart => (4, Shape::InOut),
            Self::InQuint => (5, Shape::In),
            Self::OutQuint => (5, Shape::Out),
            Self::InOutQuint => (5, Shape::InOut),
        };
        Some(parts)
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.parts() {
            None => t,
            Some((n, shape)) => power(t, n, shape),
        }
    }

    /// Canonical `powerN.*` name of this ease.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::InQuad => "power1.in",
            Self::OutQuad => "power1.out",
            Self::InOutQuad => "power1.inOut",
            Self::InCubic => "power2.in",
            Self::OutCubic => "power2.out",
            Self::InOutCubic => "power2.inOut",
            Self::InQuart => "power3.in",
            Self::OutQuart => "power3.out",
            Self::InOutQuart => "power3.inOut",
            Self::InQuint => "power4.in",
            Self::OutQuint => "power4.out",
            Self::InOutQuint => "power4.inOut",
        }
    }
}

impl FromStr for Ease {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "none" || s == "linear" {
            return Ok(Self::Linear);
        }
        let (family, shape) = s.split_once('.').unwrap_or((s, "out"));
        let degree = family
            .strip_prefix("power")
            .and_then(|d| d.parse::<u8>().ok())
            .ok_or_else(|| ScrollError::validation(format!("unknown ease '{s}'")))?;
        let ease = match (degree, shape) {
            (1, "in") => Self::InQuad,
            (1, "out") => Self::OutQuad,
            (1, "inOut") => Self::InOutQuad,
            (2, "in") => Self::InCubic,
            (2, "out") => Self::OutCubic,
            (2, "inOut") => Self::InOutCubic,
            (3, "in") => Self::InQuart,
            (3, "out") => Self::OutQuart,
            (3, "inOut") => Self::InOutQuart,
            (4, "in") => Self::InQuint,
            (4, "out") => Self::OutQuint,
            (4, "inOut") => Self::InOutQuint,
            _ => return Err(ScrollError::validation(format!("unknown ease '{s}'"))),
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrollError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
