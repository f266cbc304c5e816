//! L-systems: rewrite an axiom with per-symbol rules, then walk the result with a turtle
//! to get line segments.
//!
//! Turtle alphabet: `F` draw forward, `G` move without drawing, `+`/`-` turn by the
//! angle, `[`/`]` save/restore position and heading, `O` mark a dot. Other symbols
//! (such as `X`) only take part in rewriting.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on an expanded string; each iteration can multiply the length.
pub const MAX_SYMBOLS: usize = 4_000_000;

/// Step length bounds for the viewer's grow/shrink keys.
pub const MIN_STEP: f64 = 1e-3;
pub const MAX_STEP: f64 = 1e6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LSystemError {
    #[error("malformed rule {0:?}: expected SYMBOL=REPLACEMENT")]
    MalformedRule(String),
    #[error("expansion exceeds {limit} symbols after {iteration} iterations", limit = MAX_SYMBOLS)]
    TooLong { iteration: u32 },
    #[error("unbalanced ']' at symbol {0}")]
    UnbalancedBracket(usize),
    #[error("unknown preset {0:?} (expected bush or weed)")]
    UnknownPreset(String),
}

/// Built-in plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Bush,
    Weed,
}

impl FromStr for Preset {
    type Err = LSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bush" => Ok(Self::Bush),
            "weed" => Ok(Self::Weed),
            _ => Err(LSystemError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bush => f.write_str("bush"),
            Self::Weed => f.write_str("weed"),
        }
    }
}

/// Parse `X=F+[X]` into ('X', "F+[X]").
pub fn parse_rule(s: &str) -> Result<(char, String), LSystemError> {
    let (lhs, rhs) = s
        .split_once('=')
        .ok_or_else(|| LSystemError::MalformedRule(s.to_string()))?;
    let mut chars = lhs.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok((symbol, rhs.trim().to_string())),
        _ => Err(LSystemError::MalformedRule(s.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LSystem {
    pub axiom: String,
    pub rules: HashMap<char, String>,
    /// Length of one `F` or `G` step.
    pub step: f64,
    /// Turn per `+`/`-`, in degrees.
    pub angle_deg: f64,
    pub iterations: u32,
}

impl LSystem {
    pub fn new(
        axiom: &str,
        rules: &[(char, &str)],
        step: f64,
        angle_deg: f64,
        iterations: u32,
    ) -> Self {
        Self {
            axiom: axiom.to_string(),
            rules: rules.iter().map(|&(c, r)| (c, r.to_string())).collect(),
            step,
            angle_deg,
            iterations,
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Bush => Self::new(
                "-X",
                &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
                3.0,
                25.0,
                6,
            ),
            Preset::Weed => Self::new("F", &[('F', "F[+F-F+FO]F[-F+F-FO]")], 2.0, 22.0, 6),
        }
    }

    /// Apply the rules `iterations` times. Symbols without a rule are kept.
    pub fn expand(&self) -> Result<String, LSystemError> {
        let mut current = self.axiom.clone();
        for iteration in 1..=self.iterations {
            let mut next = String::with_capacity(current.len() * 2);
            for symbol in current.chars() {
                match self.rules.get(&symbol) {
                    Some(replacement) => next.push_str(replacement),
                    None => next.push(symbol),
                }
                if next.len() > MAX_SYMBOLS {
                    return Err(LSystemError::TooLong { iteration });
                }
            }
            current = next;
        }
        Ok(current)
    }

    /// Expand and walk the result.
    pub fn render(&self) -> Result<Drawing, LSystemError> {
        interpret(&self.expand()?, self.step, self.angle_deg)
    }

    pub fn double_step(&mut self) {
        self.step = (self.step * 2.0).clamp(MIN_STEP, MAX_STEP);
    }

    pub fn halve_step(&mut self) {
        self.step = (self.step / 2.0).clamp(MIN_STEP, MAX_STEP);
    }

    pub fn turn_angle(&mut self, delta_deg: f64) {
        self.angle_deg += delta_deg;
    }

    pub fn more_iterations(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    pub fn fewer_iterations(&mut self) {
        self.iterations = self.iterations.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Turtle output in y-up coordinates, starting at the origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub segments: Vec<Segment>,
    pub dots: Vec<(f64, f64)>,
}

impl Drawing {
    /// (min_x, max_x, min_y, max_y), always including the origin.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let points = self
            .segments
            .iter()
            .flat_map(|s| [s.from, s.to])
            .chain(self.dots.iter().copied());
        points.fold((0.0, 0.0, 0.0, 0.0), |(x0, x1, y0, y1), (x, y)| {
            (f64::min(x0, x), f64::max(x1, x), f64::min(y0, y), f64::max(y1, y))
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Turtle {
    x: f64,
    y: f64,
    heading_deg: f64,
}

impl Turtle {
    fn ahead(&self, step: f64) -> (f64, f64) {
        let (sin, cos) = self.heading_deg.to_radians().sin_cos();
        (self.x + step * cos, self.y + step * sin)
    }
}

/// Walk `symbols` with a turtle that starts at the origin facing up.
pub fn interpret(symbols: &str, step: f64, angle_deg: f64) -> Result<Drawing, LSystemError> {
    let mut drawing = Drawing::default();
    let mut turtle = Turtle {
        x: 0.0,
        y: 0.0,
        heading_deg: 90.0,
    };
    let mut stack = Vec::new();
    for (i, symbol) in symbols.chars().enumerate() {
        match symbol {
            'F' => {
                let to = turtle.ahead(step);
                drawing.segments.push(Segment {
                    from: (turtle.x, turtle.y),
                    to,
                });
                (turtle.x, turtle.y) = to;
            }
            'G' => (turtle.x, turtle.y) = turtle.ahead(step),
            '+' => turtle.heading_deg += angle_deg,
            '-' => turtle.heading_deg -= angle_deg,
            '[' => stack.push(turtle),
            ']' => turtle = stack.pop().ok_or(LSystemError::UnbalancedBracket(i))?,
            'O' => drawing.dots.push((turtle.x, turtle.y)),
            _ => {}
        }
    }
    Ok(drawing)
}
