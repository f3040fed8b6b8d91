use super::color::Color;
use fnv::FnvHashMap;
use rand::Rng;
use serde_json::Value;

/// Anything that can answer "what string is declared under this key".
///
/// In the browser this is the host element's attribute map; tests use plain
/// key/value slices.
pub trait AttributeSource {
    fn attribute(&self, key: &str) -> Option<String>;
}

impl<'a> AttributeSource for [(&'a str, &'a str)] {
    fn attribute(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

impl<'a, const N: usize> AttributeSource for [(&'a str, &'a str); N] {
    fn attribute(&self, key: &str) -> Option<String> {
        self.as_slice().attribute(key)
    }
}

impl AttributeSource for FnvHashMap<String, String> {
    fn attribute(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttrError {
    #[error("`{0}` is not a finite number")]
    NotANumber(String),
    #[error("`{0}` is not a boolean")]
    NotABool(String),
    #[error("`{0}` is not a color")]
    NotAColor(String),
    #[error("`{0}` is not a [min, max] range")]
    NotARange(String),
    #[error("`{0}` is not a color list")]
    NotAPalette(String),
    #[error("`{0}` is not a JSON object")]
    NotAMap(String),
    #[error("{value} is outside {expected}")]
    OutOfBounds { value: f32, expected: &'static str },
}

impl AttrError {
    /// A number that parsed but was rejected by its bounds is an override the
    /// page author will want to see.
    pub fn log_level(&self) -> log::Level {
        match self {
            Self::OutOfBounds { .. } => log::Level::Warn,
            _ => log::Level::Debug,
        }
    }
}

/// Inclusive sampling interval; `min` may exceed `max` (e.g. negative speeds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + (self.max - self.min) * rng.gen::<f32>()
    }

    pub fn low(&self) -> f32 {
        self.min.min(self.max)
    }

    pub fn high(&self) -> f32 {
        self.min.max(self.max)
    }
}

pub fn parse_number(raw: &str) -> Result<f32, AttrError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AttrError::NotANumber(raw.to_string()))
}

pub fn parse_bool(raw: &str) -> Result<bool, AttrError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        // a bare attribute (`<div data-mouse-react>`) reads as present
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AttrError::NotABool(raw.to_string())),
    }
}

pub fn parse_range(raw: &str) -> Result<Range, AttrError> {
    if let Ok(v) = parse_number(raw) {
        return Ok(Range::fixed(v));
    }
    let err = || AttrError::NotARange(raw.to_string());
    let value: Value = serde_json::from_str(raw.trim()).map_err(|_| err())?;
    match value.as_array().map(Vec::as_slice) {
        Some([a, b]) => {
            let min = a.as_f64().ok_or_else(err)? as f32;
            let max = b.as_f64().ok_or_else(err)? as f32;
            if min.is_finite() && max.is_finite() {
                Ok(Range::new(min, max))
            } else {
                Err(err())
            }
        }
        _ => Err(err()),
    }
}

/// A JSON array of colors, or one color standing for a single-entry palette.
pub fn parse_palette(raw: &str) -> Result<Vec<Color>, AttrError> {
    if let Ok(single) = Color::parse(raw) {
        return Ok(vec![single]);
    }
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|_| AttrError::NotAPalette(raw.to_string()))?;
    palette_from_json(&value).map_err(|_| AttrError::NotAPalette(raw.to_string()))
}

pub(crate) fn palette_from_json(value: &Value) -> Result<Vec<Color>, AttrError> {
    match value {
        Value::Array(items) if !items.is_empty() => {
            // a bare triplet is one color, not three
            if let Ok(single) = Color::from_json(value) {
                return Ok(vec![single]);
            }
            items.iter().map(Color::from_json).collect()
        }
        Value::Array(_) => Err(AttrError::NotAPalette(value.to_string())),
        other => Color::from_json(other).map(|c| vec![c]),
    }
}

pub fn parse_map(raw: &str) -> Result<serde_json::Map<String, Value>, AttrError> {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AttrError::NotAMap(raw.to_string())),
    }
}

/// Typed, never-failing reads over an [`AttributeSource`].
///
/// Every reader takes the layered default and returns it whenever the
/// declared value is missing, malformed or fails validation.
pub(crate) struct Reader<'s, S: AttributeSource + ?Sized> {
    src: &'s S,
}

impl<'s, S: AttributeSource + ?Sized> Reader<'s, S> {
    pub(crate) fn new(src: &'s S) -> Self {
        Self { src }
    }

    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        self.src.attribute(key)
    }

    fn parsed<T>(
        &self,
        key: &str,
        default: T,
        parse: impl FnOnce(&str) -> Result<T, AttrError>,
    ) -> T {
        match self.src.attribute(key) {
            None => default,
            Some(raw) => match parse(&raw) {
                Ok(v) => v,
                Err(e) => {
                    log::log!(e.log_level(), "[config] {key}: {e}; keeping default");
                    default
                }
            },
        }
    }

    pub(crate) fn number(&self, key: &str, default: f32) -> f32 {
        self.parsed(key, default, parse_number)
    }

    pub(crate) fn positive(&self, key: &str, default: f32) -> f32 {
        self.parsed(key, default, |raw| {
            let v = parse_number(raw)?;
            if v > 0.0 {
                Ok(v)
            } else {
                Err(AttrError::OutOfBounds {
                    value: v,
                    expected: "(0, inf)",
                })
            }
        })
    }

    pub(crate) fn non_negative(&self, key: &str, default: f32) -> f32 {
        self.parsed(key, default, |raw| {
            let v = parse_number(raw)?;
            if v >= 0.0 {
                Ok(v)
            } else {
                Err(AttrError::OutOfBounds {
                    value: v,
                    expected: "[0, inf)",
                })
            }
        })
    }

    pub(crate) fn fraction(&self, key: &str, default: f32) -> f32 {
        self.parsed(key, default, |raw| {
            let v = parse_number(raw)?;
            if (0.0..=1.0).contains(&v) {
                Ok(v)
            } else {
                Err(AttrError::OutOfBounds {
                    value: v,
                    expected: "[0, 1]",
                })
            }
        })
    }

    /// Field of view in degrees, strictly inside (0, 180).
    pub(crate) fn angle(&self, key: &str, default: f32) -> f32 {
        self.parsed(key, default, |raw| {
            let v = parse_number(raw)?;
            if v > 0.0 && v < 180.0 {
                Ok(v)
            } else {
                Err(AttrError::OutOfBounds {
                    value: v,
                    expected: "(0, 180)",
                })
            }
        })
    }

    /// Whole count, rounded, at least `min`.
    pub(crate) fn count(&self, key: &str, default: u32, min: u32) -> u32 {
        self.parsed(key, default, |raw| {
            let v = parse_number(raw)?.round();
            if v >= min as f32 && v <= u16::MAX as f32 {
                Ok(v as u32)
            } else {
                Err(AttrError::OutOfBounds {
                    value: v,
                    expected: "a supported count",
                })
            }
        })
    }

    pub(crate) fn flag(&self, key: &str, default: bool) -> bool {
        self.parsed(key, default, parse_bool)
    }

    pub(crate) fn color(&self, key: &str, default: Color) -> Color {
        self.parsed(key, default, Color::parse)
    }

    pub(crate) fn palette(&self, key: &str, default: Vec<Color>) -> Vec<Color> {
        self.parsed(key, default, parse_palette)
    }

    pub(crate) fn range(&self, key: &str, default: Range) -> Range {
        self.parsed(key, default, parse_range)
    }

    pub(crate) fn map(&self, key: &str) -> Option<serde_json::Map<String, Value>> {
        let raw = self.src.attribute(key)?;
        match parse_map(&raw) {
            Ok(map) => Some(map),
            Err(e) => {
                log::debug!("[config] {key}: {e}; ignoring");
                None
            }
        }
    }
}
