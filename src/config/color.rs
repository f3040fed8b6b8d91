use super::parse::AttrError;
use serde_json::Value;

/// Linear RGB with components in `0.0..=1.0`.
///
/// Every declared form (`#rrggbb`, `#rgb`, `0xrrggbb`, a JSON integer such as
/// `16777215`, or a `[r, g, b]` triplet) lands on this one representation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }

    pub fn parse(raw: &str) -> Result<Self, AttrError> {
        let s = raw.trim();
        let err = || AttrError::NotAColor(raw.to_string());
        if let Some(digits) = s.strip_prefix('#') {
            return parse_hex_digits(digits, true).ok_or_else(err);
        }
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return parse_hex_digits(digits, false).ok_or_else(err);
        }
        let value: Value = serde_json::from_str(s).map_err(|_| err())?;
        Self::from_json(&value).map_err(|_| err())
    }

    pub fn from_json(value: &Value) -> Result<Self, AttrError> {
        let err = || AttrError::NotAColor(value.to_string());
        match value {
            Value::Number(n) => n
                .as_u64()
                .filter(|hex| *hex <= 0xff_ffff)
                .map(|hex| Self::from_hex(hex as u32))
                .ok_or_else(err),
            Value::String(s) => Self::parse(s),
            Value::Array(items) if items.len() == 3 => {
                let mut c = [0.0f32; 3];
                for (slot, item) in c.iter_mut().zip(items) {
                    *slot = item.as_f64().ok_or_else(err)? as f32;
                }
                if c.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 255.0) {
                    return Err(err());
                }
                // unit triplets stay as-is; anything above 1 reads as 0-255 bytes
                if c.iter().all(|v| *v <= 1.0) {
                    Ok(Self::rgb(c[0], c[1], c[2]))
                } else {
                    Ok(Self::rgb(c[0] / 255.0, c[1] / 255.0, c[2] / 255.0))
                }
            }
            _ => Err(err()),
        }
    }
}

fn parse_hex_digits(digits: &str, allow_short: bool) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok().map(Color::from_hex),
        3 if allow_short => {
            let mut hex = 0u32;
            for c in digits.chars() {
                let d = c.to_digit(16)?;
                hex = (hex << 8) | (d << 4) | d;
            }
            Some(Color::from_hex(hex))
        }
        _ => None,
    }
}
