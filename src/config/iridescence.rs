use super::color::Color;
use super::parse::{AttributeSource, Reader};

pub const COLOR_ATTR: &str = "data-color";
pub const SPEED_ATTR: &str = "data-speed";
pub const AMPLITUDE_ATTR: &str = "data-amplitude";
pub const MOUSE_REACT_ATTR: &str = "data-mouse-react";

#[derive(Clone, Debug, PartialEq)]
pub struct IridescenceOptions {
    pub color: Color,
    pub speed: f32,
    pub amplitude: f32,
    pub mouse_react: bool,
}

impl Default for IridescenceOptions {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.5, 0.7, 1.0),
            speed: 0.7,
            amplitude: 0.2,
            mouse_react: true,
        }
    }
}

impl IridescenceOptions {
    /// Named override layer sitting between the defaults and declared values.
    pub fn preset(name: &str) -> Option<Self> {
        let base = Self::default();
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(base),
            "aurora" => Some(Self {
                color: Color::rgb(0.3, 1.0, 0.7),
                speed: 0.5,
                amplitude: 0.1,
                ..base
            }),
            "maple" => Some(Self {
                color: Color::rgb(1.0, 0.35, 0.3),
                speed: 0.9,
                ..base
            }),
            "still" => Some(Self {
                speed: 0.2,
                mouse_react: false,
                ..base
            }),
            _ => None,
        }
    }

    pub(crate) fn resolve<S: AttributeSource + ?Sized>(src: &S, base: Self) -> Self {
        let r = Reader::new(src);
        Self {
            color: r.color(COLOR_ATTR, base.color),
            speed: r.number(SPEED_ATTR, base.speed),
            amplitude: r.number(AMPLITUDE_ATTR, base.amplitude),
            mouse_react: r.flag(MOUSE_REACT_ATTR, base.mouse_react),
        }
    }
}
