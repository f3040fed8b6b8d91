//! Declarative per-host configuration.
//!
//! Resolution is layered: effect defaults, then an optional named preset
//! (`data-preset`), then the values declared on the host. All string parsing
//! happens here; everything downstream reads concrete, validated values.

mod color;
mod hyperspeed;
mod iridescence;
mod parse;

pub use color::Color;
pub use hyperspeed::{HyperspeedColors, HyperspeedOptions};
pub use iridescence::IridescenceOptions;
pub use parse::{
    parse_bool, parse_number, parse_palette, parse_range, AttrError, AttributeSource, Range,
};

use crate::distortion::DistortionRegistry;

pub const EFFECT_ATTR: &str = "data-effect";
pub const PRESET_ATTR: &str = "data-preset";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Iridescence,
    Hyperspeed,
}

impl EffectKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "iridescence" => Some(Self::Iridescence),
            "hyperspeed" => Some(Self::Hyperspeed),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Iridescence => "iridescence",
            Self::Hyperspeed => "hyperspeed",
        }
    }
}

/// Fully-resolved options for one effect instance.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectConfig {
    Iridescence(IridescenceOptions),
    Hyperspeed(HyperspeedOptions),
}

impl EffectConfig {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Iridescence(_) => EffectKind::Iridescence,
            Self::Hyperspeed(_) => EffectKind::Hyperspeed,
        }
    }

    /// Whether the host should forward pointer movement to the instance.
    pub fn wants_pointer(&self) -> bool {
        matches!(self, Self::Iridescence(o) if o.mouse_react)
    }

    /// `None` when the host declares no effect or one this crate does not know.
    pub fn resolve<S: AttributeSource + ?Sized>(src: &S) -> Option<Self> {
        Self::resolve_with(src, &DistortionRegistry::builtin())
    }

    pub fn resolve_with<S: AttributeSource + ?Sized>(
        src: &S,
        registry: &DistortionRegistry,
    ) -> Option<Self> {
        let declared = src.attribute(EFFECT_ATTR)?;
        let Some(kind) = EffectKind::from_name(&declared) else {
            log::warn!("[config] unknown effect `{declared}`; host left untouched");
            return None;
        };
        let preset = src.attribute(PRESET_ATTR);
        let config = match kind {
            EffectKind::Iridescence => {
                let base = preset
                    .as_deref()
                    .and_then(|name| layer(name, IridescenceOptions::preset))
                    .unwrap_or_default();
                Self::Iridescence(IridescenceOptions::resolve(src, base))
            }
            EffectKind::Hyperspeed => {
                let base = preset
                    .as_deref()
                    .and_then(|name| layer(name, HyperspeedOptions::preset))
                    .unwrap_or_default();
                Self::Hyperspeed(HyperspeedOptions::resolve(src, base, registry))
            }
        };
        Some(config)
    }
}

fn layer<T>(name: &str, lookup: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let found = lookup(name);
    if found.is_none() {
        log::debug!("[config] unknown preset `{name}`; using defaults");
    }
    found
}
