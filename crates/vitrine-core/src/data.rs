#![allow(dead_code)]
//! Domain model: reveal specs, gallery images, device classes.
//!
//! Registration input is lenient by contract: unknown kinds and malformed
//! numeric attributes fall back to documented defaults instead of failing,
//! because markup authors get no error channel.

use serde::{Deserialize, Serialize};

use crate::config::Breakpoints;

/// Entrance animation family for a registered target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealKind {
    FadeUp,
    FadeIn,
    SlideLeft,
    SlideRight,
    ZoomIn,
    Counter,
    Typewriter,
    Parallax,
}

impl RevealKind {
    /// Lenient wire parse; anything unrecognized is the default FadeUp.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "fade-up" => Self::FadeUp,
            "fade-in" => Self::FadeIn,
            "slide-left" => Self::SlideLeft,
            "slide-right" => Self::SlideRight,
            "zoom-in" => Self::ZoomIn,
            "counter" => Self::Counter,
            "typewriter" => Self::Typewriter,
            "parallax" => Self::Parallax,
            _ => Self::FadeUp,
        }
    }

    /// Class applied when a class-based reveal fires; the programmatic kinds
    /// (counter, typewriter, parallax) write text or styles instead.
    pub fn animation_class(&self) -> Option<&'static str> {
        match self {
            Self::FadeUp => Some("animate-fade-up"),
            Self::FadeIn => Some("animate-fade-in"),
            Self::SlideLeft => Some("animate-slide-left"),
            Self::SlideRight => Some("animate-slide-right"),
            Self::ZoomIn => Some("animate-zoom-in"),
            Self::Counter | Self::Typewriter | Self::Parallax => None,
        }
    }

    /// Counters and typewriters wait for half the element to be visible.
    #[inline]
    pub fn wants_focus_threshold(&self) -> bool {
        matches!(self, Self::Counter | Self::Typewriter)
    }

    /// Parallax targets track scroll position and are never observed.
    #[inline]
    pub fn is_observed(&self) -> bool {
        !matches!(self, Self::Parallax)
    }
}

impl Default for RevealKind {
    fn default() -> Self {
        Self::FadeUp
    }
}

/// Per-kind payload carried by a registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectSpec {
    /// Apply `revealed` plus the kind's animation class.
    Classes,
    /// Count from 0 to `target` over `duration_ms`.
    Counter { target: i64, duration_ms: f64 },
    /// Append `text` one character per `char_delay_ms`.
    Typewriter { text: String, char_delay_ms: f64 },
    /// Offset by `-(scroll_y * speed)` px on scroll.
    Parallax { speed: f64 },
}

/// One reveal registration: what to animate, when, and with what payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealSpec {
    pub kind: RevealKind,
    /// Applied after the visibility trigger; already clamped non-negative.
    pub delay_ms: f64,
    pub effect: EffectSpec,
}

impl RevealSpec {
    pub fn classes(kind: RevealKind, delay_ms: f64) -> Self {
        Self {
            kind,
            delay_ms: delay_ms.max(0.0),
            effect: EffectSpec::Classes,
        }
    }

    pub fn counter(target: i64, duration_ms: f64, delay_ms: f64) -> Self {
        Self {
            kind: RevealKind::Counter,
            delay_ms: delay_ms.max(0.0),
            effect: EffectSpec::Counter {
                target,
                duration_ms: duration_ms.max(0.0),
            },
        }
    }

    pub fn typewriter(text: impl Into<String>, char_delay_ms: f64, delay_ms: f64) -> Self {
        Self {
            kind: RevealKind::Typewriter,
            delay_ms: delay_ms.max(0.0),
            effect: EffectSpec::Typewriter {
                text: text.into(),
                char_delay_ms: char_delay_ms.max(0.0),
            },
        }
    }

    pub fn parallax(speed: f64) -> Self {
        Self {
            kind: RevealKind::Parallax,
            delay_ms: 0.0,
            effect: EffectSpec::Parallax { speed },
        }
    }
}

/// Parse a millisecond attribute; non-parseable or negative falls back.
pub fn parse_ms(raw: Option<&str>, default: f64) -> f64 {
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(v) if v >= 0.0 && v.is_finite() => v,
        _ => default,
    }
}

/// Parse a counter target; non-parseable falls back to 0.
pub fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Parse a unitless factor (parallax speed); non-parseable falls back.
pub fn parse_factor(raw: Option<&str>, default: f64) -> f64 {
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(v) if v.is_finite() => v,
        _ => default,
    }
}

/// One displayable picture. Field names match the manifest/fetch wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(rename = "src")]
    pub source_url: String,
    #[serde(rename = "alt", default)]
    pub alt_text: String,
    #[serde(default)]
    pub category: String,
}

/// Coarse device bucket broadcast after a settled resize.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn classify(width: f64, bp: &Breakpoints) -> Self {
        if width < bp.mobile {
            Self::Mobile
        } else if width < bp.tablet {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

/// What the overlay shows: one image out of the open snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightboxView {
    pub source_url: String,
    pub alt_text: String,
    /// Position in the snapshot, zero-based.
    pub index: usize,
    pub count: usize,
}

impl LightboxView {
    /// Human counter text, one-based.
    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.index + 1, self.count)
    }
}
