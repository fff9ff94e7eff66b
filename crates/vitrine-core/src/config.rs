#![allow(dead_code)]
//! Core configuration for vitrine-core.

use serde::{Deserialize, Serialize};

/// Timings and thresholds for the presentation core.
/// Defaults mirror the production site; hosts override per page. Omitted
/// top-level fields keep their defaults when deserialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named animation durations in milliseconds.
    pub durations: Durations,
    /// Responsive width breakpoints in logical pixels.
    pub breakpoints: Breakpoints,

    /// Visible fraction required before a class reveal fires.
    pub reveal_threshold: f32,
    /// Stricter fraction for counters and typewriters, so they do not fire
    /// on a partial scroll-past.
    pub focus_threshold: f32,

    /// Length of one animation frame in milliseconds (counter stepping).
    pub frame_interval_ms: f64,
    /// Counter duration when the registration does not carry one.
    pub counter_duration_ms: f64,
    /// Per-character delay when a typewriter registration does not carry one.
    pub typewriter_speed_ms: f64,
    /// Parallax factor when the registration does not carry one.
    pub parallax_speed: f64,

    /// Distance from the document bottom that arms the next batch load.
    pub near_bottom_px: f64,
    /// Throttle window for the near-bottom scroll check.
    pub scroll_check_ms: f64,
    /// Throttle window for parallax scroll handling.
    pub parallax_throttle_ms: f64,
    /// Debounce window for viewport resize classification.
    pub resize_debounce_ms: f64,

    /// Delay before the overlay enter transition is armed after mount.
    pub overlay_enter_delay_ms: f64,
    /// Exit transition length before the overlay is torn down.
    pub overlay_exit_ms: f64,

    /// Hold before the preloader starts fading after page load.
    pub preloader_hold_ms: f64,
    /// Fade length before the preloader is hidden outright.
    pub preloader_fade_ms: f64,

    /// Simulated image source defaults.
    pub batch: BatchDefaults,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Durations {
    pub fast: f64,
    pub normal: f64,
    pub slow: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Breakpoints {
    pub mobile: f64,
    pub tablet: f64,
    pub desktop: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BatchDefaults {
    /// Records per simulated batch.
    pub size: usize,
    /// Simulated settle latency in milliseconds.
    pub latency_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: Durations {
                fast: 300.0,
                normal: 600.0,
                slow: 1000.0,
            },
            breakpoints: Breakpoints {
                mobile: 768.0,
                tablet: 1024.0,
                desktop: 1200.0,
            },
            reveal_threshold: 0.1,
            focus_threshold: 0.5,
            frame_interval_ms: 16.0,
            counter_duration_ms: 2000.0,
            typewriter_speed_ms: 100.0,
            parallax_speed: 0.5,
            near_bottom_px: 1000.0,
            scroll_check_ms: 250.0,
            parallax_throttle_ms: 16.0,
            resize_debounce_ms: 250.0,
            overlay_enter_delay_ms: 10.0,
            overlay_exit_ms: 300.0,
            preloader_hold_ms: 1000.0,
            preloader_fade_ms: 500.0,
            batch: BatchDefaults {
                size: 6,
                latency_ms: 1000.0,
            },
        }
    }
}
