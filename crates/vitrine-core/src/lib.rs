#![allow(dead_code)]
//! Vitrine Core (host-agnostic)
//!
//! Presentation engine for image-heavy pages: a scroll-reveal scheduler
//! (entrance classes, counters, typewriter, parallax) and a gallery engine
//! (category filter, lightbox, infinite scroll, lazy loading). A host feeds
//! each frame's signals into Engine::update() and applies the returned
//! change list; nothing in this crate touches a real DOM or clock, so the
//! whole behavior is testable on plain threads.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod gallery;
pub mod ids;
pub mod inputs;
pub mod manifest;
pub mod outputs;
pub mod pacing;
pub mod reveal;
pub mod timer;

// Re-exports for consumers (adapters)
pub use config::{BatchDefaults, Breakpoints, Config, Durations};
pub use data::{parse_count, parse_factor, parse_ms};
pub use data::{DeviceClass, EffectSpec, GalleryImage, LightboxView, RevealKind, RevealSpec};
pub use engine::Engine;
pub use error::{Result, VitrineError};
pub use fetch::{FetchOutcome, FetchTicket, HostImageSource, ImageSource, SimulatedImageSource};
pub use gallery::{GalleryEngine, GalleryItem, LightboxState};
pub use ids::{IdAllocator, ItemId, TargetId};
pub use inputs::{Inputs, KeyInput, Signal};
pub use manifest::parse_gallery_manifest_json;
pub use outputs::{AppendedItem, Change, CoreEvent, Outputs};
pub use pacing::{Debounce, Throttle};
pub use reveal::RevealScheduler;
pub use timer::{TimerKind, TimerWheel};
