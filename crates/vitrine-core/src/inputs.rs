#![allow(dead_code)]
//! Input contracts for the core engine.
//!
//! Hosts collect the frame's events (observer callbacks, clicks, keys,
//! scroll/resize readings, fetch completions) into one Inputs value and pass
//! it to Engine::update(). Signals are handled in delivery order.

use serde::{Deserialize, Serialize};

use crate::fetch::FetchOutcome;
use crate::ids::{ItemId, TargetId};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Host events applied in order before due timers fire.
    #[serde(default)]
    pub signals: Vec<Signal>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Signal {
    /// An observed element crossed its visibility threshold (entering).
    VisibilityCrossed { target: TargetId },
    /// A gallery image was clicked.
    ItemActivated { item: ItemId },
    /// Lightbox next-arrow click.
    NextRequested,
    /// Lightbox previous-arrow click.
    PrevRequested,
    /// Lightbox close-button click.
    CloseRequested,
    /// Click on the overlay outside the content region.
    BackdropClicked,
    /// Keyboard input; routed to the lightbox only while it is open.
    Key(KeyInput),
    /// A filter control was selected.
    FilterSelected { category: String },
    /// Scroll reading for this frame (parallax + infinite scroll).
    ScrollChanged {
        scroll_y: f64,
        viewport_height: f64,
        document_height: f64,
    },
    /// Raw resize reading; debounced before device classification.
    ViewportResized { width: f64 },
    /// Host-owned fetch for `page` completed.
    FetchSettled { page: u32, outcome: FetchOutcome },
    /// The page finished loading (starts the preloader sequence).
    PageLoaded,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum KeyInput {
    ArrowLeft,
    ArrowRight,
    Escape,
}
