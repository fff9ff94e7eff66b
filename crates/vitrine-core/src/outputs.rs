#![allow(dead_code)]
//! Output contracts from the core engine.
//!
//! Outputs carry the side effects the host must apply this tick (DOM-shaped
//! changes, observation control) and a separate list of semantic events the
//! host may forward as page-level notifications. The core never mutates a
//! document; it only describes mutations.

use serde::{Deserialize, Serialize};

use crate::data::{DeviceClass, GalleryImage, LightboxView, RevealKind};
use crate::ids::{ItemId, TargetId};

/// One host-applied side effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// Start observing a target at the given visible fraction.
    Observe { target: TargetId, threshold: f32 },
    /// Stop observing a target (one-shot unsubscription).
    Unobserve { target: TargetId },
    AddClass { target: TargetId, class: String },
    RemoveClass { target: TargetId, class: String },
    SetText { target: TargetId, text: String },
    /// Append to the target's text (typewriter).
    AppendText { target: TargetId, text: String },
    SetStyle {
        target: TargetId,
        property: String,
        value: String,
    },
    /// Swap in the real source of a lazily loaded image.
    SetImageSource { target: TargetId, url: String },
    /// Show or hide one gallery item per the active filter.
    SetItemVisible { item: ItemId, visible: bool },
    /// Mark exactly this filter control active.
    SetActiveFilter { category: String },
    /// New batch appended to the gallery sequence; the host builds elements
    /// and wires each click back as `Signal::ItemActivated`.
    AppendItems { items: Vec<AppendedItem> },
    MountLightbox { view: LightboxView },
    UpdateLightbox { view: LightboxView },
    /// Toggle the overlay's enter/exit transition class.
    SetOverlayActive { active: bool },
    UnmountLightbox,
    LockPageScroll,
    UnlockPageScroll,
    /// Write a document-level attribute (device broadcast).
    SetDocumentAttr { name: String, value: String },
}

/// One record of a freshly appended batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppendedItem {
    pub item: ItemId,
    pub image: GalleryImage,
    /// Visibility under the filter active at append time.
    pub visible: bool,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    RevealFired { target: TargetId, kind: RevealKind },
    CounterFinished { target: TargetId, value: i64 },
    TypewriterFinished { target: TargetId },
    LightboxOpened { index: usize, count: usize },
    LightboxNavigated { index: usize },
    LightboxClosed,
    FilterChanged { category: String, visible: usize },
    /// The source deferred to the host; it must fetch `page` and answer with
    /// `Signal::FetchSettled`.
    BatchRequested { page: u32 },
    BatchAppended { page: u32, count: usize },
    BatchFailed { page: u32, reason: String },
    DeviceChanged { device: DeviceClass },
    /// Catch-all for forward-compatible payloads.
    Custom {
        kind: String,
        data: serde_json::Value,
    },
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Move everything out of `other` into self, preserving order.
    #[inline]
    pub fn absorb(&mut self, other: &mut Outputs) {
        self.changes.append(&mut other.changes);
        self.events.append(&mut other.events);
    }
}
