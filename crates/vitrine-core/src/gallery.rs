#![allow(dead_code)]
//! Gallery: append-ordered images, category filter, lightbox state machine,
//! guarded infinite scroll, lazy loading.
//!
//! The lightbox runs Closed -> Open -> Closing -> Closed. Every open bumps an
//! epoch; enter/teardown deadlines carry the epoch they were scheduled under
//! and fire only while it is current, which keeps "exactly one close per
//! open" true without timer cancellation.

use hashbrown::HashMap;

use crate::config::Config;
use crate::data::{GalleryImage, LightboxView};
use crate::error::{Result, VitrineError};
use crate::fetch::{FetchOutcome, FetchTicket, ImageSource};
use crate::ids::{IdAllocator, ItemId, TargetId};
use crate::inputs::KeyInput;
use crate::outputs::{AppendedItem, Change, CoreEvent, Outputs};
use crate::pacing::Throttle;
use crate::timer::{TimerKind, TimerWheel};

/// One gallery entry. Index in the engine's sequence is its identity for
/// lightbox navigation; `visible` is the pure function of the active filter.
#[derive(Clone, Debug)]
pub struct GalleryItem {
    pub id: ItemId,
    pub image: GalleryImage,
    pub visible: bool,
}

/// Transient viewer state; exists only while the overlay is up.
#[derive(Clone, Debug)]
pub struct LightboxState {
    /// Image sequence captured at open; later appends do not resize it.
    snapshot: Vec<GalleryImage>,
    current_index: usize,
}

#[derive(Clone, Debug)]
enum LightboxPhase {
    Closed,
    Open(LightboxState),
    Closing,
}

/// Gallery component: owns the image sequence, the filter, the lightbox,
/// and the pagination cursor.
pub struct GalleryEngine {
    items: Vec<GalleryItem>,
    active_category: String,
    lightbox: LightboxPhase,
    /// Bumped on every open; stale overlay deadlines are dropped on mismatch.
    epoch: u32,
    /// Next page to request; advances only on a successful append.
    page: u32,
    /// Sole mutual exclusion for load_more: set before the fetch is issued,
    /// cleared when it settles, success or failure.
    loading: bool,
    scroll_gate: Throttle,
    near_bottom_px: f64,
    overlay_enter_delay_ms: f64,
    overlay_exit_ms: f64,
    /// Lazily loaded placeholders awaiting their first visibility signal.
    lazy: HashMap<TargetId, String>,
}

fn show_under(active: &str, category: &str) -> bool {
    active == "all" || active == category
}

fn view_at(snapshot: &[GalleryImage], index: usize) -> LightboxView {
    let image = &snapshot[index];
    LightboxView {
        source_url: image.source_url.clone(),
        alt_text: image.alt_text.clone(),
        index,
        count: snapshot.len(),
    }
}

impl GalleryEngine {
    pub fn new(cfg: &Config) -> Self {
        Self {
            items: Vec::new(),
            active_category: "all".to_string(),
            lightbox: LightboxPhase::Closed,
            epoch: 0,
            page: 1,
            loading: false,
            scroll_gate: Throttle::new(cfg.scroll_check_ms),
            near_bottom_px: cfg.near_bottom_px,
            overlay_enter_delay_ms: cfg.overlay_enter_delay_ms,
            overlay_exit_ms: cfg.overlay_exit_ms,
            lazy: HashMap::new(),
        }
    }

    /// Add one image to the end of the sequence.
    pub fn add_image(&mut self, id: ItemId, image: GalleryImage) {
        let visible = show_under(&self.active_category, &image.category);
        self.items.push(GalleryItem { id, image, visible });
    }

    /// Register a lazy placeholder; the real source swaps in on first
    /// visibility.
    pub fn register_lazy(&mut self, id: TargetId, url: String, out: &mut Outputs) {
        out.push_change(Change::Observe {
            target: id,
            threshold: 0.0,
        });
        self.lazy.insert(id, url);
    }

    /// Handle a visibility crossing for a lazy placeholder. Returns false
    /// when the target is not one of ours.
    pub fn on_visibility(&mut self, id: TargetId, out: &mut Outputs) -> bool {
        match self.lazy.remove(&id) {
            Some(url) => {
                out.push_change(Change::SetImageSource { target: id, url });
                out.push_change(Change::RemoveClass {
                    target: id,
                    class: "lazy".to_string(),
                });
                out.push_change(Change::Unobserve { target: id });
                true
            }
            None => false,
        }
    }

    /// Open the lightbox on the full current sequence at `index`.
    ///
    /// An open overlay is torn down in full first (the scroll lock stays in
    /// place across the swap). Activation during the exit transition is
    /// rejected; out-of-range indices fail fast rather than clamp.
    pub fn activate(
        &mut self,
        index: usize,
        now: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) -> Result<()> {
        if matches!(self.lightbox, LightboxPhase::Closing) {
            return Err(VitrineError::OverlayBusy);
        }
        let len = self.items.len();
        if index >= len {
            return Err(VitrineError::IndexOutOfRange { index, len });
        }

        let was_open = matches!(self.lightbox, LightboxPhase::Open(_));
        if was_open {
            out.push_change(Change::UnmountLightbox);
        }

        self.epoch = self.epoch.wrapping_add(1);
        let snapshot: Vec<GalleryImage> = self.items.iter().map(|i| i.image.clone()).collect();
        let view = view_at(&snapshot, index);
        let count = snapshot.len();

        out.push_change(Change::MountLightbox { view });
        if !was_open {
            out.push_change(Change::LockPageScroll);
        }
        wheel.schedule(
            now + self.overlay_enter_delay_ms,
            TimerKind::OverlayEnter { epoch: self.epoch },
        );
        out.push_event(CoreEvent::LightboxOpened { index, count });

        self.lightbox = LightboxPhase::Open(LightboxState {
            snapshot,
            current_index: index,
        });
        Ok(())
    }

    /// Open the lightbox from a clicked item, using its position in the
    /// full current sequence at click time.
    pub fn activate_item(
        &mut self,
        item: ItemId,
        now: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) -> Result<()> {
        match self.items.iter().position(|i| i.id == item) {
            Some(index) => self.activate(index, now, wheel, out),
            None => Err(VitrineError::UnknownItem { id: item.0 }),
        }
    }

    /// Wrap-around step forward. No-op unless the lightbox is open.
    pub fn next(&mut self, out: &mut Outputs) {
        if let LightboxPhase::Open(state) = &mut self.lightbox {
            state.current_index = (state.current_index + 1) % state.snapshot.len();
            let view = view_at(&state.snapshot, state.current_index);
            out.push_change(Change::UpdateLightbox { view });
            out.push_event(CoreEvent::LightboxNavigated {
                index: state.current_index,
            });
        }
    }

    /// Wrap-around step backward. No-op unless the lightbox is open.
    pub fn previous(&mut self, out: &mut Outputs) {
        if let LightboxPhase::Open(state) = &mut self.lightbox {
            let len = state.snapshot.len();
            state.current_index = (state.current_index + len - 1) % len;
            let view = view_at(&state.snapshot, state.current_index);
            out.push_change(Change::UpdateLightbox { view });
            out.push_event(CoreEvent::LightboxNavigated {
                index: state.current_index,
            });
        }
    }

    /// Start the exit transition. Re-entrant calls while closing (and calls
    /// with nothing open) are ignored so each open closes exactly once.
    pub fn close(&mut self, now: f64, wheel: &mut TimerWheel, out: &mut Outputs) {
        if !matches!(self.lightbox, LightboxPhase::Open(_)) {
            return;
        }
        self.lightbox = LightboxPhase::Closing;
        out.push_change(Change::SetOverlayActive { active: false });
        wheel.schedule(
            now + self.overlay_exit_ms,
            TimerKind::OverlayTeardown { epoch: self.epoch },
        );
    }

    /// Keyboard contract while open: Left/Right navigate, Escape closes.
    pub fn handle_key(
        &mut self,
        key: KeyInput,
        now: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) {
        if !matches!(self.lightbox, LightboxPhase::Open(_)) {
            return;
        }
        match key {
            KeyInput::ArrowLeft => self.previous(out),
            KeyInput::ArrowRight => self.next(out),
            KeyInput::Escape => self.close(now, wheel, out),
        }
    }

    /// Arm the overlay enter transition, unless the open it belongs to has
    /// already been replaced.
    pub fn on_overlay_enter(&mut self, epoch: u32, out: &mut Outputs) {
        if epoch != self.epoch || !matches!(self.lightbox, LightboxPhase::Open(_)) {
            log::debug!("stale overlay enter for epoch {epoch}");
            return;
        }
        out.push_change(Change::SetOverlayActive { active: true });
    }

    /// Finish a close once the exit transition has played.
    pub fn on_overlay_teardown(&mut self, epoch: u32, out: &mut Outputs) {
        if epoch != self.epoch || !matches!(self.lightbox, LightboxPhase::Closing) {
            log::debug!("stale overlay teardown for epoch {epoch}");
            return;
        }
        self.lightbox = LightboxPhase::Closed;
        out.push_change(Change::UnmountLightbox);
        out.push_change(Change::UnlockPageScroll);
        out.push_event(CoreEvent::LightboxClosed);
    }

    /// Recompute every item's visibility against `category` and mark the
    /// matching filter control active.
    pub fn set_filter(&mut self, category: &str, out: &mut Outputs) {
        self.active_category = category.to_string();
        let mut visible = 0usize;
        for item in &mut self.items {
            item.visible = show_under(&self.active_category, &item.image.category);
            if item.visible {
                visible += 1;
            }
            out.push_change(Change::SetItemVisible {
                item: item.id,
                visible: item.visible,
            });
        }
        out.push_change(Change::SetActiveFilter {
            category: category.to_string(),
        });
        out.push_event(CoreEvent::FilterChanged {
            category: category.to_string(),
            visible,
        });
    }

    /// Request the next batch unless one is already in flight. The guard is
    /// set before the source is consulted; whichever way the ticket settles,
    /// only the settle clears it.
    pub fn load_more(
        &mut self,
        now: f64,
        source: &mut dyn ImageSource,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) {
        if self.loading {
            return;
        }
        self.loading = true;
        match source.begin_fetch(self.page) {
            FetchTicket::Deferred { latency_ms, outcome } => {
                wheel.schedule(
                    now + latency_ms,
                    TimerKind::FetchSettle {
                        page: self.page,
                        outcome,
                    },
                );
            }
            FetchTicket::Host => {
                out.push_event(CoreEvent::BatchRequested { page: self.page });
            }
        }
    }

    /// Deliver a settled fetch. Success appends in order and advances the
    /// page; failure is logged, never surfaced. Both clear the guard.
    pub fn settle_fetch(
        &mut self,
        page: u32,
        outcome: FetchOutcome,
        ids: &mut IdAllocator,
        out: &mut Outputs,
    ) {
        if !self.loading {
            log::warn!("fetch settle for page {page} with no fetch in flight");
            return;
        }
        if page != self.page {
            log::warn!(
                "fetch settle for page {page} while page {} is in flight",
                self.page
            );
            return;
        }
        match outcome {
            FetchOutcome::Batch(records) => {
                let mut appended = Vec::with_capacity(records.len());
                for image in records {
                    let id = ids.alloc_item();
                    let visible = show_under(&self.active_category, &image.category);
                    self.items.push(GalleryItem {
                        id,
                        image: image.clone(),
                        visible,
                    });
                    appended.push(AppendedItem {
                        item: id,
                        image,
                        visible,
                    });
                }
                let count = appended.len();
                out.push_change(Change::AppendItems { items: appended });
                self.page += 1;
                out.push_event(CoreEvent::BatchAppended { page, count });
            }
            FetchOutcome::Failed { reason } => {
                log::warn!("batch load failed for page {page}: {reason}");
                out.push_event(CoreEvent::BatchFailed { page, reason });
            }
        }
        self.loading = false;
    }

    /// Throttled near-bottom check; arms `load_more` within reach of the
    /// document end.
    pub fn on_scroll(
        &mut self,
        now: f64,
        scroll_y: f64,
        viewport_height: f64,
        document_height: f64,
        source: &mut dyn ImageSource,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) {
        if !self.scroll_gate.allow(now) {
            return;
        }
        if scroll_y + viewport_height >= document_height - self.near_bottom_px {
            self.load_more(now, source, wheel, out);
        }
    }

    // ----- accessors -----

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|i| i.visible).count()
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn is_lightbox_open(&self) -> bool {
        matches!(self.lightbox, LightboxPhase::Open(_))
    }

    pub fn lightbox_index(&self) -> Option<usize> {
        match &self.lightbox {
            LightboxPhase::Open(state) => Some(state.current_index),
            _ => None,
        }
    }

    pub fn lightbox_len(&self) -> Option<usize> {
        match &self.lightbox {
            LightboxPhase::Open(state) => Some(state.snapshot.len()),
            _ => None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn item_visible(&self, item: ItemId) -> Option<bool> {
        self.items.iter().find(|i| i.id == item).map(|i| i.visible)
    }
}
