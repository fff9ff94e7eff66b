#![allow(dead_code)]
//! Engine: the host-facing facade.
//!
//! One `update(dt, inputs)` call per frame drives everything: registrations
//! made since the last call are flushed, this frame's signals are applied in
//! delivery order, due deadlines fire, and the debounced resize settles. The
//! returned Outputs hold the full batch of rendering instructions for the
//! frame.
//!
//! Direct methods (register_*, activate, set_filter, ...) fail fast with a
//! `VitrineError`; the same operations arriving as signals are lenient and
//! log instead, since host callbacks routinely outlive the elements that
//! produced them.

use crate::config::Config;
use crate::data::{DeviceClass, GalleryImage, RevealSpec};
use crate::error::Result;
use crate::fetch::{ImageSource, SimulatedImageSource};
use crate::gallery::GalleryEngine;
use crate::ids::{IdAllocator, ItemId, TargetId};
use crate::inputs::{Inputs, Signal};
use crate::manifest::parse_gallery_manifest_json;
use crate::outputs::{Change, CoreEvent, Outputs};
use crate::pacing::Debounce;
use crate::reveal::RevealScheduler;
use crate::timer::{TimerKind, TimerWheel};

/// Presentation engine: owns the reveal scheduler, the gallery, the deadline
/// wheel, and the clock. Single-threaded; one instance per page.
pub struct Engine {
    config: Config,
    ids: IdAllocator,
    reveal: RevealScheduler,
    gallery: GalleryEngine,
    wheel: TimerWheel,
    source: Box<dyn ImageSource>,
    /// Engine clock in ms; advances only inside update().
    now: f64,
    outputs: Outputs,
    /// Changes emitted between updates (registrations, direct calls); drained
    /// into the next frame's outputs ahead of everything else.
    spill: Outputs,
    resize: Debounce<f64>,
    preloader: Option<TargetId>,
    preloader_started: bool,
    device: Option<DeviceClass>,
}

impl Engine {
    /// Engine with the built-in simulated image source, configured from
    /// `config.batch`.
    pub fn new(config: Config) -> Self {
        let source = SimulatedImageSource::new(config.batch.size, config.batch.latency_ms);
        Self::with_source(config, Box::new(source))
    }

    /// Engine with a caller-provided image source.
    pub fn with_source(config: Config, source: Box<dyn ImageSource>) -> Self {
        Self {
            reveal: RevealScheduler::new(&config),
            gallery: GalleryEngine::new(&config),
            resize: Debounce::new(config.resize_debounce_ms),
            config,
            ids: IdAllocator::default(),
            wheel: TimerWheel::default(),
            source,
            now: 0.0,
            outputs: Outputs::default(),
            spill: Outputs::default(),
            preloader: None,
            preloader_started: false,
            device: None,
        }
    }

    /// Advance the engine by `dt_ms` and apply this frame's signals.
    pub fn update(&mut self, dt_ms: f64, inputs: Inputs) -> &Outputs {
        // 1) Fresh frame; registrations since the last update land first.
        self.outputs.clear();
        self.outputs.absorb(&mut self.spill);

        // 2) Advance the clock.
        self.now += dt_ms;

        // 3) Frame-paced counter runs consume this tick's delta.
        self.reveal.advance_counters(dt_ms, &mut self.outputs);

        // 4) Host signals, in delivery order.
        for signal in inputs.signals {
            self.dispatch(signal);
        }

        // 5) Fire due deadlines in (deadline, seq) order; fired handlers may
        //    schedule more, so keep draining until none are due.
        while let Some((fired_at, kind)) = self.wheel.pop_due(self.now) {
            self.fire(fired_at, kind);
        }

        // 6) Debounced resize settles once its quiet window has passed.
        if let Some(width) = self.resize.settle(self.now) {
            self.announce_device(width);
        }

        &self.outputs
    }

    fn dispatch(&mut self, signal: Signal) {
        match signal {
            Signal::VisibilityCrossed { target } => {
                let handled = self
                    .reveal
                    .on_visibility(target, self.now, &mut self.wheel, &mut self.outputs)
                    || self.gallery.on_visibility(target, &mut self.outputs);
                if !handled {
                    log::warn!("visibility signal for unknown target {}", target.0);
                }
            }
            Signal::ItemActivated { item } => {
                let res = self
                    .gallery
                    .activate_item(item, self.now, &mut self.wheel, &mut self.outputs);
                if let Err(err) = res {
                    log::warn!("activation ignored: {err}");
                }
            }
            Signal::NextRequested => self.gallery.next(&mut self.outputs),
            Signal::PrevRequested => self.gallery.previous(&mut self.outputs),
            Signal::CloseRequested | Signal::BackdropClicked => {
                self.gallery
                    .close(self.now, &mut self.wheel, &mut self.outputs);
            }
            Signal::Key(key) => {
                self.gallery
                    .handle_key(key, self.now, &mut self.wheel, &mut self.outputs);
            }
            Signal::FilterSelected { category } => {
                self.gallery.set_filter(&category, &mut self.outputs);
            }
            Signal::ScrollChanged {
                scroll_y,
                viewport_height,
                document_height,
            } => {
                self.reveal.on_scroll(self.now, scroll_y, &mut self.outputs);
                self.gallery.on_scroll(
                    self.now,
                    scroll_y,
                    viewport_height,
                    document_height,
                    self.source.as_mut(),
                    &mut self.wheel,
                    &mut self.outputs,
                );
            }
            Signal::ViewportResized { width } => self.resize.push(self.now, width),
            Signal::FetchSettled { page, outcome } => {
                self.gallery
                    .settle_fetch(page, outcome, &mut self.ids, &mut self.outputs);
            }
            Signal::PageLoaded => self.start_preloader(),
        }
    }

    fn fire(&mut self, fired_at: f64, kind: TimerKind) {
        match kind {
            TimerKind::RevealApply { target } => {
                self.reveal
                    .apply(target, fired_at, &mut self.wheel, &mut self.outputs);
            }
            TimerKind::TypewriterTick { target } => {
                self.reveal
                    .typewriter_tick(target, fired_at, &mut self.wheel, &mut self.outputs);
            }
            TimerKind::OverlayEnter { epoch } => {
                self.gallery.on_overlay_enter(epoch, &mut self.outputs);
            }
            TimerKind::OverlayTeardown { epoch } => {
                self.gallery.on_overlay_teardown(epoch, &mut self.outputs);
            }
            TimerKind::FetchSettle { page, outcome } => {
                self.gallery
                    .settle_fetch(page, outcome, &mut self.ids, &mut self.outputs);
            }
            TimerKind::PreloaderFade { target } => {
                self.outputs.push_change(Change::SetStyle {
                    target,
                    property: "opacity".to_string(),
                    value: "0".to_string(),
                });
                self.wheel.schedule(
                    fired_at + self.config.preloader_fade_ms,
                    TimerKind::PreloaderHide { target },
                );
            }
            TimerKind::PreloaderHide { target } => {
                self.outputs.push_change(Change::SetStyle {
                    target,
                    property: "display".to_string(),
                    value: "none".to_string(),
                });
            }
        }
    }

    fn start_preloader(&mut self) {
        let target = match self.preloader {
            Some(t) => t,
            None => return,
        };
        if self.preloader_started {
            return;
        }
        self.preloader_started = true;
        self.wheel.schedule(
            self.now + self.config.preloader_hold_ms,
            TimerKind::PreloaderFade { target },
        );
    }

    /// Re-announced on every settle, matching the page's resize broadcast.
    fn announce_device(&mut self, width: f64) {
        let device = DeviceClass::classify(width, &self.config.breakpoints);
        self.device = Some(device);
        self.outputs.push_change(Change::SetDocumentAttr {
            name: "data-device".to_string(),
            value: device.as_str().to_string(),
        });
        self.outputs.push_event(CoreEvent::DeviceChanged { device });
    }

    // ----- registration (effects land in the next update's outputs) -----

    /// Register a scroll-reveal target. Returns its id for signal routing.
    pub fn register_reveal(&mut self, spec: RevealSpec) -> TargetId {
        let id = self.ids.alloc_target();
        self.reveal.register(id, spec, &mut self.spill);
        id
    }

    /// Register a lazy-loading placeholder that swaps to `url` when first
    /// visible.
    pub fn register_lazy(&mut self, url: &str) -> TargetId {
        let id = self.ids.alloc_target();
        self.gallery
            .register_lazy(id, url.to_string(), &mut self.spill);
        id
    }

    /// Register the page preloader element; the hide sequence starts on the
    /// PageLoaded signal.
    pub fn register_preloader(&mut self) -> TargetId {
        let id = self.ids.alloc_target();
        self.preloader = Some(id);
        self.preloader_started = false;
        id
    }

    /// Append one image to the gallery sequence.
    pub fn add_image(&mut self, image: GalleryImage) -> ItemId {
        let id = self.ids.alloc_item();
        self.gallery.add_image(id, image);
        id
    }

    /// Parse a gallery manifest and append every image, in manifest order.
    pub fn load_manifest(&mut self, json: &str) -> Result<Vec<ItemId>> {
        let images = parse_gallery_manifest_json(json)?;
        let mut added = Vec::with_capacity(images.len());
        for image in images {
            added.push(self.add_image(image));
        }
        Ok(added)
    }

    // ----- direct operations (fail fast) -----

    /// Open the lightbox at `index` into the full current sequence.
    pub fn activate(&mut self, index: usize) -> Result<()> {
        self.gallery
            .activate(index, self.now, &mut self.wheel, &mut self.spill)
    }

    pub fn next(&mut self) {
        self.gallery.next(&mut self.spill);
    }

    pub fn previous(&mut self) {
        self.gallery.previous(&mut self.spill);
    }

    pub fn close(&mut self) {
        self.gallery
            .close(self.now, &mut self.wheel, &mut self.spill);
    }

    pub fn set_filter(&mut self, category: &str) {
        self.gallery.set_filter(category, &mut self.spill);
    }

    /// Request the next image batch, subject to the in-flight guard.
    pub fn load_more(&mut self) {
        self.gallery.load_more(
            self.now,
            self.source.as_mut(),
            &mut self.wheel,
            &mut self.spill,
        );
    }

    // ----- accessors -----

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device(&self) -> Option<DeviceClass> {
        self.device
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.gallery.is_lightbox_open()
    }

    pub fn lightbox_index(&self) -> Option<usize> {
        self.gallery.lightbox_index()
    }

    pub fn page(&self) -> u32 {
        self.gallery.page()
    }

    pub fn is_loading(&self) -> bool {
        self.gallery.is_loading()
    }

    pub fn gallery_len(&self) -> usize {
        self.gallery.len()
    }

    pub fn visible_count(&self) -> usize {
        self.gallery.visible_count()
    }

    pub fn active_category(&self) -> &str {
        self.gallery.active_category()
    }

    pub fn is_triggered(&self, id: TargetId) -> Option<bool> {
        self.reveal.is_triggered(id)
    }
}
