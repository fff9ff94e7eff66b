#![allow(dead_code)]
//! Batch image sources.
//!
//! The gallery asks its source for one page at a time and gets a ticket back:
//! either the settle is deferred onto the engine's own timer wheel (the
//! simulated source, default) or the host owns the request and reports back
//! later with a `Signal::FetchSettled`. Either way the pagination guard
//! clears only when the settle arrives.

use serde::{Deserialize, Serialize};

use crate::data::GalleryImage;

/// How a batch request settled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FetchOutcome {
    Batch(Vec<GalleryImage>),
    Failed { reason: String },
}

/// What `begin_fetch` hands the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchTicket {
    /// Settles after `latency_ms` of engine time with a precomputed outcome.
    Deferred {
        latency_ms: f64,
        outcome: FetchOutcome,
    },
    /// The host performs the request and must deliver `Signal::FetchSettled`.
    Host,
}

/// A pageable image backend. Swappable; the simulation is the stand-in used
/// in production until a real endpoint exists.
pub trait ImageSource {
    fn begin_fetch(&mut self, page: u32) -> FetchTicket;
}

/// Deterministic stand-in for a real backend: stable URLs derived from the
/// page number, fixed batch size, fixed latency.
#[derive(Clone, Debug)]
pub struct SimulatedImageSource {
    pub batch_size: usize,
    pub latency_ms: f64,
    /// Pages that settle as failures, for exercising the retry path.
    pub failing_pages: Vec<u32>,
}

impl SimulatedImageSource {
    pub fn new(batch_size: usize, latency_ms: f64) -> Self {
        Self {
            batch_size,
            latency_ms,
            failing_pages: Vec::new(),
        }
    }

    pub fn failing(mut self, pages: &[u32]) -> Self {
        self.failing_pages.extend_from_slice(pages);
        self
    }
}

impl ImageSource for SimulatedImageSource {
    fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        let outcome = if self.failing_pages.contains(&page) {
            FetchOutcome::Failed {
                reason: format!("simulated network error on page {page}"),
            }
        } else {
            let mut records = Vec::with_capacity(self.batch_size);
            for i in 0..self.batch_size {
                let photo = 1_000_000 + page as usize * 100 + i;
                records.push(GalleryImage {
                    source_url: format!(
                        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=400&h=300"
                    ),
                    alt_text: format!("Gallery image {page}-{}", i + 1),
                    category: "weddings".to_string(),
                });
            }
            FetchOutcome::Batch(records)
        };
        FetchTicket::Deferred {
            latency_ms: self.latency_ms,
            outcome,
        }
    }
}

/// Source for hosts that fetch for real; every request defers to the host.
#[derive(Default, Debug)]
pub struct HostImageSource;

impl ImageSource for HostImageSource {
    fn begin_fetch(&mut self, _page: u32) -> FetchTicket {
        FetchTicket::Host
    }
}
