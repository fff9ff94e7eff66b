//! Gallery manifest parsing.

use serde::Deserialize;

use crate::data::GalleryImage;
use crate::error::{Result, VitrineError};

/// Public API: parse a gallery manifest into the startup image list.
///
/// Shape: `{ "images": [ { "src", "alt", "category" } ] }`, or a bare array
/// of the same records.
///
/// Notes:
/// - `alt` defaults to the empty string; `category` defaults to "" and then
///   matches only the "all" filter.
/// - A record with an empty `src` rejects the whole manifest; dropping
///   pictures silently would be harder to notice than a loud error.
pub fn parse_gallery_manifest_json(s: &str) -> Result<Vec<GalleryImage>> {
    let doc: ManifestDoc = serde_json::from_str(s)?;
    let images = match doc {
        ManifestDoc::Keyed { images } => images,
        ManifestDoc::Bare(images) => images,
    };
    for (i, image) in images.iter().enumerate() {
        if image.source_url.trim().is_empty() {
            return Err(VitrineError::ManifestRejected {
                reason: format!("image {i} has an empty src"),
            });
        }
    }
    Ok(images)
}

// ----- JSON schema (serde) -----

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestDoc {
    Keyed {
        #[serde(default)]
        images: Vec<GalleryImage>,
    },
    Bare(Vec<GalleryImage>),
}
