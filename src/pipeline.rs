//! Face-box driven region extraction.
//!
//! The detection engine reports face bounding boxes against the frame it was
//! fed. This module turns each box into an encoder-aligned region and a
//! standalone buffer the recognition stage can ingest on its own. A box that
//! cannot be cropped is skipped so the rest of the batch still goes through;
//! retrying on a later frame is the detector's decision, not ours.

use serde::{Deserialize, Serialize};

use crate::crop::crop_region;
use crate::region::Region;
use crate::source::ImageSource;

/// A detected face bounding box, in source pixel coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Detector confidence, 0..=1.
    pub confidence: f32,
}

/// Cut one standalone region buffer per detected face.
///
/// Each box is aligned for the encoder first, then cropped. Failures are
/// logged and skipped; an empty result is valid.
pub fn extract_face_regions(source: &ImageSource, faces: &[FaceBox]) -> Vec<ImageSource> {
    let mut regions = Vec::with_capacity(faces.len());
    for (index, face) in faces.iter().enumerate() {
        log::debug!(
            "face[{}]: [{},{}] [{}x{}] ({:.2})",
            index,
            face.x,
            face.y,
            face.width,
            face.height,
            face.confidence
        );

        let aligned = Region::new(face.x, face.y, face.width, face.height)
            .aligned_for_encoder(source.width(), source.height());
        match crop_region(source, aligned) {
            Ok(region) => regions.push(region),
            Err(err) => log::warn!("skipping face[{}]: {}", index, err),
        }
    }
    regions
}
