//! Colorspace-dispatched region extraction.
//!
//! `crop_region` inspects the source's colorspace tag and hands the work to
//! the matching extractor. Every extractor emits a standalone 4:2:0 container
//! of `width * height * 3 / 2` bytes: planar sources keep their two-band
//! chroma packing, semi-planar and luma-only sources get neutral chroma
//! (see the per-module docs for the exact layouts).
//!
//! The extractors are pure transforms. They allocate one output buffer, never
//! retain a reference to the source, and report every bad input as a typed
//! error rather than panicking.

mod luma;
mod planar;
mod semi_planar;

use std::fmt;

use crate::region::Region;
use crate::source::{Colorspace, ImageSource};

/// Mid-gray sample written wherever chroma is synthesized rather than cropped.
pub const NEUTRAL_CHROMA: u8 = 127;

/// Failure modes of the region extractors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CropError {
    /// Zero crop extent, inconsistent constructor input, or a region that
    /// does not fit inside the source.
    InvalidArgument(&'static str),
    /// The source carries a tag no extractor exists for.
    UnsupportedColorspace(Colorspace),
    /// The source descriptor's planes cannot be read consistently.
    SourceQuery(&'static str),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::InvalidArgument(what) => write!(f, "invalid argument: {}", what),
            CropError::UnsupportedColorspace(colorspace) => {
                write!(f, "unsupported colorspace: {}", colorspace)
            }
            CropError::SourceQuery(what) => write!(f, "source query failed: {}", what),
        }
    }
}

impl std::error::Error for CropError {}

/// Extract `region` from `source` into a new, independently owned buffer.
///
/// The region is expected to have gone through
/// [`Region::aligned_for_encoder`](crate::region::Region::aligned_for_encoder)
/// first; this function does not align, it only refuses regions that cannot
/// be cut safely.
pub fn crop_region(source: &ImageSource, region: Region) -> Result<ImageSource, CropError> {
    if region.width == 0 || region.height == 0 {
        return Err(CropError::InvalidArgument(
            "crop region must have non-zero extent",
        ));
    }

    match source.colorspace() {
        Colorspace::Planar420 => planar::crop(source, &region),
        Colorspace::SemiPlanar420 => semi_planar::crop(source, &region),
        Colorspace::LumaOnly => luma::crop(source, &region),
        // No extractor exists for other tags. Supporting one is a new module
        // plus a new arm here, not a change to the existing dispatch.
        Colorspace::Other => Err(CropError::UnsupportedColorspace(source.colorspace())),
    }
}

/// Refuse regions whose luma extent reaches past the source. The aligner can
/// emit such regions for rectangles hugging two edges; they fail here instead
/// of reading past the buffer.
fn require_fits(region: &Region, source: &ImageSource) -> Result<(), CropError> {
    let right = region.x as u64 + region.width as u64;
    let bottom = region.y as u64 + region.height as u64;
    if right > source.width() as u64 || bottom > source.height() as u64 {
        return Err(CropError::InvalidArgument(
            "crop region exceeds source bounds",
        ));
    }
    Ok(())
}

/// Copy the cropped luma plane row by row. All three extractors share this.
fn copy_luma_plane(
    src: &[u8],
    src_width: usize,
    origin_x: usize,
    origin_y: usize,
    out: &mut [u8],
    crop_width: usize,
    crop_height: usize,
) {
    for y in 0..crop_height {
        let src_row = (y + origin_y) * src_width + origin_x;
        out[y * crop_width..(y + 1) * crop_width]
            .copy_from_slice(&src[src_row..src_row + crop_width]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar_source(width: u32, height: u32) -> ImageSource {
        let len = (width * height * 3 / 2) as usize;
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        ImageSource::from_buffer(data, width, height, Colorspace::Planar420)
            .expect("consistent test source")
    }

    #[test]
    fn zero_extent_regions_are_rejected() {
        let source = planar_source(64, 64);
        let err = crop_region(&source, Region::new(0, 0, 0, 16)).unwrap_err();
        assert!(matches!(err, CropError::InvalidArgument(_)));
    }

    #[test]
    fn unsupported_colorspace_is_rejected() {
        let source = ImageSource::from_buffer(vec![0u8; 64], 8, 8, Colorspace::Other)
            .expect("opaque source");
        let err = crop_region(&source, Region::new(0, 0, 16, 16)).unwrap_err();
        assert_eq!(err, CropError::UnsupportedColorspace(Colorspace::Other));
    }

    #[test]
    fn out_of_bounds_regions_error_instead_of_panicking() {
        let source = planar_source(64, 64);
        let err = crop_region(&source, Region::new(50, 10, 32, 32)).unwrap_err();
        assert!(matches!(err, CropError::InvalidArgument(_)));
    }

    #[test]
    fn inconsistent_raw_parts_surface_as_source_query() {
        let source = ImageSource::from_raw_parts(vec![0u8; 100], 64, 64, Colorspace::Planar420);
        let err = crop_region(&source, Region::new(0, 0, 16, 16)).unwrap_err();
        assert!(matches!(err, CropError::SourceQuery(_)));
    }
}
