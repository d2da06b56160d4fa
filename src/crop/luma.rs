//! Luma-only (Y800-family) region extraction.
//!
//! The encoder only accepts color-plane-bearing formats, so luma-only sources
//! are promoted to a planar 4:2:0 container with synthesized neutral chroma
//! instead of growing a fourth encoder path. The synthesized planes are
//! written through the same four-quadrant band layout the planar extractor
//! emits.

use crate::region::Region;
use crate::source::{Colorspace, ImageSource};

use super::{copy_luma_plane, require_fits, CropError, NEUTRAL_CHROMA};

pub(super) fn crop(source: &ImageSource, region: &Region) -> Result<ImageSource, CropError> {
    let src = source.consistent_bytes()?;
    require_fits(region, source)?;

    let src_width = source.width() as usize;
    let origin_x = region.x as usize;
    let origin_y = region.y as usize;
    let crop_width = region.width as usize;
    let crop_height = region.height as usize;

    let mut out = vec![0u8; crop_width * crop_height * 3 / 2];
    copy_luma_plane(
        src, src_width, origin_x, origin_y, &mut out, crop_width, crop_height,
    );

    let uv_width = crop_width / 2;
    let uv_height = crop_height / 4;

    for y in 0..uv_height {
        for x in 0..uv_width {
            out[(crop_height + y) * crop_width + x] = NEUTRAL_CHROMA;
            out[(crop_height + uv_height + y) * crop_width + x] = NEUTRAL_CHROMA;
            out[(crop_height + y) * crop_width + uv_width + x] = NEUTRAL_CHROMA;
            out[(crop_height + uv_height + y) * crop_width + uv_width + x] = NEUTRAL_CHROMA;
        }
    }

    Ok(ImageSource::from_raw_parts(
        out,
        region.width,
        region.height,
        Colorspace::Planar420,
    ))
}

#[cfg(test)]
mod tests {
    use crate::crop::{crop_region, NEUTRAL_CHROMA};
    use crate::region::Region;
    use crate::source::{Colorspace, ImageSource};

    #[test]
    fn luma_sources_promote_to_planar_with_neutral_chroma() {
        let data: Vec<u8> = (0..32 * 32).map(|i| (i % 251) as u8).collect();
        let source =
            ImageSource::from_buffer(data, 32, 32, Colorspace::LumaOnly).expect("test source");

        let out = crop_region(&source, Region::new(8, 8, 16, 16)).expect("crop");

        assert_eq!(out.colorspace(), Colorspace::Planar420);
        assert_eq!(out.bytes().len(), 16 * 16 * 3 / 2);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(
                    out.bytes()[y * 16 + x],
                    source.bytes()[(y + 8) * 32 + (x + 8)],
                );
            }
        }
        assert!(out.bytes()[16 * 16..].iter().all(|&b| b == NEUTRAL_CHROMA));
    }
}
