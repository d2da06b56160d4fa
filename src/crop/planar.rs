//! Planar 4:2:0 (I420-family) region extraction.
//!
//! The camera stack delivers these frames with an unusual chroma packing:
//! below the luma plane, each chroma plane is stored as two half-height bands
//! subsampled vertically by four, addressed through the full-width stride.
//! The V bands sit half a source width to the right of the U bands. The crop
//! reproduces that packing in the destination so the output is self-similar
//! to its source and round-trips through the same consumers.

use crate::region::Region;
use crate::source::{Colorspace, ImageSource};

use super::{copy_luma_plane, require_fits, CropError};

pub(super) fn crop(source: &ImageSource, region: &Region) -> Result<ImageSource, CropError> {
    let src = source.consistent_bytes()?;
    require_fits(region, source)?;

    let src_width = source.width() as usize;
    let src_height = source.height() as usize;
    let origin_x = region.x as usize;
    let origin_y = region.y as usize;
    let crop_width = region.width as usize;
    let crop_height = region.height as usize;

    let mut out = vec![0u8; crop_width * crop_height * 3 / 2];
    copy_luma_plane(
        src, src_width, origin_x, origin_y, &mut out, crop_width, crop_height,
    );

    // Band row bases in the source, quarter-scaled vertically. `band2_row`
    // is src_height * 1.25, truncated.
    let half_x = origin_x / 2;
    let band1_row = src_height + origin_y / 4;
    let band2_row = src_height * 5 / 4 + origin_y / 4;
    let v_offset = src_width / 2;

    let uv_width = crop_width / 2;
    let uv_height = crop_height / 4;

    for y in 0..uv_height {
        for x in 0..uv_width {
            // U, band 1
            out[(crop_height + y) * crop_width + x] =
                src[(band1_row + y) * src_width + half_x + x];
            // U, band 2
            out[(crop_height + uv_height + y) * crop_width + x] =
                src[(band2_row + y) * src_width + half_x + x];
            // V, band 1
            out[(crop_height + y) * crop_width + uv_width + x] =
                src[(band1_row + y) * src_width + half_x + v_offset + x];
            // V, band 2
            out[(crop_height + uv_height + y) * crop_width + uv_width + x] =
                src[(band2_row + y) * src_width + half_x + v_offset + x];
        }
    }

    Ok(ImageSource::from_raw_parts(
        out,
        region.width,
        region.height,
        Colorspace::Planar420,
    ))
}
