//! Semi-planar 4:2:0 (NV12-family) region extraction.
//!
//! Only the luma plane is cropped. The source's interleaved chroma is not
//! resampled; the output chroma region is written as neutral mid-gray, which
//! keeps the buffer format-valid for the encoder at the cost of color.
//! Downstream consumers depend on this byte-for-byte, so it must stay a
//! gray crop rather than grow chroma resampling.

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

    let luma_len = crop_width * crop_height;
    let mut out = vec![0u8; luma_len * 3 / 2];
    copy_luma_plane(
        src, src_width, origin_x, origin_y, &mut out, crop_width, crop_height,
    );

    for byte in &mut out[luma_len..] {
        *byte = NEUTRAL_CHROMA;
    }

    Ok(ImageSource::from_raw_parts(
        out,
        region.width,
        region.height,
        Colorspace::SemiPlanar420,
    ))
}

#[cfg(test)]
mod tests {
    use crate::crop::{crop_region, NEUTRAL_CHROMA};
    use crate::region::Region;
    use crate::source::{Colorspace, ImageSource};

    #[test]
    fn chroma_region_is_constant_neutral() {
        let len = 32 * 32 * 3 / 2;
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let source =
            ImageSource::from_buffer(data, 32, 32, Colorspace::SemiPlanar420).expect("test source");

        let out = crop_region(&source, Region::new(8, 8, 16, 16)).expect("crop");

        assert_eq!(out.colorspace(), Colorspace::SemiPlanar420);
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
