//! Owned image buffer descriptors.
//!
//! An `ImageSource` is the unit the rest of the crate works on: one contiguous
//! byte buffer plus the dimensions and colorspace tag needed to interpret it.
//! The camera/vision layer that produces frames keeps its own handle types;
//! at this boundary everything is an owned, caller-passed value. No handle is
//! shared or reused across calls.

use crate::crop::CropError;

/// Pixel layout of an [`ImageSource`] buffer.
///
/// `Other` stands in for every tag this crate has no extractor for. Supporting
/// a new layout means adding an extractor module and a variant here, not
/// widening an existing match arm.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colorspace {
    /// One full-resolution luma plane followed by two chroma planes
    /// (I420 family).
    Planar420,
    /// One full-resolution luma plane followed by interleaved U/V samples
    /// at half resolution (NV12 family).
    SemiPlanar420,
    /// Single 8-bit luma plane, no chroma (Y800 family).
    LumaOnly,
    /// Any layout without an extractor.
    Other,
}

impl Colorspace {
    /// Expected buffer length for a `width` x `height` frame, or `None` when
    /// the layout is unknown to this crate.
    fn expected_len(self, width: u32, height: u32) -> Option<usize> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        match self {
            Colorspace::Planar420 | Colorspace::SemiPlanar420 => {
                pixels.checked_mul(3).map(|n| n / 2)
            }
            Colorspace::LumaOnly => Some(pixels),
            Colorspace::Other => None,
        }
    }
}

impl std::fmt::Display for Colorspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Colorspace::Planar420 => "planar420",
            Colorspace::SemiPlanar420 => "semiplanar420",
            Colorspace::LumaOnly => "lumaonly",
            Colorspace::Other => "other",
        };
        f.write_str(name)
    }
}

/// An owned image buffer with its interpretation metadata.
///
/// Construction through [`ImageSource::from_buffer`] enforces the
/// length/dimension invariant up front. Buffers handed over verbatim from an
/// external SDK can use [`ImageSource::from_raw_parts`]; the invariant is then
/// checked when the extractors first read the buffer.
pub struct ImageSource {
    data: Vec<u8>,
    width: u32,
    height: u32,
    colorspace: Colorspace,
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSource")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colorspace", &self.colorspace)
            .field("len", &self.data.len())
            .finish()
    }
}

impl ImageSource {
    /// Build a descriptor, validating that the buffer length is consistent
    /// with the dimensions and colorspace tag. Inconsistency is a caller
    /// precondition failure, not something the extractors recover from.
    pub fn from_buffer(
        data: Vec<u8>,
        width: u32,
        height: u32,
        colorspace: Colorspace,
    ) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::InvalidArgument(
                "source dimensions must be non-zero",
            ));
        }
        if let Some(expected) = colorspace.expected_len(width, height) {
            if data.len() != expected {
                return Err(CropError::InvalidArgument(
                    "source buffer length inconsistent with dimensions",
                ));
            }
        }
        Ok(Self {
            data,
            width,
            height,
            colorspace,
        })
    }

    /// Build a descriptor without validating the buffer length. Extractors
    /// re-check consistency on first read and surface a
    /// [`CropError::SourceQuery`] if the metadata was wrong.
    pub fn from_raw_parts(data: Vec<u8>, width: u32, height: u32, colorspace: Colorspace) -> Self {
        Self {
            data,
            width,
            height,
            colorspace,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn colorspace(&self) -> Colorspace {
        self.colorspace
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Buffer access for the extractors. Verifies the layout invariant that
    /// `from_raw_parts` callers may have skipped.
    pub(crate) fn consistent_bytes(&self) -> Result<&[u8], CropError> {
        let expected = self
            .colorspace
            .expected_len(self.width, self.height)
            .ok_or(CropError::SourceQuery("no known plane layout for colorspace"))?;
        if self.data.len() != expected {
            return Err(CropError::SourceQuery(
                "source buffer length inconsistent with dimensions",
            ));
        }
        Ok(&self.data)
    }
}
