//! Face region extraction for raw camera frame buffers.
//!
//! A face detector hands this crate a frame it already ran inference on plus
//! the bounding boxes it found; the crate returns one standalone,
//! encoder-ready buffer per face. The downstream JPEG encoder only accepts
//! 4:2:0 buffers with dimensions that are multiples of 16, which drives the
//! two non-obvious pieces here:
//!
//! - `region`: rounds a requested rectangle to encoder-compatible dimensions
//!   (`round16`) with a deliberate single-step boundary correction.
//! - `crop`: colorspace-dispatched extractors that re-pack a region as a
//!   4:2:0 container. Planar sources keep their two-band chroma packing;
//!   semi-planar and luma-only sources get neutral chroma.
//!
//! The camera, the detection engine, HTTP routing, and the encoder itself are
//! external collaborators. This crate is a pure transform from
//! `(ImageSource, Region)` to a new `ImageSource`: no I/O, no retained
//! references, no state between calls. Concurrent calls on independent
//! buffers are safe by construction; callers sharing one source across
//! threads are responsible for keeping it stable for the duration of a call.
//!
//! # Module Structure
//!
//! - `source`: owned image buffer descriptors (`ImageSource`, `Colorspace`)
//! - `region`: crop rectangles and encoder alignment
//! - `crop`: the colorspace dispatcher and per-layout extractors
//! - `pipeline`: detection-batch driver with skip-on-failure semantics
//! - `config`: file + environment configuration for the demo pipeline

pub mod config;
pub mod crop;
pub mod pipeline;
pub mod region;
pub mod source;

pub use crop::{crop_region, CropError, NEUTRAL_CHROMA};
pub use pipeline::{extract_face_regions, FaceBox};
pub use region::{round16, Region};
pub use source::{Colorspace, ImageSource};
