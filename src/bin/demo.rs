//! demo - synthetic end-to-end run of the face region pipeline

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

use face_region::config::{parse_colorspace, PipelineConfig, SourceSettings};
use face_region::{extract_face_regions, Colorspace, FaceBox, ImageSource};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source frame width in pixels (overrides config).
    #[arg(long)]
    width: Option<u32>,
    /// Source frame height in pixels (overrides config).
    #[arg(long)]
    height: Option<u32>,
    /// Source colorspace: planar420 | semiplanar420 | lumaonly (overrides config).
    #[arg(long)]
    colorspace: Option<String>,
    /// Number of synthetic face boxes to place.
    #[arg(long, default_value_t = 3)]
    faces: u32,
    /// Output directory for extracted regions (overrides config).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Deterministic seed for the synthetic frame.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = PipelineConfig::load()?;
    if let Some(width) = args.width {
        cfg.source.width = width;
    }
    if let Some(height) = args.height {
        cfg.source.height = height;
    }
    if let Some(name) = args.colorspace.as_deref() {
        cfg.source.colorspace = parse_colorspace(name)?;
    }
    if let Some(out) = args.out {
        cfg.out_dir = out;
    }

    let source = synthetic_source(&cfg.source, args.seed)?;
    let faces = synthetic_faces(
        cfg.source.width,
        cfg.source.height,
        args.faces,
        cfg.min_face_px,
    );

    log::info!(
        "extracting {} face regions from a {}x{} {} frame",
        faces.len(),
        source.width(),
        source.height(),
        source.colorspace()
    );
    let regions = extract_face_regions(&source, &faces);
    log::info!("{} of {} regions extracted", regions.len(), faces.len());

    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("creating output directory {}", cfg.out_dir.display()))?;
    for (index, region) in regions.iter().enumerate() {
        let path = cfg.out_dir.join(format!(
            "face_{}_{}x{}.{}",
            index,
            region.width(),
            region.height(),
            file_extension(region.colorspace())
        ));
        fs::write(&path, region.bytes())
            .with_context(|| format!("writing region to {}", path.display()))?;
        log::info!("wrote {} ({} bytes)", path.display(), region.bytes().len());
    }

    Ok(())
}

/// Build a gradient-plus-noise frame in the requested layout.
fn synthetic_source(settings: &SourceSettings, seed: Option<u64>) -> Result<ImageSource> {
    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let width = settings.width as usize;
    let height = settings.height as usize;
    let luma_len = width * height;
    let total_len = match settings.colorspace {
        Colorspace::LumaOnly => luma_len,
        _ => luma_len * 3 / 2,
    };

    let mut data = vec![0u8; total_len];
    for y in 0..height {
        for x in 0..width {
            let base = ((x + y) & 0xff) as u8;
            data[y * width + x] = base ^ (rng.gen::<u8>() & 0x0f);
        }
    }
    for byte in &mut data[luma_len..] {
        *byte = 96u8.wrapping_add(rng.gen::<u8>() & 0x3f);
    }

    Ok(ImageSource::from_buffer(
        data,
        settings.width,
        settings.height,
        settings.colorspace,
    )?)
}

/// Spread stub detections diagonally across the frame. Boxes that land too
/// close to the edges exercise the pipeline's skip path, which is the point.
fn synthetic_faces(width: u32, height: u32, count: u32, min_face_px: u32) -> Vec<FaceBox> {
    let mut faces = Vec::new();
    if count == 0 {
        return faces;
    }
    let size = (width.min(height) / 4).max(min_face_px);
    for index in 0..count {
        faces.push(FaceBox {
            x: (index + 1) * width / (count + 2),
            y: (index + 1) * height / (count + 2),
            width: size,
            height: size,
            confidence: 0.9,
        });
    }
    faces
}

fn file_extension(colorspace: Colorspace) -> &'static str {
    match colorspace {
        Colorspace::Planar420 => "i420",
        Colorspace::SemiPlanar420 => "nv12",
        Colorspace::LumaOnly => "y800",
        _ => "raw",
    }
}
