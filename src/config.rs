use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::Colorspace;

const DEFAULT_SOURCE_WIDTH: u32 = 640;
const DEFAULT_SOURCE_HEIGHT: u32 = 480;
const DEFAULT_COLORSPACE: Colorspace = Colorspace::Planar420;
const DEFAULT_OUT_DIR: &str = "face_regions_out";
const DEFAULT_MIN_FACE_PX: u32 = 32;

#[derive(Debug, Deserialize, Default)]
struct PipelineConfigFile {
    source: Option<SourceConfigFile>,
    out_dir: Option<PathBuf>,
    min_face_px: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    colorspace: Option<String>,
}

/// Settings for the demo pipeline: what the synthetic (or bridged) camera
/// frame looks like and where extracted regions land.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source: SourceSettings,
    pub out_dir: PathBuf,
    /// Face boxes narrower or shorter than this are not worth encoding.
    pub min_face_px: u32,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub width: u32,
    pub height: u32,
    pub colorspace: Colorspace,
}

impl PipelineConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("FACE_REGION_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: PipelineConfigFile) -> Result<Self> {
        let source = SourceSettings {
            width: file
                .source
                .as_ref()
                .and_then(|source| source.width)
                .unwrap_or(DEFAULT_SOURCE_WIDTH),
            height: file
                .source
                .as_ref()
                .and_then(|source| source.height)
                .unwrap_or(DEFAULT_SOURCE_HEIGHT),
            colorspace: match file.source.and_then(|source| source.colorspace) {
                Some(name) => parse_colorspace(&name)?,
                None => DEFAULT_COLORSPACE,
            },
        };
        let out_dir = file
            .out_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        let min_face_px = file.min_face_px.unwrap_or(DEFAULT_MIN_FACE_PX);
        Ok(Self {
            source,
            out_dir,
            min_face_px,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("FACE_REGION_SOURCE_WIDTH") {
            self.source.width = width
                .parse()
                .map_err(|_| anyhow!("FACE_REGION_SOURCE_WIDTH must be an integer pixel count"))?;
        }
        if let Ok(height) = std::env::var("FACE_REGION_SOURCE_HEIGHT") {
            self.source.height = height
                .parse()
                .map_err(|_| anyhow!("FACE_REGION_SOURCE_HEIGHT must be an integer pixel count"))?;
        }
        if let Ok(name) = std::env::var("FACE_REGION_COLORSPACE") {
            if !name.trim().is_empty() {
                self.source.colorspace = parse_colorspace(&name)?;
            }
        }
        if let Ok(dir) = std::env::var("FACE_REGION_OUT_DIR") {
            if !dir.trim().is_empty() {
                self.out_dir = PathBuf::from(dir);
            }
        }
        if let Ok(min_face) = std::env::var("FACE_REGION_MIN_FACE") {
            self.min_face_px = min_face
                .parse()
                .map_err(|_| anyhow!("FACE_REGION_MIN_FACE must be an integer pixel count"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.source.width == 0 || self.source.height == 0 {
            return Err(anyhow!("source dimensions must be greater than zero"));
        }
        match self.source.colorspace {
            Colorspace::Planar420 | Colorspace::SemiPlanar420 => {
                // 4:2:0 chroma needs even widths; the two-band packing also
                // needs heights divisible by four.
                if self.source.width % 2 != 0 || self.source.height % 4 != 0 {
                    return Err(anyhow!(
                        "4:2:0 sources need an even width and a height divisible by 4"
                    ));
                }
            }
            _ => {}
        }
        if self.min_face_px == 0 {
            return Err(anyhow!("min_face_px must be greater than zero"));
        }
        if self.min_face_px > self.source.width.min(self.source.height) {
            return Err(anyhow!("min_face_px cannot exceed the source extent"));
        }
        Ok(())
    }
}

/// Parse a colorspace name from config or CLI input.
///
/// Accepts the crate's names and the common FourCC aliases.
pub fn parse_colorspace(name: &str) -> Result<Colorspace> {
    match name.to_lowercase().as_str() {
        "planar420" | "i420" => Ok(Colorspace::Planar420),
        "semiplanar420" | "nv12" => Ok(Colorspace::SemiPlanar420),
        "lumaonly" | "y800" => Ok(Colorspace::LumaOnly),
        other => Err(anyhow!("unsupported colorspace name: {}", other)),
    }
}

fn read_config_file(path: &Path) -> Result<PipelineConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
