use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Number of numbered estimation illustrations (1.jpeg .. 8.jpeg).
pub const ESTIMATION_IMAGE_COUNT: u8 = 8;

/// The fixed catalog of optional image assets. Anything outside it is not
/// served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetId {
    Logo,
    Infographic,
    /// 1-based index into the estimation illustration sequence.
    Estimation(u8),
}

impl AssetId {
    pub fn file_name(&self) -> String {
        match self {
            AssetId::Logo => "logo.png".to_string(),
            AssetId::Infographic => "infographic.png".to_string(),
            AssetId::Estimation(n) => format!("{}.jpeg", n),
        }
    }

    /// Map a requested file name back into the catalog. Returns `None` for
    /// anything that is not one of the known assets.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "logo.png" => Some(AssetId::Logo),
            "infographic.png" => Some(AssetId::Infographic),
            _ => {
                let n: u8 = name.strip_suffix(".jpeg")?.parse().ok()?;
                if (1..=ESTIMATION_IMAGE_COUNT).contains(&n) {
                    Some(AssetId::Estimation(n))
                } else {
                    None
                }
            }
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// An asset read into memory, ready to serve.
#[derive(Clone, Debug)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// The one existence-check helper every optional panel goes through. A
/// missing or unreadable file is `None`; it never fails the application.
pub fn try_load_asset(path: &Path) -> Option<Asset> {
    if !path.is_file() {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(Asset {
            bytes,
            content_type: content_type_for(path),
        }),
        Err(e) => {
            log::warn!("asset {} exists but is unreadable: {}", path.display(), e);
            None
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpeg") | Some("jpg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Per-asset availability, checked independently so one missing file only
/// ever blanks its own panel. The page uses this to decide image vs.
/// placeholder message.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetManifest {
    pub logo: bool,
    pub infographic: bool,
    /// File names of the estimation images that are present, in sequence
    /// order.
    pub estimation: Vec<String>,
}

pub fn manifest(dir: &Path) -> AssetManifest {
    let estimation = (1..=ESTIMATION_IMAGE_COUNT)
        .map(AssetId::Estimation)
        .filter(|id| id.path_in(dir).is_file())
        .map(|id| id.file_name())
        .collect();

    AssetManifest {
        logo: AssetId::Logo.path_in(dir).is_file(),
        infographic: AssetId::Infographic.path_in(dir).is_file(),
        estimation,
    }
}
