// Paper geometry tables and scanimage area arguments

use std::fmt;

use crate::error::{Result, ScanDocError};

/// A scan region in millimeters: width, height, and offsets from the
/// top-left corner of the scan bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub w: u32,
    pub h: u32,
    pub x: u32,
    pub y: u32,
}

impl Geometry {
    pub const fn new(w: u32, h: u32) -> Self {
        Geometry { w, h, x: 0, y: 0 }
    }

    pub const fn with_offset(w: u32, h: u32, x: u32, y: u32) -> Self {
        Geometry { w, h, x, y }
    }

    /// Whether this region fully contains `other`.
    pub fn can_cover(&self, other: &Geometry) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.h + self.y >= other.h + other.y
            && self.w + self.x >= other.w + other.x
    }

    /// Render this geometry as `scanimage` area arguments:
    /// `-x W -y H`, plus `-l X` / `-t Y` for non-zero offsets.
    pub fn scan_args(&self) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            self.w.to_string(),
            "-y".to_string(),
            self.h.to_string(),
        ];
        if self.x != 0 {
            args.push("-l".to_string());
            args.push(self.x.to_string());
        }
        if self.y != 0 {
            args.push("-t".to_string());
            args.push(self.y.to_string());
        }
        args
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x == 0 && self.y == 0 {
            write!(f, "{}x{}", self.w, self.h)
        } else {
            write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
        }
    }
}

/// Look up a paper size by name. Covers the ISO A/B/C series and the
/// common North American sizes. Dimensions in millimeters, portrait
/// orientation where the series defines one.
pub fn lookup(name: &str) -> Option<Geometry> {
    let g = match name {
        // ISO paper sizes:
        "a0" => Geometry::new(841, 1189),
        "a1" => Geometry::new(594, 841),
        "a2" => Geometry::new(420, 594),
        "a3" => Geometry::new(297, 420),
        "a4" => Geometry::new(210, 297),
        "a5" => Geometry::new(148, 210),
        "a6" => Geometry::new(105, 148),
        "a7" => Geometry::new(74, 105),
        "a8" => Geometry::new(52, 74),
        "a9" => Geometry::new(37, 52),
        "a10" => Geometry::new(26, 37),
        "b0" => Geometry::new(1414, 1000),
        "b1" => Geometry::new(1000, 707),
        "b1+" => Geometry::new(1020, 720),
        "b2" => Geometry::new(707, 500),
        "b2+" => Geometry::new(720, 520),
        "b3" => Geometry::new(500, 353),
        "b4" => Geometry::new(353, 250),
        "b5" => Geometry::new(250, 176),
        "b6" => Geometry::new(176, 125),
        "b7" => Geometry::new(125, 88),
        "b8" => Geometry::new(88, 62),
        "b9" => Geometry::new(62, 44),
        "b10" => Geometry::new(44, 31),
        "c0" => Geometry::new(1297, 917),
        "c1" => Geometry::new(917, 648),
        "c2" => Geometry::new(648, 458),
        "c3" => Geometry::new(458, 324),
        "c4" => Geometry::new(324, 229),
        "c5" => Geometry::new(229, 162),
        "c6" => Geometry::new(162, 114),
        "c7" => Geometry::new(114, 81),
        "c8" => Geometry::new(81, 57),
        "c9" => Geometry::new(57, 40),
        "c10" => Geometry::new(40, 28),

        // North American paper sizes:
        "ledger" => Geometry::new(432, 279),
        "legal" => Geometry::new(216, 356),
        "letter" | "ltr" => Geometry::new(216, 279),
        "tabloid" => Geometry::new(279, 432),

        _ => return None,
    };
    Some(g)
}

/// Resolve a paper size name and verify the scanner's scannable area
/// covers it.
pub fn resolve(name: &str, scan_area: &Geometry) -> Result<Geometry> {
    let paper = lookup(name)
        .ok_or_else(|| ScanDocError::config(format!("Unknown paper size '{name}'")))?;

    if !scan_area.can_cover(&paper) {
        return Err(ScanDocError::config(format!(
            "Paper size '{name}' ({paper}) exceeds the scannable area ({scan_area})"
        )));
    }

    Ok(paper)
}
