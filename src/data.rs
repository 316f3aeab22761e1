use serde::Deserialize;

pub const APP_ID: &str = "com.toasterrepair.Videomap";

/// Bounds of the integer zoom level shared by the map and its controls.
pub const MIN_ZOOM: u32 = 1;
pub const MAX_ZOOM: u32 = 20;

/// Descriptions in the country panel are cut to this many characters.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VideoRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub countries: Vec<String>,
}

/// An RGB colour with cairo-style components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb(
            ((hex >> 16) & 0xff) as f64 / 255.0,
            ((hex >> 8) & 0xff) as f64 / 255.0,
            (hex & 0xff) as f64 / 255.0,
        )
    }
}

pub const FILL_SELECTED: Rgb = Rgb::from_hex(0xEE4422);
pub const FILL_PRESSED: Rgb = Rgb::from_hex(0xEE4422);
pub const FILL_WITH_VIDEOS: Rgb = Rgb::from_hex(0x1976D2);
pub const FILL_WITH_VIDEOS_HOVER: Rgb = Rgb::from_hex(0x87CEEB);
pub const FILL_DEFAULT: Rgb = Rgb::from_hex(0xD6D6DA);
pub const FILL_DEFAULT_HOVER: Rgb = Rgb::from_hex(0xFF5533);
pub const BORDER: Rgb = Rgb::from_hex(0xFFFFFF);
pub const OCEAN: Rgb = Rgb::from_hex(0xF5F9FC);
