// Layout configuration
//
// Coordinates follow PDF conventions: millimetres, origin at the bottom-left
// corner of the page.

use crate::error::{AppError, Result};
use clap::ValueEnum;

/// Millimetres per PostScript point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// A4 dimensions in mm
const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

/// US Letter dimensions in mm
const LETTER_WIDTH_MM: f32 = 215.9;
const LETTER_HEIGHT_MM: f32 = 279.4;

/// Outer margin and the gap between tiles
const MARGIN_MM: f32 = 20.0;
const GUTTER_MM: f32 = 20.0;

/// QR code size
const TILE_SIZE_MM: f32 = 80.0;

/// Space reserved under each QR code for its label
const LABEL_BAND_MM: f32 = 10.0;

/// Label font size and baseline drop below the tile, in points
const LABEL_FONT_SIZE: f32 = 10.0;
const LABEL_OFFSET_PT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// (width, height) in mm
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (A4_WIDTH_MM, A4_HEIGHT_MM),
            PageSize::Letter => (LETTER_WIDTH_MM, LETTER_HEIGHT_MM),
        }
    }
}

/// Fixed geometry for one run.
///
/// The margin applies to the left, top and bottom edges. A row keeps
/// accepting tiles while the next tile's right edge stays on the page, so on
/// A4 the defaults give two columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub gutter_mm: f32,
    pub tile_mm: f32,
    pub label_band_mm: f32,
    pub label_font_size: f32,
    pub label_offset_mm: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::for_page_size(PageSize::A4)
    }
}

impl LayoutConfig {
    pub fn for_page_size(page_size: PageSize) -> Self {
        let (page_width_mm, page_height_mm) = page_size.dimensions_mm();
        Self {
            page_width_mm,
            page_height_mm,
            margin_mm: MARGIN_MM,
            gutter_mm: GUTTER_MM,
            tile_mm: TILE_SIZE_MM,
            label_band_mm: LABEL_BAND_MM,
            label_font_size: LABEL_FONT_SIZE,
            label_offset_mm: LABEL_OFFSET_PT * MM_PER_PT,
        }
    }

    pub fn with_margin(mut self, margin_mm: f32) -> Self {
        self.margin_mm = margin_mm;
        self
    }

    /// Reject geometry where not even one tile fits.
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("page width", self.page_width_mm),
            ("page height", self.page_height_mm),
            ("margin", self.margin_mm),
            ("gutter", self.gutter_mm),
            ("tile size", self.tile_mm),
            ("label band", self.label_band_mm),
            ("label font size", self.label_font_size),
            ("label offset", self.label_offset_mm),
        ];
        for (what, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::ConfigError(format!(
                    "{} must be a non-negative number, got {}",
                    what, value
                )));
            }
        }

        if self.tile_mm == 0.0 {
            return Err(AppError::ConfigError("tile size must be positive".to_string()));
        }
        if self.label_offset_mm > self.label_band_mm {
            return Err(AppError::ConfigError(format!(
                "label offset {:.1}mm exceeds the {:.1}mm label band",
                self.label_offset_mm, self.label_band_mm
            )));
        }
        if self.columns() == 0 || self.rows() == 0 {
            return Err(AppError::ConfigError(format!(
                "a {:.1}mm tile with {:.1}mm margins does not fit a {:.1}x{:.1}mm page",
                self.tile_mm, self.margin_mm, self.page_width_mm, self.page_height_mm
            )));
        }
        Ok(())
    }

    /// Horizontal distance between the left edges of adjacent tiles
    pub fn column_step(&self) -> f32 {
        self.tile_mm + self.gutter_mm
    }

    /// Vertical distance between the bottom edges of adjacent rows
    pub fn row_step(&self) -> f32 {
        self.tile_mm + self.label_band_mm + self.gutter_mm
    }

    /// Left edge of the first column
    pub fn first_x(&self) -> f32 {
        self.margin_mm
    }

    /// Bottom edge of the first row
    pub fn first_y(&self) -> f32 {
        self.page_height_mm - self.margin_mm - self.tile_mm
    }

    /// Would a tile starting at `x` stay on the page?
    pub fn fits_horizontally(&self, x: f32) -> bool {
        x + self.tile_mm <= self.page_width_mm
    }

    /// Would a tile whose bottom edge is at `y` keep its label above the bottom margin?
    pub fn fits_vertically(&self, y: f32) -> bool {
        y - self.label_band_mm >= self.margin_mm
    }

    pub fn columns(&self) -> usize {
        if !(self.column_step() > 0.0) {
            return 0;
        }
        let mut count = 0;
        let mut x = self.first_x();
        while self.fits_horizontally(x) {
            count += 1;
            x += self.column_step();
        }
        count
    }

    pub fn rows(&self) -> usize {
        if !(self.row_step() > 0.0) {
            return 0;
        }
        let mut count = 0;
        let mut y = self.first_y();
        while self.fits_vertically(y) {
            count += 1;
            y -= self.row_step();
        }
        count
    }

    pub fn items_per_page(&self) -> usize {
        self.columns() * self.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_defaults_give_two_by_two_grid() {
        let config = LayoutConfig::default();
        assert_eq!(config.columns(), 2);
        assert_eq!(config.rows(), 2);
        assert_eq!(config.items_per_page(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_letter_grid() {
        let config = LayoutConfig::for_page_size(PageSize::Letter);
        assert_eq!(config.columns(), 2);
        assert_eq!(config.rows(), 2);
    }

    #[test]
    fn test_smaller_tiles_fill_more_of_the_page() {
        let config = LayoutConfig {
            tile_mm: 40.0,
            ..LayoutConfig::default()
        };
        // x: 20, 80, 140 fit (180 <= 210); 200 does not
        assert_eq!(config.columns(), 3);
        // y: 237, 167, 97, 27 -> label bands end at 227, 157, 87, 17
        assert_eq!(config.rows(), 3);
    }

    #[test]
    fn test_oversized_tile_is_rejected() {
        let config = LayoutConfig {
            tile_mm: 200.0,
            ..LayoutConfig::default()
        };
        assert_eq!(config.columns(), 0);
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_negative_and_nan_values_are_rejected() {
        let negative = LayoutConfig::default().with_margin(-1.0);
        assert!(matches!(negative.validate(), Err(AppError::ConfigError(_))));

        let nan = LayoutConfig {
            gutter_mm: f32::NAN,
            ..LayoutConfig::default()
        };
        assert!(matches!(nan.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_zero_tile_is_rejected() {
        let config = LayoutConfig {
            tile_mm: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }
}
