// Grid layout: where each tag's tile goes, page by page

use crate::config::LayoutConfig;
use crate::encoder::{deep_link, label_for};
use crate::error::Result;
use crate::loader::Tag;
use serde::Serialize;
use tracing::{debug, trace};

/// Outcome of moving the cursor past a placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Next tile goes to the right on the same row
    Column,
    /// Next tile starts a new row on the same page
    Row,
    /// Next tile starts the top row of a new page
    Page,
}

/// Bottom-left corner of the next tile, plus its grid coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub page: usize,
    pub row: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            x: config.first_x(),
            y: config.first_y(),
            page: 0,
            row: 0,
            column: 0,
        }
    }

    /// Step one tile to the right, wrapping when the next tile would leave the page.
    pub fn advance_column(&mut self, config: &LayoutConfig) -> Advance {
        self.x += config.column_step();
        self.column += 1;
        if config.fits_horizontally(self.x) {
            Advance::Column
        } else {
            self.advance_row_or_page(config)
        }
    }

    /// Start the next row, or the next page when the row would not fit.
    pub fn advance_row_or_page(&mut self, config: &LayoutConfig) -> Advance {
        self.x = config.first_x();
        self.column = 0;
        self.y -= config.row_step();
        self.row += 1;
        if config.fits_vertically(self.y) {
            return Advance::Row;
        }

        self.y = config.first_y();
        self.row = 0;
        self.page += 1;
        Advance::Page
    }
}

/// One tag's tile on the sheet. Positions are the tile's bottom-left corner in mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub name: String,
    pub label: String,
    pub url: String,
    pub page: usize,
    pub row: usize,
    pub column: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_mm: f32,
}

impl Placement {
    /// Horizontal centre and baseline of the label under the tile
    pub fn label_anchor(&self, config: &LayoutConfig) -> (f32, f32) {
        (
            self.x_mm + self.size_mm / 2.0,
            self.y_mm - config.label_offset_mm,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagePlan {
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetPlan {
    pub pages: Vec<PagePlan>,
}

impl SheetPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn tag_count(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }

    /// All placements in input order
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.pages.iter().flat_map(|p| p.placements.iter())
    }
}

/// Assign every tag a tile position in row-major order.
///
/// Pages are opened only when a tag needs one, so the last page is never empty.
pub fn plan_sheet(tags: &[Tag], config: &LayoutConfig) -> Result<SheetPlan> {
    config.validate()?;

    let mut cursor = Cursor::new(config);
    let mut pages: Vec<PagePlan> = Vec::new();

    for tag in tags {
        if cursor.page == pages.len() {
            pages.push(PagePlan::default());
        }

        let placement = Placement {
            name: tag.name.clone(),
            label: label_for(&tag.name),
            url: deep_link(&tag.name),
            page: cursor.page,
            row: cursor.row,
            column: cursor.column,
            x_mm: cursor.x,
            y_mm: cursor.y,
            size_mm: config.tile_mm,
        };
        trace!(
            name = %placement.name,
            page = placement.page,
            row = placement.row,
            column = placement.column,
            "Placed tag"
        );
        pages[cursor.page].placements.push(placement);

        if cursor.advance_column(config) == Advance::Page {
            debug!(page = cursor.page, "Page full");
        }
    }

    Ok(SheetPlan { pages })
}
