// shopping-tag-pdf: Print Home Assistant shopping tags as sheets of QR codes

pub mod config;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod loader;
pub mod render;

pub use config::{LayoutConfig, PageSize};
pub use encoder::{deep_link, encode_tag, label_for, QrTile};
pub use error::{AppError, Result};
pub use layout::{plan_sheet, Placement, SheetPlan};
pub use loader::{load_tags, Tag};
pub use render::render_sheet;

use std::path::Path;

/// Load `input`, lay the tags out and write the PDF to `output`.
pub fn generate_sheet(input: &Path, output: &Path, config: &LayoutConfig) -> Result<SheetPlan> {
    let tags = load_tags(input)?;
    if tags.is_empty() {
        tracing::warn!(path = %input.display(), "Tag list is empty, writing a blank page");
    }

    let plan = plan_sheet(&tags, config)?;
    render_sheet(&plan, config, output)?;
    Ok(plan)
}
