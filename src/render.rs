// PDF rendering of a planned sheet

use crate::config::{LayoutConfig, MM_PER_PT};
use crate::encoder::encode_tag;
use crate::error::{AppError, Result};
use crate::layout::{Placement, SheetPlan};
use ::image::GrayImage;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

const DOCUMENT_TITLE: &str = "Shopping Tags";
const LAYER_NAME: &str = "Layer 1";

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Fallback for characters outside the table
const HELVETICA_DEFAULT_WIDTH: u16 = 556;

/// Width of `text` set in Helvetica at `font_size` points, in mm.
pub fn helvetica_text_width_mm(text: &str, font_size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                HELVETICA_DEFAULT_WIDTH as u32
            }
        })
        .sum();
    units as f32 / 1000.0 * font_size * MM_PER_PT
}

/// Draw every placement of `plan` and write the PDF to `output_path`.
///
/// The file is only created once every tile has been encoded.
pub fn render_sheet(plan: &SheetPlan, config: &LayoutConfig, output_path: &Path) -> Result<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(config.page_width_mm),
        Mm(config.page_height_mm),
        LAYER_NAME,
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::RenderError(e.to_string()))?;

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                Mm(config.page_width_mm),
                Mm(config.page_height_mm),
                LAYER_NAME,
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        debug!(page = index, tiles = page.placements.len(), "Rendering page");
        for placement in &page.placements {
            draw_tile(&layer, &font, placement, config)?;
        }
    }

    let file = File::create(output_path)
        .map_err(|e| AppError::RenderError(format!("{}: {}", output_path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::RenderError(format!("{}: {}", output_path.display(), e)))?;

    info!(
        path = %output_path.display(),
        pages = plan.page_count().max(1),
        tags = plan.tag_count(),
        "Saved PDF"
    );
    Ok(())
}

fn draw_tile(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    placement: &Placement,
    config: &LayoutConfig,
) -> Result<()> {
    let tile = encode_tag(&placement.name)?;
    embed_qr_code(layer, &tile.image, placement.x_mm, placement.y_mm, placement.size_mm)?;

    let (center_x, baseline_y) = placement.label_anchor(config);
    let label_width = helvetica_text_width_mm(&placement.label, config.label_font_size);
    layer.use_text(
        placement.label.as_str(),
        config.label_font_size,
        Mm(center_x - label_width / 2.0),
        Mm(baseline_y),
        font,
    );

    Ok(())
}

fn embed_qr_code(
    layer: &PdfLayerReference,
    qr_image: &GrayImage,
    x: f32,
    y: f32,
    size_mm: f32,
) -> Result<()> {
    let (width, height) = qr_image.dimensions();
    if width == 0 || height == 0 {
        return Err(AppError::RenderError("empty QR image".to_string()));
    }

    let image = Image::from(ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Greyscale,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: qr_image.as_raw().clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI that maps the pixel width onto size_mm
    let dpi = (width as f32) / (size_mm / 25.4);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    Ok(())
}
