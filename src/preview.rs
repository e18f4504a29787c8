//! Interactive heightmap viewer with a gray color bar.
//!
//! The window shows a Lanczos-downsampled copy of the field drawn with
//! linear texture filtering, next to a 0..1 scale. `consume` blocks until the
//! window is closed.

use crate::error::{HeightmapError, Result};
use crate::sink::{encode_field, HeightSink};
use crate::utils::Field;
use eframe::egui;
use image::imageops::{self, FilterType};
use log::info;

const COLORBAR_WIDTH: f32 = 20.0;
const COLORBAR_GAP: f32 = 16.0;
const LABEL_WIDTH: f32 = 48.0;
const TICKS: usize = 5;

/// 8-bit grayscale copy of a field, at most `max_side` pixels on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayImage {
    /// `[width, height]`, the order egui expects.
    pub size: [usize; 2],
    pub gray: Vec<u8>,
}

pub fn display_image(field: &Field, max_side: u32) -> Result<DisplayImage> {
    let full = encode_field(field)?;
    let (width, height) = full.dimensions();
    let max_side = max_side.max(1);

    let scale = (max_side as f64 / width.max(height) as f64).min(1.0);
    let target_w = ((width as f64 * scale).round() as u32).max(1);
    let target_h = ((height as f64 * scale).round() as u32).max(1);

    let shown = if (target_w, target_h) == (width, height) {
        full
    } else {
        imageops::resize(&full, target_w, target_h, FilterType::Lanczos3)
    };

    Ok(DisplayImage {
        size: [target_w as usize, target_h as usize],
        gray: shown.pixels().map(|p| (p[0] >> 8) as u8).collect(),
    })
}

pub struct Previewer {
    title: String,
    max_side: u32,
}

impl Previewer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            max_side: 1024,
        }
    }
}

impl HeightSink for Previewer {
    fn name(&self) -> &str {
        "preview"
    }

    fn consume(&mut self, field: &Field) -> Result<()> {
        let image = display_image(field, self.max_side)?;
        info!(
            "Opening preview at {}x{}, close the window to finish",
            image.size[0], image.size[1]
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([960.0, 860.0])
                .with_title(self.title.clone()),
            ..Default::default()
        };
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |_cc| Ok(Box::new(PreviewApp::new(image)))),
        )
        .map_err(|err| HeightmapError::Preview(err.to_string()))
    }
}

struct PreviewApp {
    image: DisplayImage,
    heightmap: Option<egui::TextureHandle>,
    colorbar: Option<egui::TextureHandle>,
}

impl PreviewApp {
    fn new(image: DisplayImage) -> Self {
        Self {
            image,
            heightmap: None,
            colorbar: None,
        }
    }
}

/// Fits a `width x height` image into `bounds` keeping its aspect ratio.
fn fit_rect(bounds: egui::Rect, width: f32, height: f32) -> egui::Rect {
    let scale = (bounds.width() / width).min(bounds.height() / height).max(0.0);
    egui::Rect::from_min_size(bounds.min, egui::vec2(width * scale, height * scale))
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let heightmap = self
            .heightmap
            .get_or_insert_with(|| {
                ctx.load_texture(
                    "heightmap",
                    egui::ColorImage::from_gray(self.image.size, &self.image.gray),
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone();
        let colorbar = self
            .colorbar
            .get_or_insert_with(|| {
                // top is 1.0
                let ramp: Vec<u8> = (0..=255u8).rev().collect();
                ctx.load_texture(
                    "colorbar",
                    egui::ColorImage::from_gray([1, ramp.len()], &ramp),
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let image_bounds = egui::Rect::from_min_max(
                available.min,
                egui::pos2(
                    available.max.x - COLORBAR_GAP - COLORBAR_WIDTH - LABEL_WIDTH,
                    available.max.y,
                ),
            );
            let image_rect = fit_rect(
                image_bounds,
                self.image.size[0] as f32,
                self.image.size[1] as f32,
            );
            let bar_rect = egui::Rect::from_min_size(
                egui::pos2(image_rect.max.x + COLORBAR_GAP, image_rect.min.y),
                egui::vec2(COLORBAR_WIDTH, image_rect.height()),
            );
            let full_uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

            let painter = ui.painter();
            painter.image(heightmap.id(), image_rect, full_uv, egui::Color32::WHITE);
            painter.image(colorbar.id(), bar_rect, full_uv, egui::Color32::WHITE);
            painter.rect_stroke(
                bar_rect,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::GRAY),
                egui::StrokeKind::Middle,
            );

            for tick in 0..=TICKS {
                let value = tick as f32 / TICKS as f32;
                let y = bar_rect.max.y - value * bar_rect.height();
                painter.line_segment(
                    [egui::pos2(bar_rect.max.x, y), egui::pos2(bar_rect.max.x + 4.0, y)],
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                );
                painter.text(
                    egui::pos2(bar_rect.max.x + 6.0, y),
                    egui::Align2::LEFT_CENTER,
                    format!("{value:.1}"),
                    egui::FontId::monospace(12.0),
                    egui::Color32::LIGHT_GRAY,
                );
            }

            ui.allocate_rect(available, egui::Sense::hover());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::linear_gradient;

    #[test]
    fn test_display_image_keeps_small_fields() {
        let field = linear_gradient((3, 5));
        let image = display_image(&field, 1024).unwrap();

        assert_eq!(image.size, [5, 3]);
        assert_eq!(&image.gray[..5], &[0, 64, 128, 192, 255]);
    }

    #[test]
    fn test_display_image_downsamples_large_fields() {
        let field = linear_gradient((65, 129));
        let image = display_image(&field, 32).unwrap();

        assert_eq!(image.size, [32, 16]);
        assert_eq!(image.gray.len(), 32 * 16);
        // still a left to right ramp
        let row = &image.gray[..32];
        assert!(row[0] < 16);
        assert!(row[31] > 240);
        assert!(row[0] < row[16] && row[16] < row[31]);
    }

    #[test]
    fn test_fit_rect_keeps_aspect() {
        let bounds = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(400.0, 100.0));
        let rect = fit_rect(bounds, 50.0, 25.0);

        assert_eq!(rect.min, egui::pos2(10.0, 20.0));
        assert_eq!(rect.size(), egui::vec2(200.0, 100.0));
    }
}
