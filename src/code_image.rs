//! QR code images for stock items.
//!
//! Each item gets one PNG under `{static_dir}/qr_codes/item_{id}.png`
//! encoding its id, name and quantity at the time the image was made.

use std::{
    io::{Cursor, ErrorKind},
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{QrCode, types::QrError};
use thiserror::Error;

use crate::models::Item;

/// Directory under the static root that holds the images.
pub const CODE_DIR: &str = "qr_codes";

/// Pixel size of one QR module.
const MODULE_PX: u32 = 10;

#[derive(Debug, Error)]
pub enum CodeImageError {
    #[error("failed to encode QR payload: {0}")]
    Encode(#[from] QrError),

    #[error("failed to render PNG: {0}")]
    Render(#[from] image::ImageError),

    #[error("failed to write code image: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct CodeImageGenerator {
    root: PathBuf,
}

impl CodeImageGenerator {
    pub fn new(static_dir: impl AsRef<Path>) -> Self {
        Self {
            root: static_dir.as_ref().join(CODE_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, item_id: i32) -> PathBuf {
        self.root.join(file_name(item_id))
    }

    /// Public URL of an item's image, as served from `/static`.
    pub fn url_for(item_id: i32) -> String {
        format!("/static/{CODE_DIR}/{}", file_name(item_id))
    }

    pub fn payload(item: &Item) -> String {
        format!(
            "Item ID: {}, Name: {}, Quantity: {}",
            item.id, item.name, item.quantity
        )
    }

    pub fn render_png(payload: &str) -> Result<Vec<u8>, CodeImageError> {
        let code = QrCode::new(payload.as_bytes())?;
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PX, MODULE_PX)
            .quiet_zone(true)
            .dark_color(Luma([0u8]))
            .light_color(Luma([255u8]))
            .build();

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render and write the image for `item`, replacing any earlier one.
    pub async fn generate(&self, item: &Item) -> Result<PathBuf, CodeImageError> {
        let png = Self::render_png(&Self::payload(item))?;
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(item.id);
        tokio::fs::write(&path, png).await?;
        tracing::debug!(item_id = item.id, path = %path.display(), "code image written");
        Ok(path)
    }

    /// Delete an item's image. Returns `false` when there was none.
    pub async fn remove(&self, item_id: i32) -> Result<bool, CodeImageError> {
        match tokio::fs::remove_file(self.path_for(item_id)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

fn file_name(item_id: i32) -> String {
    format!("item_{item_id}.png")
}
