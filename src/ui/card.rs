//! Card rendering capability. A rich renderer delegates to an external card
//! service when one is configured; the fallback draws a deterministic raster
//! locally and is infallible, so `/card` can always degrade to it.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};

use crate::constants::{CARD_HEIGHT, CARD_WIDTH, REMOTE_TIMEOUT_SECS};
use crate::gateway::ShowcaseProfile;
use crate::ui::font;

const BACKGROUND: Rgb<u8> = Rgb([22, 24, 28]);
const TITLE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const HEADING_COLOR: Rgb<u8> = Rgb([200, 220, 255]);
const BODY_COLOR: Rgb<u8> = Rgb([235, 235, 235]);

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("card service request failed: {0}")]
    Service(#[from] reqwest::Error),
    #[error("card service returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait CardRenderer: Send + Sync {
    async fn render(&self, profile: &ShowcaseProfile) -> Result<Vec<u8>, CardError>;
}

/// Local raster; never fails.
pub struct FallbackRenderer;

#[async_trait]
impl CardRenderer for FallbackRenderer {
    async fn render(&self, profile: &ShowcaseProfile) -> Result<Vec<u8>, CardError> {
        Ok(fallback_card(profile))
    }
}

/// Delegates to an external card service configured at startup.
pub struct ServiceRenderer {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceRenderer {
    pub fn new(base_url: &str) -> Result<Self, CardError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl CardRenderer for ServiceRenderer {
    async fn render(&self, profile: &ShowcaseProfile) -> Result<Vec<u8>, CardError> {
        let response = self
            .http
            .post(format!("{}/card", self.base_url))
            .json(&serde_json::json!({ "uid": profile.uid }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CardError::Status(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Startup selection of the capability: a configured service wins, the
/// fallback raster otherwise.
pub fn select_renderer(service_url: Option<&str>) -> Arc<dyn CardRenderer> {
    if let Some(url) = service_url {
        match ServiceRenderer::new(url) {
            Ok(renderer) => {
                tracing::info!(url, "using external card renderer");
                return Arc::new(renderer);
            }
            Err(err) => {
                tracing::warn!(error = %err, "card service unusable, using fallback renderer");
            }
        }
    }
    Arc::new(FallbackRenderer)
}

/// Deterministic raster for a showcase profile: fixed canvas, fixed palette,
/// title line plus body lines.
pub fn fallback_card(profile: &ShowcaseProfile) -> Vec<u8> {
    let mut lines = vec![
        profile.nickname.clone(),
        format!("Adventure Rank {}", profile.level),
        format!("World Level {}", profile.world_level),
        format!("Showcased characters: {}", profile.showcased),
    ];
    if !profile.signature.is_empty() {
        lines.push(profile.signature.clone());
    }
    text_card(&format!("GENSHIN - UID {}", profile.uid), &lines)
}

fn text_card(title: &str, lines: &[String]) -> Vec<u8> {
    let mut canvas = RgbImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, BACKGROUND);
    draw_text(&mut canvas, 30, 25, 4, TITLE_COLOR, title);
    let mut y = 90;
    for (row, line) in lines.iter().enumerate() {
        let color = if row == 0 { HEADING_COLOR } else { BODY_COLOR };
        draw_text(&mut canvas, 30, y, 3, color, line);
        y += 34;
    }
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    if let Err(err) = image::DynamicImage::ImageRgb8(canvas).write_to(&mut cursor, ImageFormat::Png)
    {
        // Encoding into memory has no failure path in practice; keep the
        // command alive regardless.
        tracing::error!(error = %err, "png encode of fallback card failed");
    }
    buffer
}

fn draw_text(canvas: &mut RgbImage, x: u32, y: u32, scale: u32, color: Rgb<u8>, textline: &str) {
    let mut pen_x = x;
    for ch in textline.chars() {
        let rows = font::glyph(ch);
        for (row, bits) in rows.iter().copied().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if u32::from(bits) & (1 << (font::GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = pen_x + col * scale + dx;
                        let py = y + row as u32 * scale + dy;
                        if px < canvas.width() && py < canvas.height() {
                            canvas.put_pixel(px, py, color);
                        }
                    }
                }
            }
        }
        pen_x += (font::GLYPH_WIDTH + 1) * scale;
        if pen_x >= canvas.width() {
            break;
        }
    }
}
