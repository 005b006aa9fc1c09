//! Canvas 2D render surface (browser only)

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{RenderSurface, Sprite};

/// Draws preloaded images onto a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    player: HtmlImageElement,
    platform: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(
        context: CanvasRenderingContext2d,
        player: HtmlImageElement,
        platform: HtmlImageElement,
    ) -> Self {
        Self {
            context,
            player,
            platform,
        }
    }

    fn image(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Player => &self.player,
            Sprite::Platform => &self.platform,
        }
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, origin: Vec2, size: Vec2) {
        self.context
            .clear_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn draw_image(&mut self, sprite: Sprite, pos: Vec2, size: Vec2) {
        let result = self
            .context
            .draw_image_with_html_image_element_and_dw_and_dh(
                self.image(sprite),
                pos.x as f64,
                pos.y as f64,
                size.x as f64,
                size.y as f64,
            );
        if let Err(e) = result {
            log::warn!("draw_image({:?}) failed: {:?}", sprite, e);
        }
    }
}
