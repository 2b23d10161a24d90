//! Canvas 2D draw sink

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame::{DrawSink, Rgba};

/// Draws frames onto an HTML canvas through its 2D context
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasSink {
    /// Size the canvas to the arena and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Result<Self, JsValue> {
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        log::info!("Canvas sink ready ({}x{})", width, height);
        Ok(Self {
            ctx,
            size: (width, height),
        })
    }
}

impl DrawSink for CanvasSink {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }
}
