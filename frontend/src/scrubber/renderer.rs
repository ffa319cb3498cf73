use log::error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use super::fit::FitStrategy;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    }

    /// Matches the canvas backing store to the container's layout size.
    pub fn fit_to(&self, container: &HtmlElement) {
        self.canvas.set_width(container.client_width().max(0) as u32);
        self.canvas.set_height(container.client_height().max(0) as u32);
    }

    /// Clears the canvas and paints `image`. Leaves the canvas untouched when
    /// the image has no size or there is no 2d context.
    pub fn draw(&self, image: &HtmlImageElement) {
        let Some(ctx) = self.context() else {
            return;
        };
        let cw = self.canvas.width() as f64;
        let ch = self.canvas.height() as f64;
        let strategy = FitStrategy::for_canvas_width(cw);
        let Some(rect) = strategy.rect(
            cw,
            ch,
            image.natural_width() as f64,
            image.natural_height() as f64,
        ) else {
            return;
        };

        ctx.clear_rect(0.0, 0.0, cw, ch);
        if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
        ) {
            error!("Error drawing image frame: {:?}", e);
        }
    }
}
