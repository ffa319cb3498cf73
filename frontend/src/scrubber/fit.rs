use crate::config::MOBILE_BREAKPOINT;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitStrategy {
    /// Scale to cover the canvas, keep aspect ratio, crop the overflow.
    Cover,
    /// Fill the canvas exactly, ignoring aspect ratio.
    Stretch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FitStrategy {
    pub fn for_canvas_width(canvas_width: f64) -> Self {
        Self::for_width(canvas_width, MOBILE_BREAKPOINT)
    }

    pub fn for_width(canvas_width: f64, breakpoint: f64) -> Self {
        if canvas_width < breakpoint {
            FitStrategy::Stretch
        } else {
            FitStrategy::Cover
        }
    }

    /// Destination rectangle for an `image_w × image_h` source on a
    /// `canvas_w × canvas_h` canvas. `None` when the image has no size yet.
    pub fn rect(self, canvas_w: f64, canvas_h: f64, image_w: f64, image_h: f64) -> Option<DrawRect> {
        if image_w <= 0.0 || image_h <= 0.0 {
            return None;
        }
        match self {
            FitStrategy::Stretch => Some(DrawRect {
                x: 0.0,
                y: 0.0,
                width: canvas_w,
                height: canvas_h,
            }),
            FitStrategy::Cover => {
                let scale = (canvas_w / image_w).max(canvas_h / image_h);
                let width = image_w * scale;
                let height = image_h * scale;
                Some(DrawRect {
                    x: (canvas_w - width) / 2.0,
                    y: (canvas_h - height) / 2.0,
                    width,
                    height,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn strategy_switches_at_breakpoint() {
        assert_eq!(FitStrategy::for_width(767.0, 768.0), FitStrategy::Stretch);
        assert_eq!(FitStrategy::for_width(768.0, 768.0), FitStrategy::Cover);
        assert_eq!(FitStrategy::for_canvas_width(1920.0), FitStrategy::Cover);
        assert_eq!(FitStrategy::for_canvas_width(390.0), FitStrategy::Stretch);
    }

    #[test]
    fn stretch_fills_the_whole_canvas() {
        let rect = FitStrategy::Stretch.rect(390.0, 844.0, 1920.0, 1080.0).unwrap();
        assert_eq!(rect, DrawRect { x: 0.0, y: 0.0, width: 390.0, height: 844.0 });
    }

    #[test]
    fn cover_keeps_aspect_and_covers_canvas() {
        let cases = [
            (1920.0, 1080.0, 1280.0, 720.0),
            (1024.0, 1366.0, 1920.0, 1080.0),
            (2560.0, 1080.0, 1920.0, 1080.0),
            (800.0, 800.0, 300.0, 600.0),
        ];
        for (cw, ch, iw, ih) in cases {
            let rect = FitStrategy::Cover.rect(cw, ch, iw, ih).unwrap();
            assert!((rect.width / rect.height - iw / ih).abs() < EPS);
            assert!(rect.width + EPS >= cw);
            assert!(rect.height + EPS >= ch);
            // centered: equal overflow on both sides
            assert!((rect.x * 2.0 + rect.width - cw).abs() < EPS);
            assert!((rect.y * 2.0 + rect.height - ch).abs() < EPS);
        }
    }

    #[test]
    fn cover_crops_wide_source_horizontally() {
        let rect = FitStrategy::Cover.rect(1000.0, 1000.0, 2000.0, 1000.0).unwrap();
        assert_eq!(rect.height, 1000.0);
        assert_eq!(rect.width, 2000.0);
        assert_eq!(rect.x, -500.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn unsized_image_has_no_rect() {
        assert!(FitStrategy::Cover.rect(800.0, 600.0, 0.0, 600.0).is_none());
        assert!(FitStrategy::Stretch.rect(800.0, 600.0, 100.0, 0.0).is_none());
    }
}
