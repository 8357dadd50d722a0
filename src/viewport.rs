// src/viewport.rs v1
//! Viewport mapping between widget pixels and image pixels
//!
//! The viewport is the rectangle of the image (in image pixels) currently
//! stretched over the whole widget. Zooming and panning move that rectangle;
//! the widget itself never changes what it covers.

use tracing::debug;

/// A position in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size of the widget the viewport is drawn into, in widget pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetSize {
    pub width: u32,
    pub height: u32,
}

impl WidgetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from the floating point size reported by the GUI toolkit
    pub fn from_f32(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0).round() as u32,
            height: height.max(0.0).round() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a vertical scroll delta to a zoom step (scrolling up zooms in)
    pub fn from_scroll(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(ZoomDirection::In)
        } else if delta < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// Visible part of the image: origin `(x0, y0)` and extent `(w, h)`.
///
/// Extents are always at least one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    x0: i32,
    y0: i32,
    w: i32,
    h: i32,
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Viewport {
    /// Viewport covering exactly the whole image
    pub fn for_image(image_width: u32, image_height: u32) -> Self {
        Self::from_bounds(0, 0, saturate(image_width as i64), saturate(image_height as i64))
    }

    pub fn from_bounds(x0: i32, y0: i32, w: i32, h: i32) -> Self {
        Self {
            x0,
            y0,
            w: w.max(1),
            h: h.max(1),
        }
    }

    pub fn x0(&self) -> i32 {
        self.x0
    }

    pub fn y0(&self) -> i32 {
        self.y0
    }

    pub fn width(&self) -> i32 {
        self.w
    }

    pub fn height(&self) -> i32 {
        self.h
    }

    /// Initial bounds for a freshly loaded image
    pub fn reset(&mut self, image_width: u32, image_height: u32, widget: WidgetSize, keep_aspect: bool) {
        *self = Self::for_image(image_width, image_height);
        if keep_aspect {
            self.fit_aspect(widget);
        }
    }

    /// Grow the viewport along one axis so that its aspect ratio matches the
    /// widget's, keeping the visible area centred.
    pub fn fit_aspect(&mut self, widget: WidgetSize) {
        if widget.is_empty() {
            return;
        }

        let wc = widget.width as i64;
        let hc = widget.height as i64;
        let w = self.w as i64;
        let h = self.h as i64;

        if wc as f64 / hc as f64 > w as f64 / h as f64 {
            let new_w = (h * wc / hc).max(1);
            self.x0 = saturate(self.x0 as i64 - (new_w - w) / 2);
            self.w = saturate(new_w);
        } else {
            let new_h = (w * hc / wc).max(1);
            self.y0 = saturate(self.y0 as i64 - (new_h - h) / 2);
            self.h = saturate(new_h);
        }
    }

    /// Zoom by a factor of two around the pointer position (widget pixels)
    pub fn zoom(&mut self, direction: ZoomDirection, pointer_x: f32, pointer_y: f32, widget: WidgetSize) {
        if widget.is_empty() {
            return;
        }

        let mx = pointer_x as f64 / widget.width as f64;
        let my = pointer_y as f64 / widget.height as f64;

        match direction {
            ZoomDirection::Out => {
                if self.w > i32::MAX / 2 || self.h > i32::MAX / 2 {
                    debug!("Zoom out ignored, viewport already {}x{}", self.w, self.h);
                    return;
                }
                self.x0 = saturate(self.x0 as i64 - (self.w as f64 * mx) as i64);
                self.y0 = saturate(self.y0 as i64 - (self.h as f64 * my) as i64);
                self.w *= 2;
                self.h *= 2;
            }
            ZoomDirection::In => {
                self.x0 = saturate(self.x0 as i64 + (self.w as f64 * mx / 2.0) as i64);
                self.y0 = saturate(self.y0 as i64 + (self.h as f64 * my / 2.0) as i64);
                self.w = (self.w / 2).max(1);
                self.h = (self.h / 2).max(1);
            }
        }
    }

    /// Move the viewport by a drag of `(dx, dy)` widget pixels
    pub fn pan(&mut self, dx: f32, dy: f32, widget: WidgetSize) {
        if widget.is_empty() {
            return;
        }

        let shift_x = (dx as f64 * self.w as f64 / widget.width as f64).round() as i64;
        let shift_y = (dy as f64 * self.h as f64 / widget.height as f64).round() as i64;
        self.x0 = saturate(self.x0 as i64 - shift_x);
        self.y0 = saturate(self.y0 as i64 - shift_y);
    }

    /// Image pixel under the widget position `(x, y)`
    pub fn image_coord(&self, x: f32, y: f32, widget: WidgetSize) -> ImagePoint {
        if widget.is_empty() {
            return ImagePoint::new(self.x0, self.y0);
        }

        let mx = x as f64 / widget.width as f64;
        let my = y as f64 / widget.height as f64;
        ImagePoint::new(
            saturate(self.x0 as i64 + (self.w as f64 * mx) as i64),
            saturate(self.y0 as i64 + (self.h as f64 * my) as i64),
        )
    }

    /// Widget pixel of an image point, in integer arithmetic
    pub fn widget_coord(&self, point: ImagePoint, widget: WidgetSize) -> (i32, i32) {
        let x = (point.x as i64 - self.x0 as i64) * widget.width as i64 / self.w as i64;
        let y = (point.y as i64 - self.y0 as i64) * widget.height as i64 / self.h as i64;
        (saturate(x), saturate(y))
    }

    /// Widget position of an image point, for painting
    pub fn widget_pos(&self, point: ImagePoint, widget: WidgetSize) -> (f32, f32) {
        let x = (point.x as f64 - self.x0 as f64) * widget.width as f64 / self.w as f64;
        let y = (point.y as f64 - self.y0 as f64) * widget.height as f64 / self.h as f64;
        (x as f32, y as f32)
    }

    pub fn contains_widget(x: i32, y: i32, widget: WidgetSize) -> bool {
        x >= 0 && y >= 0 && (x as i64) < widget.width as i64 && (y as i64) < widget.height as i64
    }
}

/// A viewport tied to a widget whose size can change between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    viewport: Viewport,
    image_size: (u32, u32),
    widget: WidgetSize,
    keep_aspect: bool,
    needs_reset: bool,
}

impl ViewState {
    pub fn new(image_width: u32, image_height: u32, keep_aspect: bool) -> Self {
        Self {
            viewport: Viewport::for_image(image_width, image_height),
            image_size: (image_width, image_height),
            widget: WidgetSize::default(),
            keep_aspect,
            needs_reset: true,
        }
    }

    /// Switch to another image; bounds are reset on the next `sync`
    pub fn set_image(&mut self, image_width: u32, image_height: u32) {
        self.viewport = Viewport::for_image(image_width, image_height);
        self.image_size = (image_width, image_height);
        self.needs_reset = true;
    }

    /// Follow the widget size. The first non-empty size after a new image sets
    /// the initial bounds; later resizes only re-fit the aspect ratio, and only
    /// when `keep_aspect` is set. Returns whether anything was updated.
    pub fn sync(&mut self, widget: WidgetSize) -> bool {
        if widget.is_empty() || (widget == self.widget && !self.needs_reset) {
            return false;
        }

        if self.needs_reset {
            let (width, height) = self.image_size;
            self.viewport.reset(width, height, widget, self.keep_aspect);
            self.needs_reset = false;
        } else if self.keep_aspect {
            self.viewport.fit_aspect(widget);
        }

        self.widget = widget;
        true
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn widget(&self) -> WidgetSize {
        self.widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_image_covers_whole_image() {
        let vp = Viewport::for_image(640, 480);
        assert_eq!((vp.x0(), vp.y0(), vp.width(), vp.height()), (0, 0, 640, 480));
    }

    #[test]
    fn test_extent_never_zero() {
        let vp = Viewport::from_bounds(5, 5, 0, -3);
        assert_eq!(vp.width(), 1);
        assert_eq!(vp.height(), 1);
    }

    #[test]
    fn test_fit_aspect_heightens_for_square_widget() {
        let mut vp = Viewport::for_image(400, 200);
        vp.fit_aspect(WidgetSize::new(200, 200));
        assert_eq!(vp, Viewport::from_bounds(0, -100, 400, 400));
    }

    #[test]
    fn test_fit_aspect_widens_for_wide_widget() {
        let mut vp = Viewport::for_image(400, 200);
        vp.fit_aspect(WidgetSize::new(800, 200));
        assert_eq!(vp, Viewport::from_bounds(-200, 0, 800, 200));
    }

    #[test]
    fn test_fit_aspect_ignores_empty_widget() {
        let mut vp = Viewport::for_image(400, 200);
        vp.fit_aspect(WidgetSize::new(0, 300));
        assert_eq!(vp, Viewport::for_image(400, 200));
    }

    #[test]
    fn test_reset_without_aspect_keeps_image_bounds() {
        let mut vp = Viewport::from_bounds(10, 10, 3, 3);
        vp.reset(400, 200, WidgetSize::new(200, 200), false);
        assert_eq!(vp, Viewport::for_image(400, 200));

        vp.reset(400, 200, WidgetSize::new(200, 200), true);
        assert_eq!(vp, Viewport::from_bounds(0, -100, 400, 400));
    }

    #[test]
    fn test_zoom_in_keeps_point_under_pointer() {
        let widget = WidgetSize::new(200, 200);
        let mut vp = Viewport::for_image(400, 400);
        let before = vp.image_coord(100.0, 100.0, widget);

        vp.zoom(ZoomDirection::In, 100.0, 100.0, widget);
        assert_eq!(vp, Viewport::from_bounds(100, 100, 200, 200));
        assert_eq!(vp.image_coord(100.0, 100.0, widget), before);
    }

    #[test]
    fn test_zoom_out_undoes_zoom_in_at_same_pointer() {
        let widget = WidgetSize::new(200, 200);
        let mut vp = Viewport::for_image(400, 400);
        vp.zoom(ZoomDirection::In, 100.0, 100.0, widget);
        vp.zoom(ZoomDirection::Out, 100.0, 100.0, widget);
        assert_eq!(vp, Viewport::for_image(400, 400));
    }

    #[test]
    fn test_zoom_in_at_corner_keeps_origin() {
        let widget = WidgetSize::new(100, 100);
        let mut vp = Viewport::for_image(100, 100);
        vp.zoom(ZoomDirection::In, 0.0, 0.0, widget);
        assert_eq!(vp, Viewport::from_bounds(0, 0, 50, 50));
    }

    #[test]
    fn test_zoom_in_stops_at_one_pixel() {
        let widget = WidgetSize::new(100, 100);
        let mut vp = Viewport::for_image(2, 2);
        for _ in 0..5 {
            vp.zoom(ZoomDirection::In, 50.0, 50.0, widget);
        }
        assert_eq!(vp.width(), 1);
        assert_eq!(vp.height(), 1);
    }

    #[test]
    fn test_zoom_out_refuses_overflow() {
        let widget = WidgetSize::new(100, 100);
        let mut vp = Viewport::from_bounds(0, 0, i32::MAX / 2 + 1, 10);
        let before = vp;
        vp.zoom(ZoomDirection::Out, 50.0, 50.0, widget);
        assert_eq!(vp, before);
    }

    #[test]
    fn test_pan_moves_against_drag() {
        let widget = WidgetSize::new(100, 100);
        let mut vp = Viewport::for_image(200, 200);
        vp.pan(10.0, -5.0, widget);
        assert_eq!(vp, Viewport::from_bounds(-20, 10, 200, 200));
    }

    #[test]
    fn test_image_coord_scales_linearly() {
        let widget = WidgetSize::new(100, 50);
        let vp = Viewport::from_bounds(10, 20, 200, 100);
        assert_eq!(vp.image_coord(0.0, 0.0, widget), ImagePoint::new(10, 20));
        assert_eq!(vp.image_coord(50.0, 25.0, widget), ImagePoint::new(110, 70));
        assert_eq!(vp.image_coord(99.0, 49.0, widget), ImagePoint::new(208, 118));
    }

    #[test]
    fn test_widget_coord_inverts_image_coord() {
        let widget = WidgetSize::new(100, 50);
        let vp = Viewport::from_bounds(10, 20, 200, 100);
        assert_eq!(vp.widget_coord(ImagePoint::new(110, 70), widget), (50, 25));
        assert_eq!(vp.widget_coord(ImagePoint::new(0, 0), widget), (-5, -10));
        assert_eq!(vp.widget_pos(ImagePoint::new(11, 20), widget), (0.5, 0.0));
    }

    #[test]
    fn test_contains_widget_bounds() {
        let widget = WidgetSize::new(10, 10);
        assert!(Viewport::contains_widget(0, 0, widget));
        assert!(Viewport::contains_widget(9, 9, widget));
        assert!(!Viewport::contains_widget(10, 5, widget));
        assert!(!Viewport::contains_widget(-1, 5, widget));
    }

    #[test]
    fn test_zoom_direction_from_scroll() {
        assert_eq!(ZoomDirection::from_scroll(3.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(-1.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_scroll(0.0), None);
    }

    #[test]
    fn test_widget_size_from_f32() {
        assert_eq!(WidgetSize::from_f32(99.6, -4.0), WidgetSize::new(100, 0));
        assert!(WidgetSize::from_f32(99.6, -4.0).is_empty());
    }

    #[test]
    fn test_view_state_first_sync_sets_bounds() {
        let mut view = ViewState::new(400, 200, true);
        assert!(view.sync(WidgetSize::new(200, 200)));
        assert_eq!(*view.viewport(), Viewport::from_bounds(0, -100, 400, 400));

        // Same size again is a no-op
        assert!(!view.sync(WidgetSize::new(200, 200)));
        assert_eq!(view.widget(), WidgetSize::new(200, 200));
    }

    #[test]
    fn test_view_state_resize_refits_with_keep_aspect() {
        let mut view = ViewState::new(400, 200, true);
        view.sync(WidgetSize::new(200, 200));

        assert!(view.sync(WidgetSize::new(800, 400)));
        assert_eq!(*view.viewport(), Viewport::from_bounds(-200, -100, 800, 400));
    }

    #[test]
    fn test_view_state_resize_keeps_bounds_when_stretching() {
        let mut view = ViewState::new(400, 200, false);
        view.sync(WidgetSize::new(200, 200));
        assert_eq!(*view.viewport(), Viewport::for_image(400, 200));

        assert!(view.sync(WidgetSize::new(800, 200)));
        assert_eq!(*view.viewport(), Viewport::for_image(400, 200));
        assert_eq!(view.widget(), WidgetSize::new(800, 200));
    }

    #[test]
    fn test_view_state_resize_keeps_zoom() {
        let widget = WidgetSize::new(400, 400);
        let mut view = ViewState::new(400, 400, false);
        view.sync(widget);
        view.viewport_mut().zoom(ZoomDirection::In, 0.0, 0.0, widget);
        let zoomed = *view.viewport();

        view.sync(WidgetSize::new(600, 300));
        assert_eq!(*view.viewport(), zoomed);
    }

    #[test]
    fn test_view_state_waits_for_real_widget() {
        let mut view = ViewState::new(400, 200, true);
        assert!(!view.sync(WidgetSize::new(0, 300)));
        assert!(view.sync(WidgetSize::new(200, 200)));
        assert_eq!(*view.viewport(), Viewport::from_bounds(0, -100, 400, 400));
    }

    #[test]
    fn test_view_state_new_image_resets_at_same_size() {
        let widget = WidgetSize::new(200, 200);
        let mut view = ViewState::new(400, 200, true);
        view.sync(widget);
        view.viewport_mut().pan(50.0, 50.0, widget);

        view.set_image(100, 100);
        assert!(view.sync(widget));
        assert_eq!(*view.viewport(), Viewport::for_image(100, 100));
        assert_eq!(view.image_size(), (100, 100));
    }
}
