//! the viewport maps between WorldSpace and ScreenSpace - panning, zooming, resizing.
//! kept apart from the circuit so panning or zooming never touches topology.
//!
//! a world point `wsp` lands on screen at `(wsp - target) * zoom + offset`,
//! i.e. `target` is the world point drawn at the screen point `offset`.

use crate::config::SimConfig;
use crate::transforms::{SCBox, SCPoint, SCVec, WSBox, WSPoint, WSTransformLockedAspect, WSVec};

/// zoom change per unit of scroll wheel movement
pub const ZOOM_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// world point shown at `offset`
    target: WSPoint,
    /// screen point `target` is drawn at, normally the screen center
    offset: SCPoint,
    zoom: f32,
    /// zoom out limit
    min_zoom: f32,
    /// zoom in limit
    max_zoom: f32,
    /// screen size in pixels, tracked to adjust zoom when the aspect ratio changes
    screen_width: f32,
    screen_height: f32,
}

impl Camera {
    /// camera centered on the world origin for a screen of the given size
    pub fn new(screen_width: f32, screen_height: f32, min_zoom: f32, max_zoom: f32) -> Self {
        Camera {
            target: WSPoint::origin(),
            offset: SCPoint::new(screen_width / 2.0, screen_height / 2.0),
            zoom: 1.0f32.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            screen_width,
            screen_height,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Camera::new(
            config.initial_viewport.width,
            config.initial_viewport.height,
            config.min_zoom,
            config.max_zoom,
        )
    }

    pub fn target(&self) -> WSPoint {
        self.target
    }
    pub fn offset(&self) -> SCPoint {
        self.offset
    }
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// the world to screen transform for the current camera
    pub fn ws_transform(&self) -> WSTransformLockedAspect {
        WSTransformLockedAspect::identity()
            .then_scale(self.zoom)
            .pre_translate(-self.target.to_vector())
            .then_translate(self.offset.to_vector())
    }

    pub fn world_to_screen(&self, wsp: WSPoint) -> SCPoint {
        self.ws_transform().transform_point(wsp)
    }

    pub fn screen_to_world(&self, scp: SCPoint) -> WSPoint {
        match self.ws_transform().inverse_transform() {
            Some(swt) => swt.transform_point(scp),
            // zoom is clamped away from zero, so this only guards a degenerate config
            None => self.target,
        }
    }

    /// drags the view with the cursor: moving the cursor by `delta` pixels moves the world with it
    pub fn pan(&mut self, delta: SCVec) {
        self.target -= WSVec::new(delta.x, delta.y) / self.zoom;
    }

    /// zooms by `wheel` scroll units, keeping the world point under `anchor` fixed on screen
    pub fn zoom_at(&mut self, anchor: SCPoint, wheel: f32) {
        if wheel == 0.0 || !wheel.is_finite() {
            return;
        }
        self.target = self.screen_to_world(anchor);
        self.offset = anchor;
        self.zoom = (self.zoom + wheel * ZOOM_STEP).clamp(self.min_zoom, self.max_zoom);
    }

    /// follows a window resize: recenters the offset and, when the aspect ratio changes,
    /// scales the zoom by the change along the constraining axis
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            tracing::warn!(width, height, "ignoring camera resize with non-positive dimensions");
            return false;
        }
        // keep the world point at the old center in the new center
        let center = self.screen_to_world(SCPoint::new(
            self.screen_width / 2.0,
            self.screen_height / 2.0,
        ));
        let old_aspect = self.screen_width / self.screen_height;
        let new_aspect = width / height;
        if new_aspect > old_aspect {
            self.zoom *= height / self.screen_height;
        } else if new_aspect < old_aspect {
            self.zoom *= width / self.screen_width;
        }
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self.target = center;
        self.screen_width = width;
        self.screen_height = height;
        self.offset = SCPoint::new(width / 2.0, height / 2.0);
        true
    }

    /// zooms and centers so the world box fits inside the screen box
    pub fn fit_bounds(&mut self, wsb: WSBox, scb: SCBox) {
        if wsb.is_empty() || scb.is_empty() {
            return;
        }
        let wst = WSTransformLockedAspect::fit_bounds(scb, wsb, self.min_zoom, self.max_zoom);
        self.zoom = wst.scale();
        self.target = wsb.center();
        self.offset = wst.transform_point(wsb.center());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::from_config(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn centered_on_origin() {
        let cam = Camera::default();
        assert_eq!(cam.world_to_screen(WSPoint::origin()), SCPoint::new(400.0, 300.0));
        assert_eq!(cam.screen_to_world(SCPoint::new(400.0, 300.0)), WSPoint::origin());
    }

    #[test]
    fn pan_moves_world_with_cursor() {
        let mut cam = Camera::default();
        let before = cam.world_to_screen(WSPoint::new(10.0, 10.0));
        cam.pan(SCVec::new(20.0, -5.0));
        let after = cam.world_to_screen(WSPoint::new(10.0, 10.0));
        assert_eq!(after - before, SCVec::new(20.0, -5.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let mut cam = Camera::default();
        let anchor = SCPoint::new(100.0, 50.0);
        let wsp = cam.screen_to_world(anchor);
        cam.zoom_at(anchor, 4.0);
        assert!(approx_eq!(f32, cam.zoom(), 1.2, epsilon = 1e-6));
        let back = cam.world_to_screen(wsp);
        assert!(approx_eq!(f32, back.x, anchor.x, epsilon = 1e-3));
        assert!(approx_eq!(f32, back.y, anchor.y, epsilon = 1e-3));

        cam.zoom_at(anchor, 1000.0);
        assert_eq!(cam.zoom(), 2.0);
        cam.zoom_at(anchor, -1000.0);
        assert_eq!(cam.zoom(), 0.5);
    }

    #[test]
    fn resize_recenters() {
        let mut cam = Camera::default();
        assert!(cam.resize(1600.0, 1200.0));
        assert_eq!(cam.offset(), SCPoint::new(800.0, 600.0));
        assert_eq!(cam.zoom(), 1.0);
        assert!(cam.resize(1600.0, 600.0));
        // wider: zoom follows the height change, 600 / 1200
        assert!(approx_eq!(f32, cam.zoom(), 0.5));
        assert!(!cam.resize(0.0, 600.0));
    }

    #[test]
    fn fit_bounds_centers_box() {
        let mut cam = Camera::default();
        let wsb = WSBox::new(WSPoint::new(0.0, 0.0), WSPoint::new(200.0, 100.0));
        let scb = SCBox::new(SCPoint::new(0.0, 0.0), SCPoint::new(800.0, 600.0));
        cam.fit_bounds(wsb, scb);
        assert_eq!(cam.zoom(), 2.0);
        let c = cam.world_to_screen(wsb.center());
        assert!(approx_eq!(f32, c.x, 400.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, c.y, 300.0, epsilon = 1e-3));
    }

    proptest! {
        #[test]
        fn world_screen_round_trip(
            x in -2e3f32..2e3,
            y in -2e3f32..2e3,
            wheel in -20f32..20.0,
            px in -500f32..500.0,
            py in -500f32..500.0,
        ) {
            let mut cam = Camera::default();
            cam.pan(SCVec::new(px, py));
            cam.zoom_at(SCPoint::new(px, py), wheel);
            let wsp = WSPoint::new(x, y);
            let back = cam.screen_to_world(cam.world_to_screen(wsp));
            prop_assert!((back - wsp).length() < 1e-2);
        }
    }
}
