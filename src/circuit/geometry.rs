//! pure geometry: pin placement, hit predicates, wire routing, grid snapping.
//! nothing here caches - callers re-query after every transform change.

use crate::transforms::{
    angle_deg, ALTransform, ASPoint, LSBox, LSPoint, LWTransform, WLTransform, WSBox, WSPoint, WSSize,
};

/// smallest uniform scale a component may take
pub const MIN_SCALE: f32 = 0.05;
/// largest uniform scale a component may take
pub const MAX_SCALE: f32 = 20.0;

/// a component's placement in the world: center position, rotation in degrees, uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: WSPoint,
    pub rotation: f32,
    pub scale: f32,
}

impl Placement {
    pub fn new(position: WSPoint, rotation: f32, scale: f32) -> Self {
        Placement {
            position,
            rotation: wrap_degrees(rotation),
            scale: clamp_scale(scale, 1.0),
        }
    }
}

/// wraps an angle in degrees into [0, 360)
pub fn wrap_degrees(deg: f32) -> f32 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// clamps a scale into [MIN_SCALE, MAX_SCALE], falling back to `current` for non-finite input
pub fn clamp_scale(scale: f32, current: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        current
    }
}

/// half of the scaled size, i.e. the extent of the component on either side of its center
pub fn half_extent(base_size: WSSize, scale: f32) -> WSSize {
    base_size * (scale * 0.5)
}

/// transform taking normalized anchors to the component's local frame
pub fn anchor_to_local(base_size: WSSize, scale: f32) -> ALTransform {
    let half = half_extent(base_size, scale);
    ALTransform::scale(half.width, half.height)
}

/// transform taking the component's local frame to the world: rotate about the center, then translate
pub fn local_to_world(placement: &Placement) -> LWTransform {
    LWTransform::rotation(angle_deg(placement.rotation))
        .then_translate(placement.position.to_vector())
}

/// inverse of [`local_to_world`]; rotation and translation are always invertible
pub fn world_to_local(placement: &Placement) -> WLTransform {
    WLTransform::translation(-placement.position.x, -placement.position.y)
        .then_rotate(angle_deg(-placement.rotation))
}

/// world position of a pin given its normalized anchor
pub fn pin_world_position(placement: &Placement, base_size: WSSize, anchor: ASPoint) -> WSPoint {
    let lsp = anchor_to_local(base_size, placement.scale).transform_point(anchor);
    local_to_world(placement).transform_point(lsp)
}

/// true if `wsp` falls inside the rotated, scaled box of the component. edges are inclusive.
pub fn contains_point(placement: &Placement, base_size: WSSize, wsp: WSPoint) -> bool {
    let lsp: LSPoint = world_to_local(placement).transform_point(wsp);
    let half = half_extent(base_size, placement.scale);
    lsp.x.abs() <= half.width && lsp.y.abs() <= half.height
}

/// axis aligned world box enclosing the rotated component
pub fn outer_bounds(placement: &Placement, base_size: WSSize) -> WSBox {
    let half = half_extent(base_size, placement.scale);
    let lsb = LSBox::new(
        LSPoint::new(-half.width, -half.height),
        LSPoint::new(half.width, half.height),
    );
    local_to_world(placement).outer_transformed_box(&lsb)
}

/// true if `wsp` lies within a circle of `radius` around `center`, boundary inclusive
pub fn within_radius(center: WSPoint, wsp: WSPoint, radius: f32) -> bool {
    (wsp - center).square_length() <= radius * radius
}

/// approximate on-segment test: the detour through `wsp` is no longer than the segment plus `tolerance`.
/// accepts collinear points slightly past either endpoint.
pub fn on_segment_approx(wsp: WSPoint, a: WSPoint, b: WSPoint, tolerance: f32) -> bool {
    let detour = (wsp - a).length() + (wsp - b).length();
    detour - (b - a).length() <= tolerance
}

/// orthogonal two-segment route between two pins.
/// horizontal first when |dx| > |dy|, vertical first otherwise.
/// axis aligned endpoints yield the straight segment.
pub fn orthogonal_route(start: WSPoint, end: WSPoint) -> Vec<WSPoint> {
    let delta = end - start;
    let corner = if delta.x.abs() > delta.y.abs() {
        WSPoint::new(end.x, start.y)
    } else {
        WSPoint::new(start.x, end.y)
    };
    if corner == start || corner == end {
        vec![start, end]
    } else {
        vec![start, corner, end]
    }
}

/// floors each coordinate onto the grid
pub fn snap_to_grid(wsp: WSPoint, grid_size: f32) -> WSPoint {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return wsp;
    }
    WSPoint::new(
        (wsp.x / grid_size).floor() * grid_size,
        (wsp.y / grid_size).floor() * grid_size,
    )
}
