//! types and constants facillitating geometry and transforms
//! AnchorSpace -> LocalSpace -> WorldSpace -> ScreenSpace

use euclid::{Angle, Transform2D};
use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote normalized pin anchors, [-1, 1] on both axes
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct AnchorSpace;

/// PhantomData tag used to denote a component's own frame: unrotated, centered on the component, in world units
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct LocalSpace;

/// PhantomData tag used to denote the f32 space in which the circuit exists
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct WorldSpace;

/// PhantomData tag used to denote the patch of screen being drawn on (f32)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct ScreenSpace;

/// AnchorSpace Point
pub type ASPoint = euclid::Point2D<f32, AnchorSpace>;
/// LocalSpace Point
pub type LSPoint = euclid::Point2D<f32, LocalSpace>;
/// WorldSpace Point
pub type WSPoint = euclid::Point2D<f32, WorldSpace>;
/// ScreenSpace Point
pub type SCPoint = euclid::Point2D<f32, ScreenSpace>;

/// WorldSpace Vector
pub type WSVec = euclid::Vector2D<f32, WorldSpace>;
/// ScreenSpace Vector
pub type SCVec = euclid::Vector2D<f32, ScreenSpace>;

/// LocalSpace Box
pub type LSBox = euclid::Box2D<f32, LocalSpace>;
/// WorldSpace Box
pub type WSBox = euclid::Box2D<f32, WorldSpace>;
/// ScreenSpace Box
pub type SCBox = euclid::Box2D<f32, ScreenSpace>;

/// WorldSpace Size
pub type WSSize = euclid::Size2D<f32, WorldSpace>;

/// anchor to local space transform, i.e. scaling by half the scaled component size
pub type ALTransform = Transform2D<f32, AnchorSpace, LocalSpace>;
/// local to world space transform, i.e. rotation about the component center then translation to its position
pub type LWTransform = Transform2D<f32, LocalSpace, WorldSpace>;
/// world to local space transform
pub type WLTransform = Transform2D<f32, WorldSpace, LocalSpace>;
/// world to screen space transform
pub type WSTransform = Transform2D<f32, WorldSpace, ScreenSpace>;
/// screen to world space transform
pub type SWTransform = Transform2D<f32, ScreenSpace, WorldSpace>;

/// rotation of `deg` degrees as an euclid angle
pub fn angle_deg(deg: f32) -> Angle<f32> {
    Angle::degrees(deg)
}

/// world to screen transform with locked aspect ratio
#[derive(Debug, Clone, Copy)]
pub struct WSTransformLockedAspect(WSTransform);
impl WSTransformLockedAspect {
    /// returns the identity transform of this type
    pub fn identity() -> Self {
        Self(WSTransform::identity())
    }
    /// get the scale factor of the transform
    pub fn scale(&self) -> f32 {
        self.0.m11.abs()
    }
    /// pre_translate
    pub fn pre_translate(&self, v: WSVec) -> Self {
        Self(self.0.pre_translate(v))
    }
    /// then_translate
    pub fn then_translate(&self, v: SCVec) -> Self {
        Self(self.0.then_translate(v))
    }
    /// then scale
    pub fn then_scale(&self, scale: f32) -> Self {
        Self(self.0.then_scale(scale, scale))
    }
    pub fn transform_point(&self, wsp: WSPoint) -> SCPoint {
        self.0.transform_point(wsp)
    }
    /// returns transform and scale such that WSBox (circuit bounds) fit inside SCBox (screen bounds)
    pub fn fit_bounds(scb: SCBox, wsb: WSBox, min_zoom: f32, max_zoom: f32) -> Self {
        let mut wst = WSTransform::identity();

        let s = (scb.height() / wsb.height())
            .min(scb.width() / wsb.width())
            .clamp(min_zoom, max_zoom);
        wst = wst.then_scale(s, s);
        // vector from wsb center to scb center
        let v = scb.center() - wst.transform_point(wsb.center());
        wst = wst.then_translate(v);

        Self(wst)
    }
    /// return the underlying transform
    pub fn transform(&self) -> WSTransform {
        self.0
    }
    /// return the inverse of the underlying transform, none if the scale collapsed to zero
    pub fn inverse_transform(&self) -> Option<SWTransform> {
        self.0.inverse()
    }
}
