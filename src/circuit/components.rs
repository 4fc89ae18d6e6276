//! ComponentManager
//! owns every component; hands out generational ids so stale handles never alias a new component

use std::fmt;

use crate::circuit::component::Component;
use crate::circuit::geometry;
use crate::transforms::{WSPoint, WSSize};

/// stable handle to a component owned by a [`ComponentManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    index: u32,
    generation: u32,
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    component: Option<Component>,
}

#[derive(Debug, Clone)]
pub struct ComponentManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
    /// viewport size the uniform scale is measured against
    initial_viewport: WSSize,
    /// uniform scale last applied by a viewport resize
    scale: f32,
}

impl Default for ComponentManager {
    fn default() -> Self {
        ComponentManager::new(WSSize::new(800.0, 600.0))
    }
}

impl ComponentManager {
    pub fn new(initial_viewport: WSSize) -> Self {
        ComponentManager {
            slots: vec![],
            free: vec![],
            len: 0,
            initial_viewport,
            scale: 1.0,
        }
    }

    pub fn add_component(&mut self, component: Component) -> ComponentId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.component = Some(component);
            ComponentId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                component: Some(component),
            });
            ComponentId {
                index,
                generation: 0,
            }
        }
    }

    /// removes and returns the component. unknown or stale ids are a no-op.
    /// does not touch wires - detach them first, see `Circuit::remove_component`.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let component = slot.component.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(component)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.component.as_ref())
    }
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.component.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// live components in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.component.as_ref().map(|c| {
                (
                    ComponentId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    c,
                )
            })
        })
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ComponentId, &mut Component)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.component.as_mut().map(|c| {
                (
                    ComponentId {
                        index: i as u32,
                        generation,
                    },
                    c,
                )
            })
        })
    }
    pub fn ids(&self) -> Vec<ComponentId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// first component, in slot order, whose box contains the point
    pub fn component_at(&self, wsp: WSPoint) -> Option<ComponentId> {
        self.iter().find(|(_, c)| c.is_hovered(wsp)).map(|(id, _)| id)
    }

    /// evaluates every component once. second phase of a tick.
    pub fn update_components(&mut self) {
        for (_, c) in self.iter_mut() {
            c.update();
        }
    }

    pub fn initial_viewport(&self) -> WSSize {
        self.initial_viewport
    }
    pub fn set_initial_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.initial_viewport = WSSize::new(width, height);
        } else {
            tracing::warn!(width, height, "ignoring non-positive initial viewport");
        }
    }
    /// uniform scale last applied by a viewport resize, used for newly placed components
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// remaps every component from the `orig` viewport into the `new` one, keeping each
    /// position's fractional offset, and applies `min(new / initial)` as the uniform scale.
    /// topology is untouched. returns false if any dimension was non-positive.
    pub fn update_component_positions(
        &mut self,
        new_width: f32,
        new_height: f32,
        orig_width: f32,
        orig_height: f32,
    ) -> bool {
        let dims = [new_width, new_height, orig_width, orig_height];
        if dims.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            tracing::warn!(?dims, "ignoring viewport resize with non-positive dimensions");
            return false;
        }
        let scale = geometry::clamp_scale(
            (new_width / self.initial_viewport.width).min(new_height / self.initial_viewport.height),
            self.scale,
        );
        self.scale = scale;
        for (_, c) in self.iter_mut() {
            let p = c.position();
            c.set_position(WSPoint::new(
                p.x / orig_width * new_width,
                p.y / orig_height * new_height,
            ));
            c.set_scale(scale);
        }
        tracing::debug!(new_width, new_height, scale, "components rescaled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::component::ComponentKind;
    use float_cmp::approx_eq;

    fn gate(x: f32, y: f32) -> Component {
        Component::new(ComponentKind::and(), WSPoint::new(x, y))
    }

    #[test]
    fn add_and_remove() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(0.0, 0.0));
        let b = cm.add_component(gate(10.0, 0.0));
        assert_eq!(cm.len(), 2);
        assert!(cm.remove_component(a).is_some());
        assert!(cm.remove_component(a).is_none());
        assert_eq!(cm.len(), 1);
        assert!(cm.contains(b));
    }

    #[test]
    fn stale_ids_do_not_alias() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(0.0, 0.0));
        cm.remove_component(a);
        let b = cm.add_component(gate(5.0, 5.0));
        assert_ne!(a, b);
        assert!(cm.get(a).is_none());
        assert_eq!(cm.get(b).map(|c| c.position()), Some(WSPoint::new(5.0, 5.0)));
        assert_eq!(cm.iter().count(), 1);
    }

    #[test]
    fn resize_doubles_positions_and_scale() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(100.0, 150.0));
        let b = cm.add_component(gate(400.0, 300.0));
        assert!(cm.update_component_positions(1600.0, 1200.0, 800.0, 600.0));
        assert_eq!(cm.get(a).unwrap().position(), WSPoint::new(200.0, 300.0));
        assert_eq!(cm.get(b).unwrap().position(), WSPoint::new(800.0, 600.0));
        assert!(approx_eq!(f32, cm.get(a).unwrap().scale(), 2.0));
        assert!(approx_eq!(f32, cm.scale(), 2.0));
    }

    #[test]
    fn resize_uses_smaller_axis_and_is_not_cumulative() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(400.0, 300.0));
        cm.update_component_positions(1600.0, 900.0, 800.0, 600.0);
        assert!(approx_eq!(f32, cm.scale(), 1.5));
        assert_eq!(cm.get(a).unwrap().position(), WSPoint::new(800.0, 450.0));
        cm.update_component_positions(800.0, 600.0, 1600.0, 900.0);
        assert!(approx_eq!(f32, cm.scale(), 1.0));
        assert_eq!(cm.get(a).unwrap().position(), WSPoint::new(400.0, 300.0));
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(400.0, 300.0));
        assert!(!cm.update_component_positions(0.0, 600.0, 800.0, 600.0));
        assert_eq!(cm.get(a).unwrap().position(), WSPoint::new(400.0, 300.0));
        assert_eq!(cm.scale(), 1.0);
    }

    #[test]
    fn extreme_resize_keeps_scale_in_line_with_components() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(400.0, 300.0));
        assert!(cm.update_component_positions(100_000.0, 100_000.0, 800.0, 600.0));
        assert_eq!(cm.scale(), geometry::MAX_SCALE);
        assert_eq!(cm.get(a).unwrap().scale(), cm.scale());
        assert!(cm.update_component_positions(8.0, 6.0, 100_000.0, 100_000.0));
        assert_eq!(cm.scale(), geometry::MIN_SCALE);
        assert_eq!(cm.get(a).unwrap().scale(), cm.scale());
    }

    #[test]
    fn component_at_hits_first() {
        let mut cm = ComponentManager::default();
        let a = cm.add_component(gate(0.0, 0.0));
        let _b = cm.add_component(gate(20.0, 0.0));
        assert_eq!(cm.component_at(WSPoint::new(10.0, 0.0)), Some(a));
        assert_eq!(cm.component_at(WSPoint::new(500.0, 0.0)), None);
    }
}
