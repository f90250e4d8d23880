use super::component::{ComponentId, LayoutComponent, Position};
use super::geometry::Point;

/// The element of a rendered component a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Rectangle(ComponentId),
    Label(ComponentId),
    StatusDot(ComponentId),
    Background,
}

/// Drag interaction: `Idle -> Dragging -> Idle`. Only one drag pointer is
/// tracked at a time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: ComponentId,
        /// Pointer position relative to the component's top-left corner.
        offset: Point,
        /// Stored corner when the drag started, before any clamping.
        origin: Point,
    },
}

/// Result of releasing an active drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRelease {
    pub id: ComponentId,
    pub origin: Point,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged(&self) -> Option<ComponentId> {
        match self {
            DragState::Dragging { id, .. } => Some(*id),
            DragState::Idle => None,
        }
    }

    /// Starts a drag when the pointer went down on a component's rectangle.
    /// `pointer` is already in canvas space.
    pub fn start(
        &mut self,
        target: PointerTarget,
        pointer: Point,
        components: &[LayoutComponent],
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let PointerTarget::Rectangle(id) = target else {
            return false;
        };
        let Some(component) = components.iter().find(|c| c.id() == id) else {
            return false;
        };

        let origin = Point::new(component.x_position, component.y_position);
        *self = DragState::Dragging {
            id,
            offset: pointer.offset_from(origin),
            origin,
        };
        true
    }

    /// New position for the dragged component given the pointer's canvas
    /// position, clamped to the canvas.
    pub fn track(&self, pointer: Point) -> Option<(ComponentId, Position)> {
        match self {
            DragState::Dragging { id, offset, .. } => {
                let corner = pointer.offset_from(*offset);
                Some((*id, Position::clamped(corner.x, corner.y)))
            }
            DragState::Idle => None,
        }
    }

    pub fn release(&mut self) -> Option<DragRelease> {
        match std::mem::take(self) {
            DragState::Dragging { id, origin, .. } => Some(DragRelease { id, origin }),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::component::{ComponentDraft, ComponentType};

    fn bed_at(x: f64, y: f64) -> Vec<LayoutComponent> {
        vec![LayoutComponent::from_draft(
            1,
            ComponentDraft::new("Bed", ComponentType::Growbed).at(x, y),
        )]
    }

    #[test]
    fn only_rectangle_starts_a_drag() {
        let components = bed_at(10.0, 10.0);
        let mut drag = DragState::Idle;

        for target in [
            PointerTarget::Label(1),
            PointerTarget::StatusDot(1),
            PointerTarget::Background,
        ] {
            assert!(!drag.start(target, Point::new(15.0, 15.0), &components));
            assert_eq!(drag.dragged(), None);
        }

        assert!(drag.start(PointerTarget::Rectangle(1), Point::new(15.0, 15.0), &components));
        assert_eq!(drag.dragged(), Some(1));
    }

    #[test]
    fn unknown_component_does_not_start() {
        let mut drag = DragState::Idle;
        assert!(!drag.start(PointerTarget::Rectangle(42), Point::default(), &bed_at(0.0, 0.0)));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn tracking_keeps_pointer_offset() {
        let components = bed_at(10.0, 10.0);
        let mut drag = DragState::Idle;
        drag.start(PointerTarget::Rectangle(1), Point::new(15.0, 12.0), &components);

        let (id, pos) = drag.track(Point::new(55.0, 72.0)).unwrap();
        assert_eq!(id, 1);
        assert_eq!((pos.x(), pos.y()), (50.0, 70.0));
    }

    #[test]
    fn tracking_clamps_at_canvas_edge() {
        let components = bed_at(10.0, 10.0);
        let mut drag = DragState::Idle;
        drag.start(PointerTarget::Rectangle(1), Point::new(15.0, 15.0), &components);

        let (_, pos) = drag.track(Point::new(3.0, 3.0)).unwrap();
        assert_eq!((pos.x(), pos.y()), (0.0, 0.0));

        for (px, py) in [(-100.0, 4.0), (0.0, -0.5), (-1e9, -1e9)] {
            let (_, pos) = drag.track(Point::new(px, py)).unwrap();
            assert!(pos.x() >= 0.0 && pos.y() >= 0.0);
        }
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut components = bed_at(10.0, 10.0);
        components.push(LayoutComponent::from_draft(
            2,
            ComponentDraft::new("Tank", ComponentType::Fishtank).at(200.0, 0.0),
        ));
        let mut drag = DragState::Idle;
        drag.start(PointerTarget::Rectangle(1), Point::new(12.0, 12.0), &components);

        assert!(!drag.start(PointerTarget::Rectangle(2), Point::new(210.0, 5.0), &components));
        assert_eq!(drag.dragged(), Some(1));
    }

    #[test]
    fn release_returns_to_idle() {
        let components = bed_at(10.0, 20.0);
        let mut drag = DragState::Idle;
        drag.start(PointerTarget::Rectangle(1), Point::new(11.0, 21.0), &components);

        let released = drag.release().unwrap();
        assert_eq!(released.id, 1);
        assert_eq!(released.origin, Point::new(10.0, 20.0));
        assert_eq!(drag, DragState::Idle);
        assert!(drag.release().is_none());
    }

    #[test]
    fn origin_keeps_negative_coordinates() {
        let components = bed_at(-20.0, 10.0);
        let mut drag = DragState::Idle;
        drag.start(PointerTarget::Rectangle(1), Point::new(-15.0, 15.0), &components);

        let (_, pos) = drag.track(Point::new(-15.0, 15.0)).unwrap();
        assert_eq!((pos.x(), pos.y()), (0.0, 10.0));
        assert_eq!(drag.release().unwrap().origin, Point::new(-20.0, 10.0));
    }
}
