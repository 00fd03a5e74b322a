use galileo::control::{EventPropagation, UserEvent, UserEventHandler};
use galileo::Map;

/// Swallows mouse wheel events so that the map controller does not zoom on scroll.
///
/// Must be registered before the map controller. Dragging and pinch zoom are not affected.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollZoomLock;

impl UserEventHandler for ScrollZoomLock {
    fn handle(&self, event: &UserEvent, _map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::Scroll(..) => EventPropagation::Stop,
            _ => EventPropagation::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use galileo::control::{MouseButtonsState, MouseEvent};
    use galileo::galileo_types::cartesian::Point2;
    use galileo::MapBuilder;

    use super::*;

    fn mouse_event() -> MouseEvent {
        MouseEvent {
            screen_pointer_position: Point2::new(10.0, 10.0),
            buttons: MouseButtonsState::default(),
        }
    }

    #[test]
    fn scroll_is_stopped() {
        let mut map = MapBuilder::default().build();
        let resolution = map.view().resolution();

        let propagation = ScrollZoomLock.handle(&UserEvent::Scroll(1.0, mouse_event()), &mut map);
        assert!(matches!(propagation, EventPropagation::Stop));
        assert_eq!(map.view().resolution(), resolution);
    }

    #[test]
    fn other_events_propagate() {
        let mut map = MapBuilder::default().build();
        let propagation = ScrollZoomLock.handle(&UserEvent::PointerMoved(mouse_event()), &mut map);
        assert!(matches!(propagation, EventPropagation::Propagate));
    }
}
