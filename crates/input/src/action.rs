use crate::event::{InputEvent, Key};

/// A high-level action produced from raw key presses.
///
/// Scenes consume actions for camera and render control, while movement keys
/// go to entities as raw key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Rotate the camera by yaw/pitch deltas in radians.
    RotateCamera { d_yaw: f32, d_pitch: f32 },
    /// Change the orbital distance.
    Zoom(f32),
    ToggleWireframe,
    ToggleGrid,
    /// Release a captured pointer, or quit when none is captured.
    Escape,
    /// No binding for this input.
    Noop,
}

/// Maps key presses to [`Action`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionMap {
    /// Camera rotation per arrow key press, in radians.
    pub rotate_step: f32,
    /// Orbital distance change per Page Up/Down press.
    pub zoom_step: f32,
}

impl Default for ActionMap {
    fn default() -> Self {
        Self {
            rotate_step: 0.1,
            zoom_step: 1.0,
        }
    }
}

impl ActionMap {
    /// Action for a key press. Releases never produce actions.
    pub fn map_key(&self, key: Key, pressed: bool) -> Action {
        if !pressed {
            return Action::Noop;
        }
        let step = self.rotate_step;
        match key.normalized() {
            Key::Left => Action::RotateCamera {
                d_yaw: step,
                d_pitch: 0.0,
            },
            Key::Right => Action::RotateCamera {
                d_yaw: -step,
                d_pitch: 0.0,
            },
            Key::Up => Action::RotateCamera {
                d_yaw: 0.0,
                d_pitch: step,
            },
            Key::Down => Action::RotateCamera {
                d_yaw: 0.0,
                d_pitch: -step,
            },
            Key::PageUp => Action::Zoom(-self.zoom_step),
            Key::PageDown => Action::Zoom(self.zoom_step),
            Key::Escape => Action::Escape,
            Key::Char('l') => Action::ToggleWireframe,
            Key::Char('g') => Action::ToggleGrid,
            _ => Action::Noop,
        }
    }

    pub fn map_event(&self, event: &InputEvent) -> Action {
        match *event {
            InputEvent::Key { key, pressed } => self.map_key(key, pressed),
            _ => Action::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_rotate_camera() {
        let map = ActionMap::default();
        assert_eq!(
            map.map_key(Key::Left, true),
            Action::RotateCamera {
                d_yaw: 0.1,
                d_pitch: 0.0
            }
        );
        assert_eq!(
            map.map_key(Key::Down, true),
            Action::RotateCamera {
                d_yaw: 0.0,
                d_pitch: -0.1
            }
        );
    }

    #[test]
    fn page_keys_zoom() {
        let map = ActionMap::default();
        assert_eq!(map.map_key(Key::PageUp, true), Action::Zoom(-1.0));
        assert_eq!(map.map_key(Key::PageDown, true), Action::Zoom(1.0));
    }

    #[test]
    fn releases_are_noop() {
        let map = ActionMap::default();
        assert_eq!(map.map_key(Key::Left, false), Action::Noop);
    }

    #[test]
    fn letter_bindings_ignore_case() {
        let map = ActionMap::default();
        assert_eq!(map.map_key(Key::Char('L'), true), Action::ToggleWireframe);
        assert_eq!(map.map_key(Key::Char('g'), true), Action::ToggleGrid);
        assert_eq!(map.map_key(Key::Char('w'), true), Action::Noop);
    }

    #[test]
    fn non_key_events_are_noop() {
        let map = ActionMap::default();
        let event = InputEvent::MouseMove { dx: 1.0, dy: 2.0 };
        assert_eq!(map.map_event(&event), Action::Noop);
        assert_eq!(
            map.map_event(&InputEvent::key_down(Key::Escape)),
            Action::Escape
        );
    }
}
