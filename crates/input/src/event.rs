use serde::{Deserialize, Serialize};

/// A keyboard key as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character key.
    Char(char),
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Escape,
    Function(u8),
}

impl Key {
    /// Whether this is the character key `c`, ignoring case.
    pub fn is_char(self, c: char) -> bool {
        matches!(self, Self::Char(k) if k.eq_ignore_ascii_case(&c))
    }

    /// Character keys folded to lowercase; other keys unchanged.
    pub fn normalized(self) -> Self {
        match self {
            Self::Char(c) => Self::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A raw input event forwarded into the scene once per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    /// Relative pointer motion since the previous event.
    MouseMove { dx: f32, dy: f32 },
    MouseButton {
        button: MouseButton,
        pressed: bool,
        x: f32,
        y: f32,
    },
    /// The drawable surface changed size, in pixels.
    Resize { width: u32, height: u32 },
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        Self::Key { key, pressed: true }
    }

    pub fn key_up(key: Key) -> Self {
        Self::Key {
            key,
            pressed: false,
        }
    }

    /// Aspect ratio carried by a resize event. A zero height yields 1.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match *self {
            Self::Resize { width, height } if height > 0 => Some(width as f32 / height as f32),
            Self::Resize { .. } => Some(1.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_keys_ignore_case() {
        assert!(Key::Char('W').is_char('w'));
        assert!(Key::Char('w').is_char('W'));
        assert!(!Key::Char('a').is_char('w'));
        assert!(!Key::Left.is_char('w'));
        assert_eq!(Key::Char('Q').normalized(), Key::Char('q'));
        assert_eq!(Key::PageUp.normalized(), Key::PageUp);
    }

    #[test]
    fn resize_aspect_ratio() {
        let e = InputEvent::Resize {
            width: 800,
            height: 600,
        };
        assert_eq!(e.aspect_ratio(), Some(800.0 / 600.0));
        let degenerate = InputEvent::Resize {
            width: 800,
            height: 0,
        };
        assert_eq!(degenerate.aspect_ratio(), Some(1.0));
        assert_eq!(InputEvent::key_down(Key::Escape).aspect_ratio(), None);
    }
}
