use crate::event::Key;

/// Held-key movement state for a controllable body.
///
/// W/S move forward/back, A/D strafe, E/Q rise/sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementIntent {
    /// Update from a key event. Returns `false` for keys that are not
    /// movement keys.
    pub fn apply_key(&mut self, key: Key, pressed: bool) -> bool {
        let Key::Char(c) = key.normalized() else {
            return false;
        };
        let slot = match c {
            'w' => &mut self.forward,
            's' => &mut self.backward,
            'a' => &mut self.left,
            'd' => &mut self.right,
            'e' => &mut self.up,
            'q' => &mut self.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Net forward axis in `-1..=1`.
    pub fn forward_axis(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// Net strafe axis in `-1..=1`, positive to the right.
    pub fn right_axis(&self) -> f32 {
        axis(self.right, self.left)
    }

    /// Net vertical axis in `-1..=1`.
    pub fn up_axis(&self) -> f32 {
        axis(self.up, self.down)
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
