//! Platform-agnostic input handling
use std::collections::{HashSet, VecDeque};

/// Player intents, applied by the simulation in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// rotate by the given degrees
    Look { delta_yaw: f32, delta_pitch: f32 },
    /// raw pointer movement in pixels, positive `dy` is up
    MouseMove { dx: f32, dy: f32 },
    /// each axis in {-1, 0, 1}; -1 is forward / left
    SetStrafe { forward_back: i8, left_right: i8 },
    Jump,
    ToggleFly,
    SelectSlot(usize),
    PlaceBlock,
    RemoveBlock,
}

/// Events waiting for the next simulation tick
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Key mapping configuration
#[derive(Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub jump: String,
    pub toggle_fly: String,
    /// keys selecting inventory slots 0, 1, 2, ...
    pub slots: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            jump: " ".to_string(),
            toggle_fly: "Tab".to_string(),
            slots: (1..=9).map(|n| n.to_string()).collect(),
        }
    }
}

/// Turns key and button presses into [`InputEvent`]s.
///
/// Movement keys are tracked while held, so releasing one key of a pair keeps the other in effect.
pub struct InputProcessor {
    bindings: KeyBindings,
    pressed_keys: HashSet<String>,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed_keys: HashSet::new(),
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Release every held key, e.g. when the window loses focus
    pub fn clear_keys(&mut self) -> InputEvent {
        self.pressed_keys.clear();
        self.strafe()
    }

    pub fn key_down(&mut self, key: &str) -> Option<InputEvent> {
        let key = key.to_lowercase();
        let b = &self.bindings;
        if key == b.jump {
            return Some(InputEvent::Jump);
        }
        if key == b.toggle_fly.to_lowercase() {
            return Some(InputEvent::ToggleFly);
        }
        if let Some(slot) = b.slots.iter().position(|s| *s == key) {
            return Some(InputEvent::SelectSlot(slot));
        }
        if self.is_movement(&key) {
            self.pressed_keys.insert(key);
            return Some(self.strafe());
        }
        None
    }

    pub fn key_up(&mut self, key: &str) -> Option<InputEvent> {
        let key = key.to_lowercase();
        if self.pressed_keys.remove(&key) {
            return Some(self.strafe());
        }
        None
    }

    pub fn button_down(&self, button: MouseButton) -> Option<InputEvent> {
        match button {
            MouseButton::Left => Some(InputEvent::RemoveBlock),
            MouseButton::Right => Some(InputEvent::PlaceBlock),
            MouseButton::Middle => None,
        }
    }

    fn is_movement(&self, key: &str) -> bool {
        let b = &self.bindings;
        [&b.forward, &b.backward, &b.left, &b.right]
            .iter()
            .any(|k| k.as_str() == key)
    }

    fn strafe(&self) -> InputEvent {
        let b = &self.bindings;
        let axis = |neg: &str, pos: &str| {
            self.is_key_pressed(pos) as i8 - self.is_key_pressed(neg) as i8
        };
        InputEvent::SetStrafe {
            forward_back: axis(&b.forward, &b.backward),
            left_right: axis(&b.left, &b.right),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
