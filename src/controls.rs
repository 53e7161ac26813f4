use std::collections::HashMap;

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// A direction the player can move in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// What a key event asks the viewer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Press(Movement),
    Release(Movement),
    Quit,
}

/// Maps physical keys to movements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    keys: HashMap<KeyCode, Movement>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::lnrs()
    }
}

impl KeyBindings {
    /// W/S forward and back, A/D left and right, Space up, Left Shift down.
    pub fn wasd() -> Self {
        Self::from_keys([
            (KeyCode::KeyW, Movement::Forward),
            (KeyCode::KeyS, Movement::Backward),
            (KeyCode::KeyA, Movement::Left),
            (KeyCode::KeyD, Movement::Right),
            (KeyCode::Space, Movement::Up),
            (KeyCode::ShiftLeft, Movement::Down),
        ])
    }

    /// L forward, N back, R left, S right, Space up, Left Shift down.
    pub fn lnrs() -> Self {
        Self::from_keys([
            (KeyCode::KeyL, Movement::Forward),
            (KeyCode::KeyN, Movement::Backward),
            (KeyCode::KeyR, Movement::Left),
            (KeyCode::KeyS, Movement::Right),
            (KeyCode::Space, Movement::Up),
            (KeyCode::ShiftLeft, Movement::Down),
        ])
    }

    pub fn from_keys(keys: impl IntoIterator<Item = (KeyCode, Movement)>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Bind `key` to `movement`, replacing any earlier binding for that key.
    pub fn bind(mut self, key: KeyCode, movement: Movement) -> Self {
        self.keys.insert(key, movement);
        self
    }

    pub fn movement_for(&self, key: KeyCode) -> Option<Movement> {
        self.keys.get(&key).copied()
    }
}

/// Turns key events into [`Command`]s.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    bindings: KeyBindings,
}

impl Controls {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Translate one key event. Auto-repeated presses yield nothing.
    pub fn key_event(&self, key: KeyCode, state: ElementState, repeat: bool) -> Option<Command> {
        if repeat {
            return None;
        }

        match state {
            ElementState::Pressed if key == KeyCode::Escape => Some(Command::Quit),
            ElementState::Pressed => self.bindings.movement_for(key).map(Command::Press),
            ElementState::Released => self.bindings.movement_for(key).map(Command::Release),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lnrs_is_the_default() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings, KeyBindings::lnrs());
        assert_eq!(bindings.movement_for(KeyCode::KeyL), Some(Movement::Forward));
        assert_eq!(bindings.movement_for(KeyCode::KeyW), None);
    }

    #[test]
    fn wasd_layout() {
        let bindings = KeyBindings::wasd();
        assert_eq!(bindings.movement_for(KeyCode::KeyW), Some(Movement::Forward));
        assert_eq!(bindings.movement_for(KeyCode::KeyD), Some(Movement::Right));
        assert_eq!(bindings.movement_for(KeyCode::KeyL), None);
    }

    #[test]
    fn lnrs_layout() {
        let bindings = KeyBindings::lnrs();
        assert_eq!(bindings.movement_for(KeyCode::KeyL), Some(Movement::Forward));
        assert_eq!(bindings.movement_for(KeyCode::KeyN), Some(Movement::Backward));
        assert_eq!(bindings.movement_for(KeyCode::KeyR), Some(Movement::Left));
        assert_eq!(bindings.movement_for(KeyCode::KeyS), Some(Movement::Right));
        assert_eq!(bindings.movement_for(KeyCode::Space), Some(Movement::Up));
        assert_eq!(bindings.movement_for(KeyCode::ShiftLeft), Some(Movement::Down));
    }

    #[test]
    fn escape_quits_on_press_only() {
        let controls = Controls::default();
        assert_eq!(
            controls.key_event(KeyCode::Escape, ElementState::Pressed, false),
            Some(Command::Quit)
        );
        assert_eq!(
            controls.key_event(KeyCode::Escape, ElementState::Released, false),
            None
        );
    }

    #[test]
    fn press_and_release_map_to_movements() {
        let controls = Controls::default();
        assert_eq!(
            controls.key_event(KeyCode::Space, ElementState::Pressed, false),
            Some(Command::Press(Movement::Up))
        );
        assert_eq!(
            controls.key_event(KeyCode::Space, ElementState::Released, false),
            Some(Command::Release(Movement::Up))
        );
        assert_eq!(
            controls.key_event(KeyCode::KeyQ, ElementState::Pressed, false),
            None
        );
    }

    #[test]
    fn repeats_are_ignored() {
        let controls = Controls::default();
        assert_eq!(
            controls.key_event(KeyCode::KeyL, ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn bind_overrides_a_key() {
        let bindings = KeyBindings::wasd().bind(KeyCode::KeyW, Movement::Up);
        assert_eq!(bindings.movement_for(KeyCode::KeyW), Some(Movement::Up));
    }
}
