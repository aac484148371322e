use std::collections::HashMap;

use drifter_core::player::player_inputs::{InputChannel, InputEvent, SharedInput};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    Escape,
}

// Which keys drive which input channel; several keys may share a channel
#[derive(Clone, Debug)]
pub struct KeyBindings {
    bindings: HashMap<Key, InputChannel>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            (Key::Up, InputChannel::Forward),
            (Key::W, InputChannel::Forward),
            (Key::Down, InputChannel::Backward),
            (Key::S, InputChannel::Backward),
            (Key::Left, InputChannel::Left),
            (Key::A, InputChannel::Left),
            (Key::Right, InputChannel::Right),
            (Key::D, InputChannel::Right),
        ]);
        KeyBindings { bindings }
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: Key, channel: InputChannel) {
        self.bindings.insert(key, channel);
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }

    pub fn channel(&self, key: Key) -> Option<InputChannel> {
        self.bindings.get(&key).copied()
    }

    /// Translates a key transition into an input event, or `None` for keys
    /// that aren't bound.
    pub fn event(&self, key: Key, pressed: bool) -> Option<InputEvent> {
        self.channel(key).map(|channel| {
            if pressed {
                InputEvent::pressed(channel)
            } else {
                InputEvent::released(channel)
            }
        })
    }

    // returns whether the key was bound
    pub fn on_key_down(&self, key: Key, input: &SharedInput) -> bool {
        self.forward_event(key, true, input)
    }

    pub fn on_key_up(&self, key: Key, input: &SharedInput) -> bool {
        self.forward_event(key, false, input)
    }

    fn forward_event(&self, key: Key, pressed: bool, input: &SharedInput) -> bool {
        match self.event(key, pressed) {
            Some(event) => {
                input.apply(event);
                true
            }
            None => false,
        }
    }
}
