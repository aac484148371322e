use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

// analog strength of a channel, 0 = released, 1 = fully pressed
pub type Modifier = f32;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum InputChannel {
    Left,
    Right,
    Forward,
    Backward,
}

// One write to one channel, as produced by the input layer (key press,
// key release, stick movement...)
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct InputEvent {
    pub channel: InputChannel,
    pub value: Modifier,
}

impl InputEvent {
    pub fn pressed(channel: InputChannel) -> Self {
        InputEvent {
            channel,
            value: 1.0,
        }
    }

    pub fn released(channel: InputChannel) -> Self {
        InputEvent {
            channel,
            value: 0.0,
        }
    }
}

// PlayerInputs is what the controller reads at the start of a tick: four
// independent channels, each either held (1.0), released (0.0) or somewhere
// in between for analog devices
#[derive(Copy, Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct InputState {
    pub left: Modifier,
    pub right: Modifier,
    pub forward: Modifier,
    pub backward: Modifier,
}

fn sanitize(value: Modifier) -> Modifier {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, channel: InputChannel, value: Modifier) {
        let value = sanitize(value);
        match channel {
            InputChannel::Left => self.left = value,
            InputChannel::Right => self.right = value,
            InputChannel::Forward => self.forward = value,
            InputChannel::Backward => self.backward = value,
        }
    }

    pub fn set_pressed(&mut self, channel: InputChannel, pressed: bool) {
        self.set(channel, if pressed { 1.0 } else { 0.0 });
    }

    pub fn apply(&mut self, event: InputEvent) {
        self.set(event.channel, event.value);
    }

    /// Steering intent: positive turns left, negative turns right. Holding
    /// both directions cancels out to zero.
    pub fn turn(&self) -> f64 {
        self.left as f64 - self.right as f64
    }

    /// Throttle intent: positive drives forward, negative reverses/brakes.
    pub fn throttle(&self) -> f64 {
        self.forward as f64 - self.backward as f64
    }

    pub fn is_idle(&self) -> bool {
        self.turn() == 0.0 && self.throttle() == 0.0
    }
}

/// Last-write-wins input cell shared between whoever receives input events
/// and the simulation tick. The tick only ever reads a copy taken with
/// [`SharedInput::snapshot`], so writers never observe a half-finished tick.
#[derive(Clone, Default, Debug)]
pub struct SharedInput {
    state: Arc<Mutex<InputState>>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    // every write is a single f32 store, so a poisoned lock still holds a
    // usable state
    fn lock(&self) -> MutexGuard<'_, InputState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set(&self, channel: InputChannel, value: Modifier) {
        self.lock().set(channel, value);
    }

    pub fn set_pressed(&self, channel: InputChannel, pressed: bool) {
        self.lock().set_pressed(channel, pressed);
    }

    pub fn apply(&self, event: InputEvent) {
        self.lock().apply(event);
    }

    pub fn snapshot(&self) -> InputState {
        *self.lock()
    }

    pub fn clear(&self) {
        *self.lock() = InputState::default();
    }
}
