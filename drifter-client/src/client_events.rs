use crate::input::Key;

pub trait Watching {
    fn on_key_down(&mut self, key: Key);
    fn on_key_up(&mut self, key: Key);
}
