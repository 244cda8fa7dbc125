//! Logical input actions
//!
//! Key binding happens outside the simulation; the core only sees which
//! logical actions are held and which were pressed this tick.

const ACTION_COUNT: usize = 7;

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MenuUp,
    MenuDown,
    Confirm,
}

impl Action {
    fn index(self) -> usize {
        self as usize
    }
}

/// Input contract consumed by the simulation
pub trait Input {
    /// Action is currently held down
    fn held(&self, action: Action) -> bool;
    /// Action went down since the previous tick
    fn just_pressed(&self, action: Action) -> bool;
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    held: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: mark an action as held
    pub fn hold(mut self, action: Action) -> Self {
        self.set_held(action, true);
        self
    }

    /// Builder: mark an action as pressed this tick (pressing implies holding)
    pub fn press(mut self, action: Action) -> Self {
        self.pressed[action.index()] = true;
        self.held[action.index()] = true;
        self
    }

    pub fn set_held(&mut self, action: Action, down: bool) {
        self.held[action.index()] = down;
    }

    /// Key went down: held, and pressed for the next tick
    pub fn key_down(&mut self, action: Action) {
        if !self.held[action.index()] {
            self.pressed[action.index()] = true;
        }
        self.held[action.index()] = true;
    }

    pub fn key_up(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Clear one-shot presses after they have been consumed
    pub fn clear_pressed(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }
}

impl Input for TickInput {
    fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }
}
