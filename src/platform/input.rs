//! Key and pointer mapping
//!
//! Browser events are translated to [`Action`]s through per-game
//! [`Bindings`]. Steering is level-triggered (held while the key or pointer is
//! down); every other action is an edge consumed once.

use crate::sim::TickInput;

/// Game-level intent behind a key or pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Jump in Cake Run; start or restart from the overlays
    Primary,
    SteerLeft,
    SteerRight,
    Pause,
    Restart,
}

/// Which game's control scheme is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bindings {
    CakeRun,
    Drive,
}

/// Normalize a `KeyboardEvent.key` value
fn normalize(key: &str) -> String {
    match key {
        " " | "Spacebar" => "space".to_string(),
        _ => key.to_ascii_lowercase(),
    }
}

impl Bindings {
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        let key = normalize(key);
        match self {
            Bindings::CakeRun => match key.as_str() {
                "space" | "arrowup" | "w" | "enter" => Some(Action::Primary),
                "p" | "escape" => Some(Action::Pause),
                "r" => Some(Action::Restart),
                _ => None,
            },
            Bindings::Drive => match key.as_str() {
                "arrowleft" | "a" => Some(Action::SteerLeft),
                "arrowright" | "d" => Some(Action::SteerRight),
                "space" | "p" | "escape" => Some(Action::Pause),
                "r" => Some(Action::Restart),
                "enter" => Some(Action::Primary),
                _ => None,
            },
        }
    }

    /// Map a press at `x` on a surface `width` wide
    pub fn action_for_pointer(&self, x: f32, width: f32) -> Action {
        match self {
            Bindings::CakeRun => Action::Primary,
            Bindings::Drive => {
                if x < width / 2.0 {
                    Action::SteerLeft
                } else {
                    Action::SteerRight
                }
            }
        }
    }
}

/// Input accumulated between frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// One-shot primary edge
    pub primary: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Primary => self.primary = true,
            Action::SteerLeft => self.left = true,
            Action::SteerRight => self.right = true,
            Action::Pause | Action::Restart => {}
        }
    }

    pub fn release(&mut self, action: Action) {
        match action {
            Action::SteerLeft => self.left = false,
            Action::SteerRight => self.right = false,
            _ => {}
        }
    }

    /// Drop every held key (pointer lifted, focus lost)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn clear_one_shots(&mut self) {
        self.primary = false;
    }

    pub fn tick_input(&self) -> TickInput {
        let steer = (self.right as i32 - self.left as i32) as f32;
        TickInput {
            jump: self.primary,
            steer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cake_run_keys() {
        let b = Bindings::CakeRun;
        assert_eq!(b.action_for_key(" "), Some(Action::Primary));
        assert_eq!(b.action_for_key("ArrowUp"), Some(Action::Primary));
        assert_eq!(b.action_for_key("W"), Some(Action::Primary));
        assert_eq!(b.action_for_key("Escape"), Some(Action::Pause));
        assert_eq!(b.action_for_key("r"), Some(Action::Restart));
        assert_eq!(b.action_for_key("ArrowLeft"), None);
    }

    #[test]
    fn test_drive_keys() {
        let b = Bindings::Drive;
        assert_eq!(b.action_for_key("ArrowLeft"), Some(Action::SteerLeft));
        assert_eq!(b.action_for_key("D"), Some(Action::SteerRight));
        assert_eq!(b.action_for_key(" "), Some(Action::Pause));
        assert_eq!(b.action_for_key("Enter"), Some(Action::Primary));
        assert_eq!(b.action_for_key("x"), None);
    }

    #[test]
    fn test_pointer_halves() {
        assert_eq!(Bindings::Drive.action_for_pointer(10.0, 520.0), Action::SteerLeft);
        assert_eq!(Bindings::Drive.action_for_pointer(400.0, 520.0), Action::SteerRight);
        assert_eq!(Bindings::CakeRun.action_for_pointer(400.0, 960.0), Action::Primary);
    }

    #[test]
    fn test_held_and_one_shot() {
        let mut input = InputState::default();
        input.press(Action::SteerLeft);
        input.press(Action::Primary);
        assert_eq!(input.tick_input(), TickInput { jump: true, steer: -1.0 });

        input.clear_one_shots();
        assert_eq!(input.tick_input(), TickInput { jump: false, steer: -1.0 });

        input.press(Action::SteerRight);
        assert_eq!(input.tick_input().steer, 0.0);

        input.release(Action::SteerLeft);
        assert_eq!(input.tick_input().steer, 1.0);

        input.release_all();
        assert_eq!(input.tick_input(), TickInput::default());
    }
}
