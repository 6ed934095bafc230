//! Input layer: keyboard, virtual joystick and direction buttons all produce
//! direction intents that pass through one [`DirectionGuard`].

pub mod guard;
pub mod handler;
pub mod joystick;
pub mod pointer;

pub use guard::DirectionGuard;
pub use handler::{InputHandler, KeyAction};
pub use joystick::Joystick;
pub use pointer::{ControlLayout, PointerInput};
