//! Virtual joystick geometry
//!
//! Works in abstract pointer units with y growing downward, the same way a
//! screen reports pointer coordinates. A drag only yields a direction once the
//! knob has left the deadzone; the angle is then bucketed into four 90-degree
//! quadrants centred on the axes.

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq)]
pub struct Joystick {
    deadzone: f32,
    max_radius: f32,
    center: Option<(f32, f32)>,
    knob: (f32, f32),
}

impl Joystick {
    pub fn new(deadzone: f32, max_radius: f32) -> Self {
        Self {
            deadzone,
            max_radius,
            center: None,
            knob: (0.0, 0.0),
        }
    }

    /// Begin a drag around the pad centre
    pub fn press(&mut self, center: (f32, f32)) {
        self.center = Some(center);
        self.knob = (0.0, 0.0);
    }

    /// Follow the pointer; returns a direction once outside the deadzone
    pub fn drag_to(&mut self, pointer: (f32, f32)) -> Option<Direction> {
        let (cx, cy) = self.center?;
        let dx = pointer.0 - cx;
        let dy = pointer.1 - cy;

        let distance = (dx * dx + dy * dy).sqrt();
        let clamped = distance.min(self.max_radius);
        let angle = dy.atan2(dx);
        self.knob = (angle.cos() * clamped, angle.sin() * clamped);

        if clamped > self.deadzone {
            Some(quadrant(angle.to_degrees()))
        } else {
            None
        }
    }

    /// End the drag and recentre the knob
    pub fn release(&mut self) {
        self.center = None;
        self.knob = (0.0, 0.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.center.is_some()
    }

    /// Knob displacement from the pad centre, never longer than the max radius
    pub fn knob_offset(&self) -> (f32, f32) {
        self.knob
    }
}

/// Map an angle in degrees (screen orientation) to its quadrant
pub fn quadrant(degrees: f32) -> Direction {
    let normalized = degrees.rem_euclid(360.0);

    if !(45.0..315.0).contains(&normalized) {
        Direction::Right
    } else if normalized < 135.0 {
        Direction::Down
    } else if normalized < 225.0 {
        Direction::Left
    } else {
        Direction::Up
    }
}
