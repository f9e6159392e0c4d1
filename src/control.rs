//! Control input contract
//!
//! One [`ControlInput`] arrives per step. Tilt devices deliver a target
//! motor speed directly on `x_rot`, already clamped to `[-30, 0]` upstream
//! (negative drives forward). Keyboards deliver discrete key states that
//! are routed to the same channel here.

use crate::rig::LeanDirection;

/// Normalized motor-speed channel shared by all input sources.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSignal {
    /// True when input comes from a tilt device rather than keys.
    pub device: bool,
    /// Target motor angular speed in `[-30, 0]`.
    pub x_rot: f32,
}

/// Discrete key states for keyboard control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Per-step control input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    pub signal: ControlSignal,
    pub keys: KeyState,
}

/// What the current input asks of the rig this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCommand {
    /// `Some` toggles the motor; `None` leaves the enabled flag alone
    /// (device mode, where only reset touches it).
    pub motor_enabled: Option<bool>,
    /// Target motor angular speed, forwarded verbatim to the wheel motor.
    pub target_speed: f32,
    pub lean: Option<LeanDirection>,
}

/// Route a control input onto the motor/lean channels.
///
/// Keyboard mapping: up drives forward at full speed, down holds the rear
/// brake, neither switches the motor off; left and right shift the
/// rider's weight.
pub fn resolve(input: &ControlInput, full_speed: f32) -> ControlCommand {
    if input.signal.device {
        return ControlCommand {
            motor_enabled: None,
            target_speed: input.signal.x_rot,
            lean: None,
        };
    }

    let keys = input.keys;
    let (motor_enabled, target_speed) = if keys.down {
        (Some(true), 0.0)
    } else if keys.up {
        (Some(true), -full_speed)
    } else {
        (Some(false), 0.0)
    };

    let lean = match (keys.left, keys.right) {
        (true, false) => Some(LeanDirection::Backward),
        (false, true) => Some(LeanDirection::Forward),
        _ => None,
    };

    ControlCommand {
        motor_enabled,
        target_speed,
        lean,
    }
}
