//! The articulated motorcycle + rider rig
//!
//! Nine dynamic bodies joined by twelve constraints, built in dependency
//! order: bike bodies first, then their permanent joints (which anchor at
//! world-space points of already-placed bodies), then the rider bodies, then
//! the three detachable joints binding rider to chassis. Detaching destroys
//! exactly those three; `reset` recreates them with the same anchor
//! derivation used at construction.

use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use crate::consts::{DEFAULT_ORIGIN, PIXELS_PER_METER};
use crate::physics::{BodyKind, JointRef, Material, PartDef, PhysicsError, PhysicsWorld, ShapeDesc};
use crate::tuning::Tuning;

// Pixel offsets of every part from the spawn origin (the chassis position),
// and fixed initial rotations in degrees.
const FRONT_WHEEL_OFFSET: Vec2 = Vec2::new(108.0, 170.0);
const FRONT_FORK_OFFSET: Vec2 = Vec2::new(108.0, 160.0);
const REAR_WHEEL_OFFSET: Vec2 = Vec2::new(-21.0, 98.0);
const REAR_FORK_OFFSET: Vec2 = Vec2::new(4.0, 106.0);
const CHASSIS_OFFSET: Vec2 = Vec2::new(0.0, 0.0);
const TORSO_OFFSET: Vec2 = Vec2::new(50.0, 34.0);
const HEAD_OFFSET: Vec2 = Vec2::new(85.0, -2.0);
const HAND_OFFSET: Vec2 = Vec2::new(94.0, 52.0);
const ARM_OFFSET: Vec2 = Vec2::new(70.0, 25.0);

const REAR_FORK_ANGLE_DEG: f32 = 10.0;
const CHASSIS_ANGLE_DEG: f32 = 27.0;
const HEAD_ANGLE_DEG: f32 = 35.0;
const HAND_ANGLE_DEG: f32 = 45.0;
const ARM_ANGLE_DEG: f32 = 45.0;

// Suspension geometry. The distance springs hang the chassis 0.4 m above
// the fork/swingarm centers; the prismatic link bounds fork travel.
const SUSPENSION_DROP: f32 = 0.4 * PIXELS_PER_METER;
const SUSPENSION_TRAVEL: f32 = 0.2 * PIXELS_PER_METER;
const FRONT_SUSPENSION_HZ: f32 = 4.0;
const REAR_SUSPENSION_HZ: f32 = 7.0;
const SUSPENSION_DAMPING: f32 = 0.1;

// Rider grip anchors, local to hand/arm bodies (pixels).
const HAND_GRIP_LOCAL: Vec2 = Vec2::new(17.06, 4.26);
const TETHER_HAND_LOCAL: Vec2 = Vec2::new(-17.0, 4.26);
const ARM_SHOULDER_LOCAL: Vec2 = Vec2::new(-21.33, 4.26);
const ARM_WRIST_LOCAL: Vec2 = Vec2::new(21.33, 4.26);
const TORSO_HIP_DROP: f32 = 30.0;
const TETHER_REST: f32 = 40.0;
const TETHER_HZ: f32 = 10.0;
const TETHER_DAMPING: f32 = 1.0;

/// Control-facing state of the rig. Not persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigState {
    pub detached: bool,
    pub motor_enabled: bool,
    pub target_angular_speed: f32,
    pub lean_torque: f32,
    /// Whether control comes from a tilt device; decides motor re-enable
    /// on reset.
    pub device_control: bool,
}

/// Per-step readings used by camera framing and audio feedback. Valid only
/// after [`ArticulatedRig::step_telemetry`] has run for the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigTelemetry {
    /// `(min x, max y)` over front wheel and chassis, in pixels.
    pub framing: Vec2,
    /// Chassis linear speed, m/s.
    pub speed: f32,
    /// Chassis angular velocity, rad/s.
    pub angular_speed: f32,
}

/// Which way the rider shifts their weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeanDirection {
    Backward,
    Forward,
}

/// Recorded initial pose, recomputed when a course defines a custom spawn.
#[derive(Debug, Clone, Copy)]
struct InitialPose {
    front_wheel: Vec2,
    front_fork: Vec2,
    rear_wheel: Vec2,
    rear_fork: Vec2,
    chassis: Vec2,
    torso: Vec2,
    head: Vec2,
    hand: Vec2,
    arm: Vec2,
}

impl InitialPose {
    fn from_origin(origin: Vec2) -> Self {
        Self {
            front_wheel: origin + FRONT_WHEEL_OFFSET,
            front_fork: origin + FRONT_FORK_OFFSET,
            rear_wheel: origin + REAR_WHEEL_OFFSET,
            rear_fork: origin + REAR_FORK_OFFSET,
            chassis: origin + CHASSIS_OFFSET,
            torso: origin + TORSO_OFFSET,
            head: origin + HEAD_OFFSET,
            hand: origin + HAND_OFFSET,
            arm: origin + ARM_OFFSET,
        }
    }
}

/// The motorcycle and rider as one logical unit inside a [`PhysicsWorld`].
pub struct ArticulatedRig {
    front_wheel: RigidBodyHandle,
    front_fork: RigidBodyHandle,
    rear_wheel: RigidBodyHandle,
    rear_fork: RigidBodyHandle,
    chassis: RigidBodyHandle,
    torso: RigidBodyHandle,
    head: RigidBodyHandle,
    hand: RigidBodyHandle,
    arm: RigidBodyHandle,

    motor: JointRef,
    hand_to_chassis: Option<JointRef>,
    rider_to_chassis: Option<JointRef>,
    tether: Option<JointRef>,

    pose: InitialPose,
    spawn_origin: Vec2,
    state: RigState,
    telemetry: RigTelemetry,

    motor_max_torque: f32,
    lean_torque_rider: f32,
    lean_torque_chassis: f32,
}

impl ArticulatedRig {
    /// Build the full rig at the default spawn origin. Any part failing to
    /// build aborts construction; no partially wired rig is left behind in
    /// a world the caller keeps.
    pub fn build(world: &mut PhysicsWorld, tuning: &Tuning) -> Result<Self, PhysicsError> {
        let pose = InitialPose::from_origin(DEFAULT_ORIGIN);

        let front_wheel = world.create_part(&PartDef {
            kind: BodyKind::Wheel,
            dynamic: true,
            pos: pose.front_wheel,
            angle: 0.0,
            shapes: vec![ShapeDesc::Circle { radius: 35.0 }],
            material: Material {
                density: 0.1,
                friction: 0.9,
                restitution: 0.2,
            },
        })?;
        let front_fork = world.create_part(&PartDef {
            kind: BodyKind::Fork,
            dynamic: true,
            pos: pose.front_fork,
            angle: 0.0,
            shapes: vec![ShapeDesc::Rect {
                width: 20.53,
                height: 21.33,
            }],
            material: Material {
                density: 0.8,
                friction: 1.0,
                restitution: 0.2,
            },
        })?;
        let rear_wheel = world.create_part(&PartDef {
            kind: BodyKind::Wheel,
            dynamic: true,
            pos: pose.rear_wheel,
            angle: 0.0,
            shapes: vec![ShapeDesc::Circle { radius: 32.0 }],
            material: Material {
                density: 0.4,
                friction: 1.0,
                restitution: 0.2,
            },
        })?;
        let rear_fork = world.create_part(&PartDef {
            kind: BodyKind::Fork,
            dynamic: true,
            pos: pose.rear_fork,
            angle: REAR_FORK_ANGLE_DEG.to_radians(),
            shapes: vec![ShapeDesc::Rect {
                width: 64.0,
                height: 17.0,
            }],
            material: Material {
                density: 0.5,
                friction: 1.0,
                restitution: 0.2,
            },
        })?;
        let chassis = world.create_part(&PartDef {
            kind: BodyKind::ChassisBody,
            dynamic: true,
            pos: pose.chassis,
            angle: CHASSIS_ANGLE_DEG.to_radians(),
            shapes: chassis_shapes(),
            material: Material {
                density: 0.5,
                friction: 1.0,
                restitution: 0.2,
            },
        })?;

        // Permanent bike joints. Anchors come from the freshly placed
        // bodies, so creation order is load-bearing.
        let motor = world.create_motorized_revolute(
            rear_wheel,
            rear_fork,
            world.world_center(rear_wheel),
            tuning.motor_max_torque,
        );
        world.create_revolute(
            rear_fork,
            chassis,
            world.world_center(rear_fork) + Vec2::new(32.0, 13.5),
        );
        world.create_revolute(front_wheel, front_fork, world.world_center(front_wheel));
        world.create_spring(
            chassis,
            front_fork,
            world.world_center(front_fork) + Vec2::new(0.0, SUSPENSION_DROP),
            world.world_center(front_fork),
            FRONT_SUSPENSION_HZ,
            SUSPENSION_DAMPING,
            None,
        );
        world.create_spring(
            chassis,
            rear_fork,
            world.world_center(rear_fork) + Vec2::new(0.0, SUSPENSION_DROP),
            world.world_center(rear_fork),
            REAR_SUSPENSION_HZ,
            SUSPENSION_DAMPING,
            None,
        );
        world.create_prismatic(
            chassis,
            front_fork,
            world.world_center(chassis),
            Vec2::new(0.0, 1.0),
            [-SUSPENSION_TRAVEL, SUSPENSION_TRAVEL],
        );

        let rider_material = Material {
            density: 0.1,
            friction: 1.0,
            restitution: 0.2,
        };
        let torso = world.create_part(&PartDef {
            kind: BodyKind::Human,
            dynamic: true,
            pos: pose.torso,
            angle: 0.0,
            shapes: vec![ShapeDesc::Rect {
                width: 17.0,
                height: 64.0,
            }],
            material: rider_material,
        })?;
        let head = world.create_part(&PartDef {
            kind: BodyKind::Head,
            dynamic: true,
            pos: pose.head,
            angle: HEAD_ANGLE_DEG.to_radians(),
            shapes: vec![ShapeDesc::Rect {
                width: 38.4,
                height: 29.9,
            }],
            material: rider_material,
        })?;
        let hand = world.create_part(&PartDef {
            kind: BodyKind::Hand,
            dynamic: true,
            pos: pose.hand,
            angle: HAND_ANGLE_DEG.to_radians(),
            shapes: vec![ShapeDesc::Rect {
                width: 34.13,
                height: 8.53,
            }],
            material: rider_material,
        })?;
        let arm = world.create_part(&PartDef {
            kind: BodyKind::Arm,
            dynamic: true,
            pos: pose.arm,
            angle: ARM_ANGLE_DEG.to_radians(),
            shapes: vec![ShapeDesc::Rect {
                width: 42.67,
                height: 8.53,
            }],
            material: rider_material,
        })?;

        // Permanent rider joints.
        world.create_weld(head, torso, world.world_center(head));
        world.create_revolute(torso, arm, world.world_point(arm, ARM_SHOULDER_LOCAL));
        world.create_revolute(arm, hand, world.world_point(arm, ARM_WRIST_LOCAL));

        let mut rig = Self {
            front_wheel,
            front_fork,
            rear_wheel,
            rear_fork,
            chassis,
            torso,
            head,
            hand,
            arm,
            motor,
            hand_to_chassis: None,
            rider_to_chassis: None,
            tether: None,
            pose,
            spawn_origin: DEFAULT_ORIGIN,
            state: RigState::default(),
            telemetry: RigTelemetry::default(),
            motor_max_torque: tuning.motor_max_torque,
            lean_torque_rider: tuning.lean_torque_rider,
            lean_torque_chassis: tuning.lean_torque_chassis,
        };
        rig.attach_rider(world);
        Ok(rig)
    }

    /// Recompute the per-part initial offsets from a new spawn origin.
    /// Takes effect on the next [`Self::reset`].
    pub fn set_initial_pose(&mut self, origin: Vec2) {
        self.spawn_origin = origin;
        self.pose = InitialPose::from_origin(origin);
    }

    pub fn spawn_origin(&self) -> Vec2 {
        self.spawn_origin
    }

    /// Snap every body back to the recorded initial pose with zero
    /// velocities, recreating the rider joints if the rig was detached.
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        for part in self.parts() {
            world.zero_velocities(part);
        }

        world.set_pose(self.front_wheel, self.pose.front_wheel, 0.0);
        world.set_pose(self.front_fork, self.pose.front_fork, 0.0);
        world.set_pose(self.rear_wheel, self.pose.rear_wheel, 0.0);
        world.set_pose(
            self.rear_fork,
            self.pose.rear_fork,
            REAR_FORK_ANGLE_DEG.to_radians(),
        );
        world.set_pose(
            self.chassis,
            self.pose.chassis,
            CHASSIS_ANGLE_DEG.to_radians(),
        );
        world.set_pose(self.torso, self.pose.torso, 0.0);
        world.set_pose(self.head, self.pose.head, HEAD_ANGLE_DEG.to_radians());
        world.set_pose(self.hand, self.pose.hand, HAND_ANGLE_DEG.to_radians());
        world.set_pose(self.arm, self.pose.arm, ARM_ANGLE_DEG.to_radians());

        if self.state.detached {
            self.attach_rider(world);
            self.state.detached = false;
        }

        world.wake(self.chassis);

        if self.state.device_control {
            self.state.motor_enabled = true;
            world.set_motor(
                self.motor,
                true,
                self.state.target_angular_speed,
                self.motor_max_torque,
            );
        }
    }

    /// Destroy the three joints binding rider to chassis. A no-op when the
    /// rig is already detached.
    pub fn detach(&mut self, world: &mut PhysicsWorld) {
        if self.state.detached {
            return;
        }
        for joint in [
            self.hand_to_chassis.take(),
            self.rider_to_chassis.take(),
            self.tether.take(),
        ]
        .into_iter()
        .flatten()
        {
            world.remove_joint(joint);
        }
        self.state.detached = true;
    }

    /// Switch the motor off and drop accumulated forces, for when a
    /// transient overlay takes input focus.
    pub fn disable_control(&mut self, world: &mut PhysicsWorld) {
        self.state.motor_enabled = false;
        world.set_motor(
            self.motor,
            false,
            self.state.target_angular_speed,
            self.motor_max_torque,
        );
        world.clear_forces();
    }

    /// Shift the rider's weight: a small torque on the torso and a larger
    /// one on the chassis, same sign.
    pub fn apply_lean(&mut self, world: &mut PhysicsWorld, direction: LeanDirection) {
        let sign = match direction {
            LeanDirection::Backward => -1.0,
            LeanDirection::Forward => 1.0,
        };
        world.apply_torque(self.torso, sign * self.lean_torque_rider);
        world.apply_torque(self.chassis, sign * self.lean_torque_chassis);
        self.state.lean_torque = sign * self.lean_torque_chassis;
    }

    /// Set the rear-wheel motor's enabled flag and target angular speed.
    /// The speed is forwarded verbatim from the control signal.
    pub fn set_motor_target(&mut self, world: &mut PhysicsWorld, enabled: bool, speed: f32) {
        self.state.motor_enabled = enabled;
        self.state.target_angular_speed = speed;
        world.set_motor(self.motor, enabled, speed, self.motor_max_torque);
    }

    /// Zero the motor's target speed without touching the enabled flag.
    pub fn stop_motor(&mut self, world: &mut PhysicsWorld) {
        self.state.target_angular_speed = 0.0;
        world.set_motor(
            self.motor,
            self.state.motor_enabled,
            0.0,
            self.motor_max_torque,
        );
    }

    /// Rear brake: motor on, held at zero speed.
    pub fn rear_brake(&mut self, world: &mut PhysicsWorld) {
        self.set_motor_target(world, true, 0.0);
    }

    /// Record whether control input comes from a tilt device.
    pub fn set_device_control(&mut self, device: bool) {
        self.state.device_control = device;
    }

    /// Read integrated state for camera framing and audio feedback. Must
    /// run after the physics step, never before.
    pub fn step_telemetry(&mut self, world: &PhysicsWorld) -> RigTelemetry {
        let wheel = world.position(self.front_wheel);
        let chassis = world.position(self.chassis);
        self.telemetry = RigTelemetry {
            framing: Vec2::new(wheel.x.min(chassis.x), wheel.y.max(chassis.y)),
            speed: world.linvel(self.chassis).length(),
            angular_speed: world.angvel(self.chassis),
        };
        self.telemetry
    }

    pub fn telemetry(&self) -> RigTelemetry {
        self.telemetry
    }

    pub fn state(&self) -> RigState {
        self.state
    }

    pub fn is_detached(&self) -> bool {
        self.state.detached
    }

    pub fn chassis(&self) -> RigidBodyHandle {
        self.chassis
    }

    pub fn head(&self) -> RigidBodyHandle {
        self.head
    }

    fn parts(&self) -> [RigidBodyHandle; 9] {
        [
            self.front_wheel,
            self.front_fork,
            self.rear_wheel,
            self.rear_fork,
            self.chassis,
            self.torso,
            self.head,
            self.hand,
            self.arm,
        ]
    }

    // Creates the three detachable joints from the bodies' current poses,
    // the same derivation at construction and at post-detach reset.
    fn attach_rider(&mut self, world: &mut PhysicsWorld) {
        self.hand_to_chassis = Some(world.create_revolute(
            self.hand,
            self.chassis,
            world.world_point(self.hand, HAND_GRIP_LOCAL),
        ));
        self.rider_to_chassis = Some(world.create_revolute(
            self.torso,
            self.chassis,
            world.world_center(self.torso) + Vec2::new(0.0, TORSO_HIP_DROP),
        ));
        self.tether = Some(world.create_spring(
            self.hand,
            self.chassis,
            world.world_point(self.hand, TETHER_HAND_LOCAL),
            world.world_center(self.chassis),
            TETHER_HZ,
            TETHER_DAMPING,
            Some(TETHER_REST),
        ));
    }
}

// The chassis is a compound of four convex pieces: tail, rear, front and
// nose, in body-local pixels.
fn chassis_shapes() -> Vec<ShapeDesc> {
    vec![
        ShapeDesc::Convex {
            vertices: vec![
                Vec2::new(0.0, 22.0),
                Vec2::new(32.0, 26.0),
                Vec2::new(32.0, 32.0),
            ],
        },
        ShapeDesc::Convex {
            vertices: vec![
                Vec2::new(32.0, 26.0),
                Vec2::new(76.8, 28.8),
                Vec2::new(76.8, 64.0),
                Vec2::new(57.6, 64.0),
                Vec2::new(32.0, 32.0),
            ],
        },
        ShapeDesc::Convex {
            vertices: vec![
                Vec2::new(76.8, 28.8),
                Vec2::new(115.2, 22.4),
                Vec2::new(115.2, 89.6),
                Vec2::new(76.8, 89.6),
            ],
        },
        ShapeDesc::Convex {
            vertices: vec![
                Vec2::new(115.2, 0.0),
                Vec2::new(134.4, 0.0),
                Vec2::new(147.2, 38.4),
                Vec2::new(115.2, 86.4),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn rig_world() -> (PhysicsWorld, ArticulatedRig) {
        let tuning = Tuning::default();
        let mut world = PhysicsWorld::new(Vec2::new(0.0, tuning.gravity));
        let rig = ArticulatedRig::build(&mut world, &tuning).expect("rig builds");
        (world, rig)
    }

    fn add_ground(world: &mut PhysicsWorld, center: Vec2, width: f32) {
        world
            .create_part(&PartDef {
                kind: BodyKind::Ground,
                dynamic: false,
                pos: center,
                angle: 0.0,
                shapes: vec![ShapeDesc::Rect { width, height: 60.0 }],
                material: Material {
                    density: 1.0,
                    friction: 1.0,
                    restitution: 0.2,
                },
            })
            .expect("ground builds");
    }

    #[test]
    fn build_creates_nine_bodies_and_twelve_joints() {
        let (world, rig) = rig_world();
        assert_eq!(world.body_count(), 9);
        assert_eq!(world.joint_count(), 12);
        assert!(!rig.is_detached());
        assert_eq!(world.tag(rig.chassis()).unwrap().kind, BodyKind::ChassisBody);
        assert_eq!(world.tag(rig.head()).unwrap().kind, BodyKind::Head);
        // Compound chassis carries no rectangle extent; the head does.
        assert_eq!(world.tag(rig.chassis()).unwrap().extent, None);
        assert!(world.tag(rig.head()).unwrap().extent.is_some());
    }

    #[test]
    fn reset_restores_every_part_to_the_pose_table() {
        let (mut world, mut rig) = rig_world();

        let origin = Vec2::new(120.0, 45.0);
        rig.set_initial_pose(origin);

        // Let gravity scramble the pose first.
        for _ in 0..30 {
            world.step(SIM_DT);
        }
        rig.reset(&mut world);

        let expected = [
            (rig.front_wheel, origin + FRONT_WHEEL_OFFSET),
            (rig.front_fork, origin + FRONT_FORK_OFFSET),
            (rig.rear_wheel, origin + REAR_WHEEL_OFFSET),
            (rig.rear_fork, origin + REAR_FORK_OFFSET),
            (rig.chassis, origin + CHASSIS_OFFSET),
            (rig.torso, origin + TORSO_OFFSET),
            (rig.head, origin + HEAD_OFFSET),
            (rig.hand, origin + HAND_OFFSET),
            (rig.arm, origin + ARM_OFFSET),
        ];
        for (part, pos) in expected {
            assert!(
                (world.position(part) - pos).length() < 1e-2,
                "part at {:?}, expected {:?}",
                world.position(part),
                pos
            );
            assert!(world.linvel(part).length() < 1e-6);
            assert!(world.angvel(part).abs() < 1e-6);
        }
        assert!((world.angle(rig.chassis) - CHASSIS_ANGLE_DEG.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn detach_is_idempotent() {
        let (mut world, mut rig) = rig_world();
        assert_eq!(world.joint_count(), 12);

        rig.detach(&mut world);
        assert!(rig.is_detached());
        assert_eq!(world.joint_count(), 9);

        rig.detach(&mut world);
        assert!(rig.is_detached());
        assert_eq!(world.joint_count(), 9);
    }

    #[test]
    fn reset_reattaches_live_joints() {
        let (mut world, mut rig) = rig_world();

        rig.detach(&mut world);
        assert_eq!(world.joint_count(), 9);

        rig.reset(&mut world);
        assert!(!rig.is_detached());
        assert_eq!(world.joint_count(), 12);

        // The recreated joints are live handles, not stale ones.
        rig.detach(&mut world);
        assert!(rig.is_detached());
        assert_eq!(world.joint_count(), 9);
    }

    #[test]
    fn forward_drive_builds_up_chassis_speed() {
        let (mut world, mut rig) = rig_world();
        // A long runway under the spawn pose.
        for i in 0..6 {
            add_ground(&mut world, Vec2::new(-200.0 + 400.0 * i as f32, 320.0), 400.0);
        }

        // Settle onto the ground first.
        for _ in 0..90 {
            world.step(SIM_DT);
            rig.step_telemetry(&world);
        }

        rig.set_motor_target(&mut world, true, -30.0);
        let start_speed = rig.telemetry().speed;
        let mut max_speed = start_speed;
        for _ in 0..240 {
            world.step(SIM_DT);
            world.clear_forces();
            let t = rig.step_telemetry(&world);
            max_speed = max_speed.max(t.speed);
        }

        assert!(
            max_speed > start_speed + 0.1,
            "drive should accelerate the chassis: start {start_speed}, max {max_speed}"
        );
    }

    #[test]
    fn disable_control_switches_the_motor_off() {
        let (mut world, mut rig) = rig_world();
        rig.set_motor_target(&mut world, true, -30.0);
        assert!(rig.state().motor_enabled);

        rig.disable_control(&mut world);
        assert!(!rig.state().motor_enabled);
        // Target speed survives; only the enabled flag drops.
        assert_eq!(rig.state().target_angular_speed, -30.0);
    }

    #[test]
    fn device_control_reenables_motor_on_reset() {
        let (mut world, mut rig) = rig_world();
        rig.set_device_control(true);
        rig.disable_control(&mut world);
        assert!(!rig.state().motor_enabled);

        rig.reset(&mut world);
        assert!(rig.state().motor_enabled);
    }

    #[test]
    fn telemetry_frames_leftmost_and_lowest_reference() {
        let (world, mut rig) = rig_world();
        let t = rig.step_telemetry(&world);
        let wheel = world.position(rig.front_wheel);
        let chassis = world.position(rig.chassis);
        assert_eq!(t.framing.x, wheel.x.min(chassis.x));
        assert_eq!(t.framing.y, wheel.y.max(chassis.y));
    }
}
