//! The per-step course loop
//!
//! Owns the physics world, the rig, the placed obstacles and the contact
//! classifier, and wires them together once per fixed timestep:
//!
//! 1. advance the world by one interval;
//! 2. apply a pending rider detach (topology changes are illegal while the
//!    solver runs, so head impacts only schedule it);
//! 3. drop accumulated forces;
//! 4. update zoom and the camera transform from the previous step's
//!    telemetry;
//! 5. refresh the motor-pitch feedback value;
//! 6. read fresh rig telemetry;
//! 7. route control input to the motor and lean channels, to be consumed
//!    by the next step.

use glam::{Affine2, Vec2};

use crate::camera::CameraState;
use crate::consts::SIM_DT;
use crate::contact::{ContactClassifier, Outcome, RigPhase};
use crate::control::{self, ControlInput};
use crate::course::{CourseDef, ObstacleRecord};
use crate::obstacle::{Obstacle, ObstacleKind};
use crate::physics::{PhysicsError, PhysicsWorld};
use crate::rig::{ArticulatedRig, RigTelemetry};
use crate::tuning::Tuning;

/// Tracks which outcomes already fired this attempt, so each reaches the
/// surrounding game at most once.
#[derive(Debug, Clone, Copy, Default)]
struct OutcomeLatch {
    win: bool,
    head_fail: bool,
    tire_fail: bool,
}

impl OutcomeLatch {
    /// True the first time an outcome passes through, false afterwards.
    fn admit(&mut self, outcome: Outcome) -> bool {
        let slot = match outcome {
            Outcome::Win => &mut self.win,
            Outcome::HeadFail => &mut self.head_fail,
            Outcome::TireFail => &mut self.tire_fail,
        };
        !std::mem::replace(slot, true)
    }
}

/// One level attempt: world, rig, obstacles and the feedback loop.
pub struct CourseController {
    world: PhysicsWorld,
    rig: ArticulatedRig,
    obstacles: Vec<Obstacle>,
    classifier: ContactClassifier,
    camera: CameraState,
    tuning: Tuning,
    motor_pitch: f32,
    latch: OutcomeLatch,
}

impl CourseController {
    /// An empty course with the rig at the default spawn.
    pub fn new(tuning: Tuning) -> Result<Self, PhysicsError> {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, tuning.gravity));
        let rig = ArticulatedRig::build(&mut world, &tuning)?;
        Ok(Self {
            world,
            rig,
            obstacles: Vec::new(),
            classifier: ContactClassifier::new(),
            camera: CameraState::new(),
            tuning,
            motor_pitch: 0.0,
            latch: OutcomeLatch::default(),
        })
    }

    /// Build a course from a parsed definition: apply the spawn origin,
    /// then place every obstacle in order.
    pub fn from_course(def: &CourseDef, tuning: Tuning) -> Result<Self, PhysicsError> {
        let mut controller = Self::new(tuning)?;
        if let Some(start) = def.start {
            controller.rig.set_initial_pose(start);
            controller.rig.reset(&mut controller.world);
        }
        for record in &def.records {
            controller.add_obstacle(record.kind, record.pos, record.angle)?;
        }
        log::info!(
            "course ready: {} obstacles, spawn {:?}",
            controller.obstacles.len(),
            controller.rig.spawn_origin()
        );
        Ok(controller)
    }

    /// Place one obstacle. Construction failure aborts the placement and
    /// leaves the rest of the course untouched.
    pub fn add_obstacle(
        &mut self,
        kind: ObstacleKind,
        pos: Vec2,
        angle: f32,
    ) -> Result<Obstacle, PhysicsError> {
        let obstacle = Obstacle::spawn(&mut self.world, kind, pos, angle)?;
        self.obstacles.push(obstacle);
        Ok(obstacle)
    }

    /// Snapshot the course for saving: spawn first, then obstacles in
    /// placement order.
    pub fn course_def(&self) -> CourseDef {
        CourseDef {
            start: Some(self.rig.spawn_origin()),
            records: self
                .obstacles
                .iter()
                .map(|o| ObstacleRecord {
                    kind: o.kind,
                    pos: o.pos,
                    angle: o.angle,
                })
                .collect(),
        }
    }

    /// Advance the course by one fixed timestep, returning the outcomes
    /// that fired (each at most once per attempt).
    pub fn step(&mut self, input: &ControlInput) -> Vec<Outcome> {
        self.world.step(SIM_DT);

        for contact in self.world.drain_begin_contacts() {
            self.classifier.on_begin_contact(
                self.world.tag(contact.body_a),
                self.world.is_static(contact.body_a),
                self.world.tag(contact.body_b),
                self.world.is_static(contact.body_b),
            );
        }
        let step_outcomes = self.classifier.finish_step();
        if step_outcomes.detach {
            self.rig.detach(&mut self.world);
        }

        self.world.clear_forces();

        let telemetry = self.rig.telemetry();
        self.camera
            .update(telemetry.framing, telemetry.speed, &self.tuning);
        self.motor_pitch = telemetry.angular_speed * self.tuning.motor_pitch_scale
            + self.tuning.motor_pitch_bias;

        self.rig.step_telemetry(&self.world);

        self.apply_control(input);

        step_outcomes
            .outcomes
            .into_iter()
            .filter(|o| self.latch.admit(*o))
            .inspect(|o| log::info!("outcome: {o:?}"))
            .collect()
    }

    fn apply_control(&mut self, input: &ControlInput) {
        self.rig.set_device_control(input.signal.device);
        let command = control::resolve(input, self.tuning.full_motor_speed);

        if let Some(lean) = command.lean {
            self.rig.apply_lean(&mut self.world, lean);
        }
        let enabled = command
            .motor_enabled
            .unwrap_or(self.rig.state().motor_enabled);
        self.rig
            .set_motor_target(&mut self.world, enabled, command.target_speed);
    }

    /// Move the rig's spawn origin (editor start-marker drag). Takes
    /// effect on the next [`Self::reset`].
    pub fn set_spawn(&mut self, origin: Vec2) {
        self.rig.set_initial_pose(origin);
    }

    /// Start a fresh attempt: rig back to its initial pose, classifier
    /// riding again, outcome latches cleared.
    pub fn reset(&mut self) {
        self.rig.reset(&mut self.world);
        self.classifier.reset();
        self.latch = OutcomeLatch::default();
    }

    /// Ignore user input while an overlay owns the screen.
    pub fn disable_control(&mut self) {
        self.rig.disable_control(&mut self.world);
    }

    // -- telemetry reads --

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn camera_transform(&self) -> Affine2 {
        self.camera.transform(&self.tuning)
    }

    /// Pitch parameter for the engine-sound collaborator.
    pub fn motor_pitch(&self) -> f32 {
        self.motor_pitch
    }

    pub fn telemetry(&self) -> RigTelemetry {
        self.rig.telemetry()
    }

    pub fn phase(&self) -> RigPhase {
        self.classifier.phase()
    }

    pub fn rig(&self) -> &ArticulatedRig {
        &self.rig
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
