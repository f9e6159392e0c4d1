//! Rigid-body world wrapper around Rapier2D
//!
//! Owns every body, collider and joint in a course, steps the pipeline at a
//! fixed interval and collects begin-of-contact events for classification
//! after the step returns. Bodies are identified by an immutable [`BodyTag`]
//! kept in a side table; the tag is attached at creation time and never
//! changes for the body's lifetime.
//!
//! The public API speaks screen pixels (the course/editor unit); positions
//! are converted to meters at the Rapier boundary.

use std::collections::HashMap;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::prelude::*;
use thiserror::Error;

use crate::consts::PIXELS_PER_METER;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam pixels <-> nalgebra meters
// ---------------------------------------------------------------------------

fn px_to_vec(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER)
}

fn px_to_point(v: Vec2) -> nalgebra::Point2<f32> {
    nalgebra::Point2::new(v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER)
}

fn point_to_px(p: &nalgebra::Point2<f32>) -> Vec2 {
    Vec2::new(p.x * PIXELS_PER_METER, p.y * PIXELS_PER_METER)
}

fn vec_to_px(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x * PIXELS_PER_METER, v.y * PIXELS_PER_METER)
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Classification of a body, used for contact interpretation and
/// sprite-origin lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Wheel,
    Fork,
    ChassisBody,
    Human,
    Head,
    Arm,
    Hand,
    Ground,
    Jump,
    Hazard,
    Finish,
}

/// Immutable label attached to a body at creation time.
///
/// `extent` is `Some((width, height))` exactly when the body's collider is a
/// single rectangle; circles and polygon compounds leave it unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTag {
    pub kind: BodyKind,
    pub extent: Option<(f32, f32)>,
}

impl BodyTag {
    pub fn new(kind: BodyKind) -> Self {
        Self { kind, extent: None }
    }

    pub fn is(&self, kind: BodyKind) -> bool {
        self.kind == kind
    }
}

// ---------------------------------------------------------------------------
// Part descriptions
// ---------------------------------------------------------------------------

/// Collider shape in pixel units, local to the body.
#[derive(Debug, Clone)]
pub enum ShapeDesc {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
    Triangle { vertices: [Vec2; 3] },
    Convex { vertices: Vec<Vec2> },
}

/// Surface/mass properties shared by a part's colliders.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.5,
            restitution: 0.2,
        }
    }
}

/// Everything needed to create one body and its colliders.
#[derive(Debug, Clone)]
pub struct PartDef {
    pub kind: BodyKind,
    pub dynamic: bool,
    pub pos: Vec2,
    pub angle: f32,
    pub shapes: Vec<ShapeDesc>,
    pub material: Material,
}

/// Opaque handle to a physics-engine constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointRef(ImpulseJointHandle);

/// A begin-of-contact pair reported by the last step, resolved to bodies.
#[derive(Debug, Clone, Copy)]
pub struct BeginContact {
    pub body_a: RigidBodyHandle,
    pub body_b: RigidBodyHandle,
}

/// Construction failures while building the rig or an obstacle. Fatal for
/// the thing being built; nothing partially wired is left behind.
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// Convex decomposition input with no area.
    #[error("degenerate convex shape for {0}")]
    DegenerateShape(&'static str),

    /// A joint referenced a body that is not in the world.
    #[error("joint references missing body")]
    MissingJointBody,
}

// ---------------------------------------------------------------------------
// Event collector
// ---------------------------------------------------------------------------

struct ContactCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl ContactCollector {
    fn new() -> Self {
        Self {
            started: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        std::mem::take(&mut *self.started.lock().unwrap())
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        // Only the begin edge matters for outcome classification.
        if let CollisionEvent::Started(h1, h2, _) = event {
            self.started.lock().unwrap().push((h1, h2));
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate behind the handful of operations the
/// course core needs.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: ContactCollector,
    tags: HashMap<RigidBodyHandle, BodyTag>,
    begin_contacts: Vec<BeginContact>,
}

impl PhysicsWorld {
    /// Create a world with the given gravity (m/s², Y-down positive).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: nalgebra::Vector2::new(gravity.x, gravity.y),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: ContactCollector::new(),
            tags: HashMap::new(),
            begin_contacts: Vec::new(),
        }
    }

    /// Advance the simulation by `dt` seconds with the engine's configured
    /// solver iterations, collecting begin-of-contact pairs for
    /// [`Self::drain_begin_contacts`].
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collector,
        );

        for (h1, h2) in self.collector.drain() {
            let body_a = self.colliders.get(h1).and_then(|c| c.parent());
            let body_b = self.colliders.get(h2).and_then(|c| c.parent());
            if let (Some(body_a), Some(body_b)) = (body_a, body_b) {
                self.begin_contacts.push(BeginContact { body_a, body_b });
            }
        }
    }

    /// Take the begin-of-contact pairs reported by the last step.
    pub fn drain_begin_contacts(&mut self) -> Vec<BeginContact> {
        std::mem::take(&mut self.begin_contacts)
    }

    // -- bodies --

    /// Create one body with its colliders and tag. Fails if a convex shape
    /// has no area; the body is not inserted in that case.
    pub fn create_part(&mut self, def: &PartDef) -> Result<RigidBodyHandle, PhysicsError> {
        let builders = def
            .shapes
            .iter()
            .map(|s| Self::collider_builder(s))
            .collect::<Result<Vec<_>, _>>()?;

        let body = if def.dynamic {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        }
        .translation(px_to_vec(def.pos))
        .rotation(def.angle)
        .build();
        let handle = self.bodies.insert(body);

        for builder in builders {
            let collider = builder
                .density(def.material.density)
                .friction(def.material.friction)
                .restitution(def.material.restitution)
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .build();
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }

        let extent = match def.shapes.as_slice() {
            [ShapeDesc::Rect { width, height }] => Some((*width, *height)),
            _ => None,
        };
        self.tags.insert(handle, BodyTag { kind: def.kind, extent });

        Ok(handle)
    }

    fn collider_builder(shape: &ShapeDesc) -> Result<ColliderBuilder, PhysicsError> {
        match shape {
            ShapeDesc::Circle { radius } => {
                Ok(ColliderBuilder::ball(radius / PIXELS_PER_METER))
            }
            ShapeDesc::Rect { width, height } => Ok(ColliderBuilder::cuboid(
                width * 0.5 / PIXELS_PER_METER,
                height * 0.5 / PIXELS_PER_METER,
            )),
            ShapeDesc::Triangle { vertices } => Ok(ColliderBuilder::triangle(
                px_to_point(vertices[0]),
                px_to_point(vertices[1]),
                px_to_point(vertices[2]),
            )),
            ShapeDesc::Convex { vertices } => {
                let points: Vec<_> = vertices.iter().map(|v| px_to_point(*v)).collect();
                ColliderBuilder::convex_hull(&points)
                    .ok_or(PhysicsError::DegenerateShape("convex hull"))
            }
        }
    }

    /// The tag attached to a body at creation, if any.
    pub fn tag(&self, handle: RigidBodyHandle) -> Option<&BodyTag> {
        self.tags.get(&handle)
    }

    pub fn is_static(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| b.is_fixed())
    }

    pub fn position(&self, handle: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|b| vec_to_px(&b.position().translation.vector))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn angle(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies
            .get(handle)
            .map(|b| b.position().rotation.angle())
            .unwrap_or(0.0)
    }

    /// World-space center of mass, in pixels.
    pub fn world_center(&self, handle: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|b| point_to_px(b.center_of_mass()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Map a body-local point (pixels) to world space (pixels).
    pub fn world_point(&self, handle: RigidBodyHandle, local: Vec2) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|b| point_to_px(&b.position().transform_point(&px_to_point(local))))
            .unwrap_or(local)
    }

    /// Linear velocity in m/s.
    pub fn linvel(&self, handle: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|b| Vec2::new(b.linvel().x, b.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Angular velocity in rad/s.
    pub fn angvel(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies.get(handle).map(|b| b.angvel()).unwrap_or(0.0)
    }

    /// Teleport a body to a pose, waking it.
    pub fn set_pose(&mut self, handle: RigidBodyHandle, pos: Vec2, angle: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_position(Isometry::new(px_to_vec(pos), angle), true);
        }
    }

    pub fn zero_velocities(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(nalgebra::Vector2::zeros(), false);
            body.set_angvel(0.0, false);
        }
    }

    pub fn wake(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.is_sleeping() {
                body.wake_up(true);
            }
        }
    }

    /// Continuous torque, accumulated until [`Self::clear_forces`].
    pub fn apply_torque(&mut self, handle: RigidBodyHandle, torque: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.add_torque(torque, true);
        }
    }

    /// Drop every accumulated external force and torque, world-wide.
    pub fn clear_forces(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- joints --

    /// Hinge between two bodies at a world-space anchor (pixels), in the
    /// style of Box2D's `Initialize`: local anchors are derived from the
    /// bodies' current poses. Jointed bodies do not collide.
    pub fn create_revolute(
        &mut self,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        world_anchor: Vec2,
    ) -> JointRef {
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(self.local_anchor(body_a, world_anchor))
            .local_anchor2(self.local_anchor(body_b, world_anchor))
            .contacts_enabled(false)
            .build();
        JointRef(self.impulse_joints.insert(body_a, body_b, joint, true))
    }

    /// Like [`Self::create_revolute`] with a velocity motor whose torque is
    /// bounded by `max_torque`. The motor starts enabled at zero speed.
    pub fn create_motorized_revolute(
        &mut self,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        world_anchor: Vec2,
        max_torque: f32,
    ) -> JointRef {
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(self.local_anchor(body_a, world_anchor))
            .local_anchor2(self.local_anchor(body_b, world_anchor))
            .motor_velocity(0.0, 1.0)
            .motor_max_force(max_torque)
            .contacts_enabled(false)
            .build();
        JointRef(self.impulse_joints.insert(body_a, body_b, joint, true))
    }

    /// Rigid weld at a world-space anchor. Jointed bodies do not collide.
    pub fn create_weld(
        &mut self,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        world_anchor: Vec2,
    ) -> JointRef {
        let joint = FixedJointBuilder::new()
            .local_anchor1(self.local_anchor(body_a, world_anchor))
            .local_anchor2(self.local_anchor(body_b, world_anchor))
            .contacts_enabled(false)
            .build();
        JointRef(self.impulse_joints.insert(body_a, body_b, joint, true))
    }

    /// Damped distance joint specified like Box2D's: a frequency (Hz) and a
    /// damping ratio, converted to absolute stiffness/damping through the
    /// pair's reduced mass. `rest` defaults to the current anchor distance.
    /// The connected bodies keep colliding with each other.
    pub fn create_spring(
        &mut self,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        world_anchor_a: Vec2,
        world_anchor_b: Vec2,
        frequency_hz: f32,
        damping_ratio: f32,
        rest: Option<f32>,
    ) -> JointRef {
        let rest_m = rest
            .map(|px| px / PIXELS_PER_METER)
            .unwrap_or_else(|| (world_anchor_a - world_anchor_b).length() / PIXELS_PER_METER);

        let m = self.reduced_mass(body_a, body_b);
        let omega = std::f32::consts::TAU * frequency_hz;
        let stiffness = m * omega * omega;
        let damping = 2.0 * m * damping_ratio * omega;

        let joint = SpringJointBuilder::new(rest_m, stiffness, damping)
            .local_anchor1(self.local_anchor(body_a, world_anchor_a))
            .local_anchor2(self.local_anchor(body_b, world_anchor_b))
            .build();
        JointRef(self.impulse_joints.insert(body_a, body_b, joint, true))
    }

    /// Slider along `axis` anchored at a world-space point, with translation
    /// limits in pixels. The connected bodies keep colliding.
    pub fn create_prismatic(
        &mut self,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        world_anchor: Vec2,
        axis: Vec2,
        limits: [f32; 2],
    ) -> JointRef {
        let axis = UnitVector::new_normalize(nalgebra::Vector2::new(axis.x, axis.y));
        let joint = PrismaticJointBuilder::new(axis)
            .local_anchor1(self.local_anchor(body_a, world_anchor))
            .local_anchor2(self.local_anchor(body_b, world_anchor))
            .limits([
                limits[0] / PIXELS_PER_METER,
                limits[1] / PIXELS_PER_METER,
            ])
            .build();
        JointRef(self.impulse_joints.insert(body_a, body_b, joint, true))
    }

    /// Destroy a joint. The handle is dead afterwards.
    pub fn remove_joint(&mut self, joint: JointRef) {
        self.impulse_joints.remove(joint.0, true);
    }

    /// Reconfigure a revolute motor: target angular velocity plus an
    /// enabled flag. Disabling zeroes the torque bound, which is the
    /// Rapier equivalent of switching the motor off.
    pub fn set_motor(&mut self, joint: JointRef, enabled: bool, speed: f32, max_torque: f32) {
        if let Some(j) = self.impulse_joints.get_mut(joint.0, true) {
            j.data.set_motor_velocity(JointAxis::AngX, speed, 1.0);
            j.data
                .set_motor_max_force(JointAxis::AngX, if enabled { max_torque } else { 0.0 });
        }
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    // -- private helpers --

    fn local_anchor(&self, handle: RigidBodyHandle, world: Vec2) -> nalgebra::Point2<f32> {
        self.bodies
            .get(handle)
            .map(|b| b.position().inverse_transform_point(&px_to_point(world)))
            .unwrap_or_else(|| px_to_point(world))
    }

    fn reduced_mass(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> f32 {
        let ma = self.bodies.get(body_a).map(|b| b.mass()).unwrap_or(0.0);
        let mb = self.bodies.get(body_b).map(|b| b.mass()).unwrap_or(0.0);
        if ma > 0.0 && mb > 0.0 {
            ma * mb / (ma + mb)
        } else {
            ma.max(mb).max(1.0)
        }
    }
}
