//! Placeable course elements
//!
//! A closed set of obstacle kinds, each a static tagged body: flat ground,
//! a jump ramp, a spike strip that pops tires, and the finish gate. The
//! kind dispatch is an enum-keyed factory; only the collider shape differs
//! per kind.

use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use crate::physics::{BodyKind, Material, PartDef, PhysicsError, PhysicsWorld, ShapeDesc};

/// The closed set of placeable course elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Grass,
    Jump,
    Nail,
    Finish,
}

impl ObstacleKind {
    /// Course-file record name.
    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Grass => "grass",
            ObstacleKind::Jump => "jump",
            ObstacleKind::Nail => "nail",
            ObstacleKind::Finish => "finish",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "grass" => Some(ObstacleKind::Grass),
            "jump" => Some(ObstacleKind::Jump),
            "nail" => Some(ObstacleKind::Nail),
            "finish" => Some(ObstacleKind::Finish),
            _ => None,
        }
    }

    /// Contact-classification tag for this kind's body.
    pub fn tag_kind(self) -> BodyKind {
        match self {
            ObstacleKind::Grass => BodyKind::Ground,
            ObstacleKind::Jump => BodyKind::Jump,
            ObstacleKind::Nail => BodyKind::Hazard,
            ObstacleKind::Finish => BodyKind::Finish,
        }
    }

    /// Footprint in pixels.
    pub fn extent(self) -> (f32, f32) {
        match self {
            ObstacleKind::Grass => (400.0, 60.0),
            ObstacleKind::Jump => (150.0, 85.0),
            ObstacleKind::Nail => (250.0, 70.0),
            ObstacleKind::Finish => (100.0, 200.0),
        }
    }

    fn shapes(self) -> Vec<ShapeDesc> {
        let (width, height) = self.extent();
        match self {
            // The ramp is a right triangle rising toward +x.
            ObstacleKind::Jump => vec![ShapeDesc::Triangle {
                vertices: [
                    Vec2::new(-width * 0.5, height * 0.5),
                    Vec2::new(width * 0.5, -height * 0.5),
                    Vec2::new(width * 0.5, height * 0.5),
                ],
            }],
            _ => vec![ShapeDesc::Rect { width, height }],
        }
    }

    fn material(self) -> Material {
        match self {
            ObstacleKind::Jump => Material::default(),
            // Surfaces the wheels ride on get full grip.
            _ => Material {
                density: 1.0,
                friction: 1.0,
                restitution: 0.2,
            },
        }
    }
}

/// One placed course element: its kind, physics body and placement.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub body: RigidBodyHandle,
    pub pos: Vec2,
    pub angle: f32,
}

impl Obstacle {
    /// Create the static body for one course element at `pos` (pixels),
    /// rotated by `angle` radians.
    pub fn spawn(
        world: &mut PhysicsWorld,
        kind: ObstacleKind,
        pos: Vec2,
        angle: f32,
    ) -> Result<Self, PhysicsError> {
        let body = world.create_part(&PartDef {
            kind: kind.tag_kind(),
            dynamic: false,
            pos,
            angle,
            shapes: kind.shapes(),
            material: kind.material(),
        })?;
        Ok(Self {
            kind,
            body,
            pos,
            angle,
        })
    }

    /// Move the element (editor drag).
    pub fn set_position(&mut self, world: &mut PhysicsWorld, pos: Vec2) {
        self.pos = pos;
        world.set_pose(self.body, pos, self.angle);
    }

    /// Rotate the element in place (editor handle).
    pub fn set_angle(&mut self, world: &mut PhysicsWorld, angle: f32) {
        self.angle = angle;
        world.set_pose(self.body, self.pos, angle);
    }
}
