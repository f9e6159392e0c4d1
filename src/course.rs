//! Course definition files
//!
//! Line-oriented text, one record per line, colon-separated fields:
//! `kind:x:y[:angleRadians]`. `start` sets the rig's spawn origin and has
//! no angle; every other kind places an obstacle. Decimal points are always
//! `.` regardless of locale. Malformed or unrecognized lines are skipped,
//! a missing file is just an empty course.

use std::io;
use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use crate::obstacle::ObstacleKind;

/// One obstacle placement as read from or written to a course file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRecord {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub angle: f32,
}

/// Parsed course definition: spawn origin plus obstacles in placement
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDef {
    pub start: Option<Vec2>,
    pub records: Vec<ObstacleRecord>,
}

/// Course file I/O failures. Parse problems are not errors (offending
/// lines are skipped), so only real I/O surfaces here.
#[derive(Error, Debug)]
pub enum CourseError {
    #[error("course file i/o: {0}")]
    Io(#[from] io::Error),
}

impl CourseDef {
    /// Parse course text, skipping anything malformed.
    pub fn parse(text: &str) -> Self {
        let mut def = CourseDef::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let pieces: Vec<&str> = line.split(':').collect();
            if pieces.len() < 3 {
                log::warn!("skipping short course record: {line:?}");
                continue;
            }

            let (x, y) = match (pieces[1].parse::<f32>(), pieces[2].parse::<f32>()) {
                (Ok(x), Ok(y)) => (x, y),
                _ => {
                    log::warn!("skipping course record with bad coordinates: {line:?}");
                    continue;
                }
            };
            let angle = match pieces.get(3) {
                Some(field) => match field.parse::<f32>() {
                    Ok(angle) => angle,
                    Err(_) => {
                        log::warn!("skipping course record with bad angle: {line:?}");
                        continue;
                    }
                },
                None => 0.0,
            };

            match pieces[0] {
                "start" => def.start = Some(Vec2::new(x, y)),
                kind => match ObstacleKind::from_str(kind) {
                    Some(kind) => def.records.push(ObstacleRecord {
                        kind,
                        pos: Vec2::new(x, y),
                        angle,
                    }),
                    None => log::warn!("skipping unknown course element {kind:?}"),
                },
            }
        }

        def
    }

    /// Render the course back to file text: `start` first, then one line
    /// per obstacle in placement order.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        if let Some(start) = self.start {
            out.push_str(&format!("start:{}:{}\n", start.x, start.y));
        }
        for record in &self.records {
            out.push_str(&format!(
                "{}:{}:{}:{}\n",
                record.kind.as_str(),
                record.pos.x,
                record.pos.y,
                record.angle
            ));
        }
        out
    }

    /// Load a course from disk. A file that does not exist is an empty
    /// course, not an error.
    pub fn load(path: &Path) -> Result<Self, CourseError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let def = Self::parse(&text);
                log::info!(
                    "loaded course {:?}: {} obstacles",
                    path,
                    def.records.len()
                );
                Ok(def)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no course file at {path:?}, starting empty");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the course to disk.
    pub fn save(&self, path: &Path) -> Result<(), CourseError> {
        std::fs::write(path, self.serialize())?;
        log::info!("saved course {:?} ({} obstacles)", path, self.records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_all_record_kinds() {
        let def = CourseDef::parse(
            "start:120:45\n\
             grass:400:300:0\n\
             jump:700:280:0.3\n\
             nail:900:300:0\n\
             finish:1200:260:0\n",
        );
        assert_eq!(def.start, Some(Vec2::new(120.0, 45.0)));
        assert_eq!(def.records.len(), 4);
        assert_eq!(def.records[1].kind, ObstacleKind::Jump);
        assert!((def.records[1].angle - 0.3).abs() < 1e-6);
    }

    #[test]
    fn missing_angle_defaults_to_zero() {
        let def = CourseDef::parse("grass:10:20\n");
        assert_eq!(def.records[0].angle, 0.0);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let def = CourseDef::parse(
            "grass:100:200:0\n\
             grass\n\
             grass:only-two\n\
             grass:abc:200:0\n\
             grass:100:def:0\n\
             grass:100:200:ghi\n\
             pit:100:200:0\n\
             \n\
             finish:900:300:0\n",
        );
        assert_eq!(def.records.len(), 2);
        assert_eq!(def.records[0].kind, ObstacleKind::Grass);
        assert_eq!(def.records[1].kind, ObstacleKind::Finish);
    }

    #[test]
    fn empty_text_is_a_valid_course() {
        let def = CourseDef::parse("");
        assert_eq!(def, CourseDef::default());
    }

    #[test]
    fn save_emits_start_first_then_placement_order() {
        let def = CourseDef {
            start: Some(Vec2::new(120.0, 45.0)),
            records: vec![
                ObstacleRecord {
                    kind: ObstacleKind::Grass,
                    pos: Vec2::new(400.0, 300.0),
                    angle: 0.0,
                },
                ObstacleRecord {
                    kind: ObstacleKind::Finish,
                    pos: Vec2::new(900.0, 300.0),
                    angle: 0.0,
                },
            ],
        };
        let text = def.serialize();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "start:120:45");
        assert!(lines[1].starts_with("grass:400:300:"));
        assert!(lines[2].starts_with("finish:900:300:"));
    }

    #[test]
    fn round_trip_reproduces_the_course() {
        let def = CourseDef {
            start: Some(Vec2::new(120.0, 45.0)),
            records: vec![
                ObstacleRecord {
                    kind: ObstacleKind::Grass,
                    pos: Vec2::new(400.0, 300.0),
                    angle: 0.0,
                },
                ObstacleRecord {
                    kind: ObstacleKind::Finish,
                    pos: Vec2::new(900.0, 300.0),
                    angle: 0.0,
                },
            ],
        };
        let reloaded = CourseDef::parse(&def.serialize());
        assert_eq!(reloaded, def);
    }

    fn arb_kind() -> impl Strategy<Value = ObstacleKind> {
        prop_oneof![
            Just(ObstacleKind::Grass),
            Just(ObstacleKind::Jump),
            Just(ObstacleKind::Nail),
            Just(ObstacleKind::Finish),
        ]
    }

    proptest! {
        #[test]
        fn parser_never_panics_on_junk(text in "\\PC{0,200}") {
            let _ = CourseDef::parse(&text);
        }

        #[test]
        fn arbitrary_courses_round_trip(
            start in (-1.0e4f32..1.0e4, -1.0e4f32..1.0e4),
            records in prop::collection::vec(
                (arb_kind(), -1.0e4f32..1.0e4, -1.0e4f32..1.0e4, -6.4f32..6.4),
                0..12,
            ),
        ) {
            let def = CourseDef {
                start: Some(Vec2::new(start.0, start.1)),
                records: records
                    .into_iter()
                    .map(|(kind, x, y, angle)| ObstacleRecord {
                        kind,
                        pos: Vec2::new(x, y),
                        angle,
                    })
                    .collect(),
            };
            let reloaded = CourseDef::parse(&def.serialize());
            prop_assert_eq!(reloaded, def);
        }
    }
}
