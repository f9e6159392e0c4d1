//! Moto Trial entry point
//!
//! Headless demo: builds a short course, drives the rig at full throttle
//! for a few seconds of simulated time and logs outcomes and telemetry.

use std::path::Path;

use moto_trial::consts::SIM_DT;
use moto_trial::{ControlInput, CourseController, CourseDef, KeyState, Tuning};

const DEMO_COURSE: &str = "\
start:120:45
grass:300:350:0
grass:700:350:0
jump:950:307:0
grass:1200:350:0
nail:1500:330:0
grass:1800:350:0
finish:2100:250:0
";

fn main() {
    env_logger::init();
    log::info!("Moto Trial (headless demo) starting...");

    let course = match std::env::args().nth(1) {
        Some(path) => CourseDef::load(Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("failed to load {path}: {e}, using demo course");
            CourseDef::parse(DEMO_COURSE)
        }),
        None => CourseDef::parse(DEMO_COURSE),
    };

    let tuning = Tuning::load(Path::new("tuning.json"));
    let mut controller =
        CourseController::from_course(&course, tuning).expect("course construction");

    let throttle = ControlInput {
        keys: KeyState {
            up: true,
            ..KeyState::default()
        },
        ..ControlInput::default()
    };

    // Twenty seconds of simulated riding, or until something terminal.
    let mut finished = false;
    for step in 0..(20.0 / SIM_DT) as u32 {
        let outcomes = controller.step(&throttle);
        for outcome in &outcomes {
            println!("t={:.2}s  {:?}", step as f32 * SIM_DT, outcome);
            finished = true;
        }
        if step % 60 == 0 {
            let t = controller.telemetry();
            let cam = controller.camera();
            log::debug!(
                "t={:.1}s frame=({:.0},{:.0}) speed={:.2} zoom={:.2} pitch={:.2}",
                step as f32 * SIM_DT,
                t.framing.x,
                t.framing.y,
                t.speed,
                cam.zoom,
                controller.motor_pitch()
            );
        }
        if finished {
            break;
        }
    }

    let t = controller.telemetry();
    println!(
        "final: frame=({:.0},{:.0}) speed={:.2} m/s detached={}",
        t.framing.x,
        t.framing.y,
        t.speed,
        controller.rig().is_detached()
    );
}
