use std::env;

use cubeworld::{logging, Batch, EngineConfig, EngineError, InputEvent, Simulation};

/// One step of the scripted session: events to send, then how many ticks to run
struct Phase {
    name: &'static str,
    events: Vec<InputEvent>,
    ticks: u32,
}

fn script() -> Vec<Phase> {
    vec![
        Phase { name: "settle", events: vec![], ticks: 60 },
        Phase {
            name: "walk forward",
            events: vec![InputEvent::SetStrafe { forward_back: -1, left_right: 0 }],
            ticks: 90,
        },
        Phase {
            name: "jump",
            events: vec![InputEvent::Jump],
            ticks: 60,
        },
        Phase {
            name: "stop and look down",
            events: vec![
                InputEvent::SetStrafe { forward_back: 0, left_right: 0 },
                InputEvent::Look { delta_yaw: 0.0, delta_pitch: -60.0 },
            ],
            ticks: 1,
        },
        Phase {
            name: "dig",
            events: vec![InputEvent::RemoveBlock],
            ticks: 30,
        },
        Phase {
            name: "build",
            events: vec![InputEvent::SelectSlot(1), InputEvent::PlaceBlock],
            ticks: 1,
        },
        Phase {
            name: "fly up and turn",
            events: vec![
                InputEvent::ToggleFly,
                InputEvent::MouseMove { dx: 300.0, dy: 400.0 },
                InputEvent::SetStrafe { forward_back: -1, left_right: 0 },
            ],
            ticks: 120,
        },
    ]
}

fn main() -> Result<(), EngineError> {
    logging::init();

    let config = match env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut sim = Simulation::new(config, Batch::new());

    for phase in script() {
        for event in phase.events {
            sim.push_event(event);
        }
        for _ in 0..phase.ticks {
            sim.tick();
        }
        sim.flush();

        let (shown, total) = sim.scene().stats();
        let player = sim.player();
        tracing::info!(
            "{}: position {:.2?}, sector {:?}, {} / {} blocks shown, {} vertices",
            phase.name,
            player.position,
            player.sector,
            shown,
            total,
            sim.scene().renderer().vertices().len()
        );
        if let Some(focused) = sim.focused_block() {
            tracing::info!("looking at {:?} ({:?})", focused.block, sim.scene().get_block(&focused.block));
        }
    }

    tracing::info!("done after {} ticks", sim.ticks());
    Ok(())
}
