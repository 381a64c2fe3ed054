//! # Quarry Sandbox
//!
//! Headless run of the character against a small generated world:
//! walk, swim, dig and build, logging what happens.
//!
//! Usage: `sandbox [config.toml]`

use std::process::ExitCode;

use quarry::{
    BlockKind, BlockPos, CharacterEvent, CharacterSim, Control, EventBus, FixedStep, GridWorld,
    InputSnapshot, InputSource, SimConfig, Vec3, FIXED_DT,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

const WORLD_SEED: u64 = 0x51A7_E5EE;
const HALF_EXTENT: i32 = 24;

/// One scripted phase: input held for a number of ticks.
struct Phase {
    name: &'static str,
    input: InputSnapshot,
    ticks: u32,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, error = %e, "could not load config");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let mut world = generate_world(WORLD_SEED);
    info!(cells = world.len(), seed = WORLD_SEED, "world generated");

    let bus = EventBus::default();
    let receiver = bus.receiver();
    let mut sim = match CharacterSim::new(config, Vec3::new(0.5, 4.0, 0.5), bus.sender()) {
        Ok(sim) => sim,
        Err(e) => {
            error!(error = %e, "could not start simulation");
            return ExitCode::FAILURE;
        }
    };

    let mut stepper = FixedStep::default();
    for phase in script() {
        info!(phase = phase.name, ticks = phase.ticks, "phase start");
        // Presses land on the first tick only.
        let mut input = phase.input;
        for _ in 0..phase.ticks {
            sim.run_frame(&mut stepper, &mut world, &input, FIXED_DT);
            input = held_only(input);
        }

        for event in receiver.drain() {
            log_event(&event);
        }

        let c = sim.character();
        info!(
            phase = phase.name,
            position = ?c.position,
            velocity = ?c.velocity,
            grounded = c.grounded,
            submersion = c.water.submersion,
            head_submerged = c.head_submerged,
            break_progress = c.break_state().progress,
            "phase end"
        );
    }

    let c = sim.character();
    for (kind, count) in c.inventory().iter() {
        info!(?kind, count, "inventory");
    }
    for (slot, item) in c.equipment().iter() {
        info!(?slot, ?item, "equipment");
    }
    info!(ticks = sim.ticks(), "done");
    ExitCode::SUCCESS
}

/// Stone floor with random bumps, a wall ahead of the spawn and a pool to the west of it.
fn generate_world(seed: u64) -> GridWorld {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = GridWorld::new();

    world.fill(
        BlockPos::new(-HALF_EXTENT, -1, -HALF_EXTENT),
        BlockPos::new(HALF_EXTENT, -1, HALF_EXTENT),
        BlockKind::Bedrock,
    );
    world.fill(
        BlockPos::new(-HALF_EXTENT, 0, -HALF_EXTENT),
        BlockPos::new(HALF_EXTENT, 0, HALF_EXTENT),
        BlockKind::Stone,
    );

    for _ in 0..40 {
        let x = rng.gen_range(-HALF_EXTENT..=HALF_EXTENT);
        let z = rng.gen_range(-HALF_EXTENT..=HALF_EXTENT);
        // Keep the spawn column and the scripted path clear.
        if x <= 2 && (-8..=2).contains(&z) {
            continue;
        }
        let kind = if rng.gen_bool(0.3) { BlockKind::Dirt } else { BlockKind::Grass };
        world.fill(BlockPos::new(x, 1, z), BlockPos::new(x, rng.gen_range(1..=2), z), kind);
    }

    // Wall ahead of the spawn, along -Z.
    world.fill(BlockPos::new(-2, 1, -6), BlockPos::new(2, 3, -6), BlockKind::Cobblestone);

    // Pool to the west, three deep.
    world.fill(BlockPos::new(-10, -3, -8), BlockPos::new(-6, -3, -2), BlockKind::Sand);
    world.fill(BlockPos::new(-10, -2, -8), BlockPos::new(-6, 0, -2), BlockKind::Water);

    world
}

fn script() -> Vec<Phase> {
    vec![
        Phase {
            name: "settle",
            input: InputSnapshot::new(),
            ticks: 60,
        },
        Phase {
            name: "walk to wall",
            input: InputSnapshot::new().hold(Control::Forward),
            ticks: 90,
        },
        Phase {
            name: "dig",
            input: InputSnapshot::new().hold(Control::Break).look(0.0, 60.0),
            ticks: 150,
        },
        Phase {
            name: "build",
            input: InputSnapshot::new().press(Control::Place),
            ticks: 1,
        },
        Phase {
            name: "turn west",
            input: InputSnapshot::new().look(-600.0, -60.0),
            ticks: 1,
        },
        Phase {
            name: "sprint to pool",
            input: InputSnapshot::new().hold(Control::Forward).hold(Control::Sprint),
            ticks: 150,
        },
        Phase {
            name: "dive",
            input: InputSnapshot::new().hold(Control::Dive),
            ticks: 60,
        },
        Phase {
            name: "float",
            input: InputSnapshot::new(),
            ticks: 180,
        },
        Phase {
            name: "swim up",
            input: InputSnapshot::new().hold(Control::Jump),
            ticks: 60,
        },
    ]
}

fn held_only(input: InputSnapshot) -> InputSnapshot {
    let mut next = InputSnapshot::new();
    for control in [
        Control::Forward,
        Control::Back,
        Control::Left,
        Control::Right,
        Control::Sprint,
        Control::Jump,
        Control::Dive,
        Control::Break,
    ] {
        if input.is_held(control) {
            next = next.hold(control);
        }
    }
    next
}

fn log_event(event: &CharacterEvent) {
    match event {
        CharacterEvent::BlockBroken { pos, kind } => info!(?pos, ?kind, "block broken"),
        CharacterEvent::BlockPlaced { pos, kind } => info!(?pos, ?kind, "block placed"),
        CharacterEvent::InventoryChanged { kind, quantity } => {
            info!(?kind, quantity, "inventory changed");
        }
        CharacterEvent::WaterEntered => info!("entered water"),
        CharacterEvent::WaterExited => info!("left water"),
        CharacterEvent::Landed { impact_speed } => info!(impact_speed, "landed"),
        CharacterEvent::HeadBumped { impact_speed } => info!(impact_speed, "head bumped"),
    }
}
