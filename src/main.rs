//! Cube Room
//!
//! Rotates a cube-shaped puzzle room through its 24 orientations. Quarter
//! turns step the room directly; in inspect mode it can be turned freely and
//! snaps back to the nearest orientation on release. Whichever face ends up
//! at the bottom becomes the floor and has its content shown.

mod visualization;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use cuberoom::{
    persistence, Face, FrameTime, Generator, InputFrame, OrientationState, Room, RoomSession,
    RotationConfig, SceneNode,
};

/// Simulation tick used by `simulate`.
const TICK: FrameTime = FrameTime::uniform(1.0 / 60.0);
/// Frames allowed for one move to be accepted or to settle.
const MAX_FRAMES: usize = 600;

/// Steps and inspects a cube-shaped room.
#[derive(Parser)]
#[command(name = "cuberoom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Room content file (RON). Defaults to the bundled demo room.
    #[arg(long, global = true)]
    room: Option<PathBuf>,
    /// Rotation config file (RON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the room in an interactive 3D viewer.
    View,
    /// List all 24 cube orientations.
    Orientations,
    /// Run moves (X, X', Y, Y', Z, Z') and print the floor after each.
    Simulate {
        #[arg(required = true)]
        moves: Vec<Generator>,
    },
    /// Load a room file and report its contents and authoring defects.
    CheckRoom { file: PathBuf },
}

fn main() {
    env_logger::builder().init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Orientations) => print!("{}", format_orientations()),
        Some(Command::CheckRoom { file }) => run_check_room(&file),
        Some(Command::Simulate { moves }) => {
            if let Some((root, config)) = load_inputs(cli.room.as_deref(), cli.config.as_deref()) {
                print!("{}", format_simulation(&root, config, &moves));
            }
        }
        Some(Command::View) | None => {
            if let Some((root, config)) = load_inputs(cli.room.as_deref(), cli.config.as_deref()) {
                println!(
                    "Controls: arrows step, Q/E roll, Tab inspect, WASD rotate (inspect), R reset"
                );
                visualization::display(RoomSession::new(&root, config));
            }
        }
    }
}

/// Loads the room and config named on the command line, reporting errors.
fn load_inputs(room: Option<&Path>, config: Option<&Path>) -> Option<(SceneNode, RotationConfig)> {
    let root = match room {
        Some(path) => persistence::load_room(path),
        None => persistence::demo_room(),
    };
    let root = match root {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Failed to load room: {}", e);
            return None;
        }
    };

    let config = match config {
        Some(path) => persistence::load_config(path),
        None => Ok(RotationConfig::default()),
    };
    match config {
        Ok(config) => Some((root, config)),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            None
        }
    }
}

fn run_check_room(file: &Path) {
    match persistence::load_room(file) {
        Ok(root) => print!("{}", format_room_report(&Room::initialize(&root))),
        Err(e) => eprintln!("Failed to load room: {}", e),
    }
}

fn format_orientations() -> String {
    let all = OrientationState::all();
    let mut output = format!("{} orientations\n", all.len());
    for (i, orientation) in all.iter().enumerate() {
        output.push_str(&format!("{:2}: {}\n", i + 1, orientation));
    }
    output
}

/// Runs `moves` through a fresh session at a fixed tick, one at a time,
/// and reports the floor and shown walls after each settles.
fn format_simulation(root: &SceneNode, config: RotationConfig, moves: &[Generator]) -> String {
    let mut session = RoomSession::new(root, config);
    let mut output = format!("room `{}`\n", session.room().name());
    output.push_str(&settle_line("start", &session));

    for &generator in moves {
        let mut accepted = session.step(generator);
        for _ in 0..MAX_FRAMES {
            if accepted {
                break;
            }
            session.update(TICK, &InputFrame::default());
            accepted = session.step(generator);
        }
        if !accepted {
            output.push_str(&format!("{:<5} rejected\n", generator.to_string()));
            continue;
        }
        session.run_until_settled(TICK, MAX_FRAMES);
        output.push_str(&settle_line(&generator.to_string(), &session));
    }
    output
}

fn settle_line(label: &str, session: &RoomSession) -> String {
    format!(
        "{:<5} floor={:<6} shown={:?}\n",
        label,
        session.controller().current_floor_face().to_string(),
        session.room().active_interior_faces()
    )
}

fn format_room_report(room: &Room) -> String {
    let interior: Vec<_> = Face::ALL
        .into_iter()
        .filter(|&face| room.interior_wall(face).is_some())
        .collect();
    let exterior: Vec<_> = Face::ALL
        .into_iter()
        .filter(|&face| room.exterior_wall(face).is_some())
        .collect();
    let items: Vec<_> = room.items().map(|item| item.item_id.as_str()).collect();
    let puzzles: Vec<_> = room.puzzles().iter().map(|puzzle| puzzle.id.as_str()).collect();

    let mut output = format!("room `{}`\n", room.name());
    output.push_str(&format!("interior walls: {:?}\n", interior));
    output.push_str(&format!("exterior walls: {:?}\n", exterior));
    output.push_str(&format!("items: {:?}\n", items));
    output.push_str(&format!("portals: {}\n", room.portals().count()));
    output.push_str(&format!("puzzles: {:?}\n", puzzles));
    output.push_str(&format!(
        "spawn: {:?}\n",
        room.default_spawn().map(|anchor| anchor.position)
    ));

    if room.defects().is_empty() {
        output.push_str("no content defects\n");
    } else {
        for defect in room.defects() {
            output.push_str(&format!("defect: {}\n", defect));
        }
    }
    output
}
