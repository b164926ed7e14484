use std::fmt::Write as _;

use clap::{Parser, Subcommand};
use rand::Rng;

use snapjig::{AssemblyEngine, EngineEvent};
use snapjig_core::catalog::{image_by_id, DEFAULT_IMAGE_ID, IMAGE_CATALOG};
use snapjig_core::edges::build_edge_maps;
use snapjig_core::geom::Rect;
use snapjig_core::grid::{grid_for_piece_count, GridSpec};
use snapjig_core::layout::{fit_board_rect, BoardGeometry};
use snapjig_core::path::build_piece_path;
use snapjig_core::rng::{rand_range, splitmix32};
use snapjig_core::rules::AssemblyRules;
use snapjig_core::snapshot::ImageInfo;

#[derive(Parser)]
#[command(name = "snapjig-cli", version, about = "Headless tools for the snapjig assembly engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest a grid for a piece count and image size
    Grid {
        #[arg(long, default_value_t = 150)]
        pieces: u32,
        #[arg(long, default_value_t = 1200)]
        width: u32,
        #[arg(long, default_value_t = 800)]
        height: u32,
    },
    /// Write every piece outline of a seeded edge map as one SVG sheet
    Outline {
        #[arg(long, default_value_t = 4)]
        rows: u32,
        #[arg(long, default_value_t = 6)]
        cols: u32,
        #[arg(long, env = "SNAPJIG_SEED")]
        seed: Option<u32>,
        #[arg(long, default_value_t = 100.0)]
        cell: f32,
        #[arg(long, default_value = "pieces.svg")]
        out: String,
    },
    /// Drive the engine through a full scripted solve
    Simulate {
        #[arg(long, default_value_t = 4)]
        rows: u32,
        #[arg(long, default_value_t = 6)]
        cols: u32,
        #[arg(long, env = "SNAPJIG_SEED")]
        seed: Option<u32>,
        #[arg(long, default_value = DEFAULT_IMAGE_ID)]
        image: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Grid {
            pieces,
            width,
            height,
        } => {
            let aspect = width as f32 / height.max(1) as f32;
            let grid = grid_for_piece_count(pieces, aspect)?;
            println!(
                "{} pieces ({}x{}, actual {})",
                pieces,
                grid.cols,
                grid.rows,
                grid.total()
            );
        }
        Commands::Outline {
            rows,
            cols,
            seed,
            cell,
            out,
        } => {
            let seed = seed.unwrap_or_else(fresh_seed);
            let grid = GridSpec::new(rows, cols)?;
            let svg = outline_sheet(&grid, seed, cell);
            std::fs::write(&out, svg)?;
            println!("wrote {out} ({}x{} seed {seed:08x})", grid.cols, grid.rows);
        }
        Commands::Simulate {
            rows,
            cols,
            seed,
            image,
            json,
        } => {
            let Some(entry) = image_by_id(&image) else {
                eprintln!("unknown image: {image}");
                eprintln!("available images:");
                for entry in IMAGE_CATALOG {
                    eprintln!("  {} ({})", entry.id, entry.label);
                }
                return Ok(());
            };
            let seed = seed.unwrap_or_else(fresh_seed);
            let report = simulate(entry.to_info(), rows, cols, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{}x{} seed {seed:08x}: locked {}/{}, {} flashes, completed: {}",
                    report.cols,
                    report.rows,
                    report.locked,
                    report.pieces,
                    report.flashes,
                    report.completed
                );
            }
        }
    }
    Ok(())
}

fn fresh_seed() -> u32 {
    rand::thread_rng().gen()
}

fn outline_sheet(grid: &GridSpec, seed: u32, cell: f32) -> String {
    let maps = build_edge_maps(grid.rows, grid.cols, seed);
    let tab = cell * snapjig_core::rules::TAB_RATIO_DEFAULT;
    let sheet_w = grid.cols as f32 * cell + tab * 2.0;
    let sheet_h = grid.rows as f32 * cell + tab * 2.0;
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {sheet_w} {sheet_h}\">"
    );
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let edges = maps.piece_edges(row, col);
            let outline = build_piece_path(&edges, cell, cell, tab);
            let x = col as f32 * cell;
            let y = row as f32 * cell;
            let _ = writeln!(
                svg,
                "  <path d=\"{}\" transform=\"translate({x},{y})\" fill=\"none\" stroke=\"black\"/>",
                outline.to_svg()
            );
        }
    }
    svg.push_str("</svg>\n");
    svg
}

#[derive(serde::Serialize)]
struct SimulateReport {
    rows: u32,
    cols: u32,
    seed: u32,
    pieces: usize,
    locked: usize,
    flashes: usize,
    completed: bool,
}

// Drags every piece from the tray to just inside its slot threshold and
// lets the snap engine do the rest.
fn simulate(
    image: ImageInfo,
    rows: u32,
    cols: u32,
    seed: u32,
) -> Result<SimulateReport, Box<dyn std::error::Error>> {
    let rules = AssemblyRules::default();
    let mut engine = AssemblyEngine::with_rules(rules);
    let aspect = image.aspect();
    engine.set_image(image);
    engine.reset_assembly_with_seed(rows, cols, seed)?;
    let grid = GridSpec::new(rows, cols)?;

    let zone = Rect::new(0.0, 0.0, 1280.0, 840.0);
    let board = fit_board_rect(zone, aspect, rules.board_inset);
    let tray = Rect::new(0.0, 860.0, 1280.0, 480.0);
    engine.board_geometry_changed(BoardGeometry::from_rects(board, tray, &grid, rules.tab_ratio));

    let total = grid.total();
    let Some(geometry) = engine.geometry().copied() else {
        return Err("engine rejected the board geometry".into());
    };
    let threshold = geometry.snap_threshold(rules.snap_threshold_ratio);
    let jitter = threshold * 0.6;
    let mut flashes = 0usize;
    for id in 0..total {
        let Some(registry) = engine.registry() else {
            break;
        };
        let Some(piece) = registry.piece(id) else {
            continue;
        };
        if piece.locked {
            continue;
        }
        // Pointer coordinates are play-area relative; tray pieces sit at
        // their home slot offset by the tray origin.
        let down = if piece.location == snapjig::PieceLocation::Tray {
            (
                geometry.tray_rect.x + piece.position.0,
                geometry.tray_rect.y + piece.position.1,
            )
        } else {
            piece.position
        };
        let Some(target) = snapjig::snap::piece_snap_position(&geometry, registry, id) else {
            continue;
        };
        let salt = splitmix32(seed ^ id as u32);
        let dx = rand_range(salt, 0, -jitter, jitter);
        let dy = rand_range(salt, 1, -jitter, jitter);
        engine.pointer_down(id, down.0, down.1, 1);
        engine.pointer_move(target.0 + dx, target.1 + dy, 1);
        engine.pointer_up(1);
        for event in engine.drain_events() {
            if let EngineEvent::Flash { pieces } = event {
                flashes += pieces.len();
            }
        }
    }

    let locked = engine
        .registry()
        .map(|registry| registry.locked_count())
        .unwrap_or(0);
    Ok(SimulateReport {
        rows,
        cols,
        seed,
        pieces: total,
        locked,
        flashes,
        completed: engine.is_complete(),
    })
}
