use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ringlights::api::{
    derive, BundleStrategy, ControllerCfg, PuzzleState, RotationController, ScrambleCfg, Session,
    SessionCfg, Shape, TopologyCfg, WinEvent,
};
use ringlights::Vec3;
use serde::Serialize;
use serde_json::json;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;

use export::{BoardJson, DescriptorJson, FrameJson};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "ringlights")]
#[command(about = "Derive, render and play the 4D polytope ring puzzle")]
struct Cmd {
    /// Inner-product tolerance for edge detection
    #[arg(long, global = true, default_value_t = TopologyCfg::default().edge_eps)]
    edge_eps: f64,

    /// Radians per unit of rotation delta
    #[arg(long, global = true, default_value_t = ControllerCfg::default().speed)]
    speed: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Singleton,
    Hopf,
    Cover,
}

impl From<StrategyArg> for BundleStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Singleton => BundleStrategy::Singleton,
            StrategyArg::Hopf => BundleStrategy::HopfQuotient,
            StrategyArg::Cover => BundleStrategy::DisjointCover,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Derive a shape's rings and bundles; optionally export them as JSON
    Derive {
        #[arg(long, default_value = "24-cell")]
        shape: Shape,
        /// Override the shape's bundle strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        #[arg(long)]
        out: Option<String>,
    },
    /// Rotate a few steps and export the projected frame
    Frame {
        #[arg(long, default_value = "24-cell")]
        shape: Shape,
        /// Camera view direction as x,y,z
        #[arg(long, value_delimiter = ',', default_value = "0,0,1")]
        view: Vec<f64>,
        #[arg(long, default_value_t = 0.0)]
        delta: f64,
        #[arg(long, default_value_t = 1)]
        steps: u32,
        #[arg(long, default_value_t = 16)]
        segments: usize,
        #[arg(long)]
        out: Option<String>,
    },
    /// Scramble, replay clicks and print the final board
    Play {
        #[arg(long, default_value = "16-cell")]
        shape: Shape,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Vertex indices to click, comma separated
        #[arg(long, value_delimiter = ',')]
        clicks: Vec<usize>,
        #[arg(long, default_value_t = ScrambleCfg::default().max_attempts)]
        max_attempts: u32,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let topology = TopologyCfg {
        edge_eps: cmd.edge_eps,
        ..TopologyCfg::default()
    };
    let controller = ControllerCfg {
        speed: cmd.speed,
        ..ControllerCfg::default()
    };
    match cmd.action {
        Action::Derive {
            shape,
            strategy,
            out,
        } => run_derive(shape, strategy, out, topology),
        Action::Frame {
            shape,
            view,
            delta,
            steps,
            segments,
            out,
        } => {
            let cfg = SessionCfg {
                topology,
                controller,
                arc_segments: segments,
                ..SessionCfg::default()
            };
            run_frame(shape, &view, delta, steps, out, cfg)
        }
        Action::Play {
            shape,
            seed,
            clicks,
            max_attempts,
        } => run_play(shape, seed, &clicks, max_attempts, topology),
        Action::Report => report(),
    }
}

fn run_derive(
    shape: Shape,
    strategy: Option<StrategyArg>,
    out: Option<String>,
    topology: TopologyCfg,
) -> Result<()> {
    let mut def = shape.definition();
    if let Some(s) = strategy {
        def.bundles = s.into();
    }
    let d = derive(&def, &topology).with_context(|| format!("deriving {shape}"))?;
    tracing::info!(
        shape = d.name(),
        vertices = d.vertex_count(),
        edges = d.edges().len(),
        rings = d.ring_count(),
        ring_len = d.ring_len(),
        bundles = d.bundle_count(),
        rings_per_vertex = d.rings_per_vertex(),
        "derived"
    );
    if let Some(out) = out {
        let payload = Payload::new(
            "derive",
            json!({
                "shape": shape.name(),
                "strategy": format!("{:?}", def.bundles),
                "edge_eps": topology.edge_eps,
            }),
        );
        write_artifact(&out, &DescriptorJson::from(&d), &payload)?;
    }
    Ok(())
}

fn run_frame(
    shape: Shape,
    view: &[f64],
    delta: f64,
    steps: u32,
    out: Option<String>,
    cfg: SessionCfg,
) -> Result<()> {
    let [x, y, z] = view else {
        bail!("--view needs three components, got {}", view.len());
    };
    let dir = Vec3::new(*x, *y, *z);
    if dir.norm() == 0.0 {
        bail!("--view must not be the zero vector");
    }
    let mut session =
        Session::new(shape, cfg).with_context(|| format!("starting session on {shape}"))?;
    session.next_frame();
    for _ in 0..steps {
        session.rotate(dir.normalize(), delta);
    }
    let frame = session.next_frame().unwrap_or_else(|| session.frame());
    let points: usize = frame.rings.iter().map(|r| r.points.len()).sum();
    tracing::info!(shape = shape.name(), steps, rings = frame.rings.len(), points, "frame");
    let doc = FrameJson::from(&frame);
    match out {
        Some(out) => {
            let payload = Payload::new(
                "frame",
                json!({
                    "shape": shape.name(),
                    "view": [x, y, z],
                    "delta": delta,
                    "steps": steps,
                    "segments": cfg.arc_segments,
                    "speed": cfg.controller.speed,
                }),
            );
            write_artifact(&out, &doc, &payload)
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
    }
}

fn run_play(
    shape: Shape,
    seed: u64,
    clicks: &[usize],
    max_attempts: u32,
    topology: TopologyCfg,
) -> Result<()> {
    let d = shape
        .derive(&topology)
        .with_context(|| format!("deriving {shape}"))?;
    if let Some(&bad) = clicks.iter().find(|&&v| v >= d.vertex_count()) {
        bail!("vertex {bad} out of range for {shape} ({} vertices)", d.vertex_count());
    }
    let mut puzzle = PuzzleState::new(&d, ScrambleCfg { max_attempts }, seed);
    let wins: Rc<RefCell<Vec<WinEvent>>> = Rc::default();
    {
        let wins = Rc::clone(&wins);
        puzzle.subscribe_win(move |w| {
            tracing::info!(kind = ?w.kind, moves = w.moves, "won");
            wins.borrow_mut().push(*w);
        });
    }
    let report = puzzle.scramble();
    tracing::info!(
        seed,
        attempts = report.attempts,
        fallback = report.fallback,
        lit = puzzle.board().lit_count(),
        "scrambled"
    );
    for &v in clicks {
        puzzle.click_vertex(v);
    }
    let board = BoardJson::new(puzzle.board(), &wins.borrow());
    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}

fn report() -> Result<()> {
    let controller = RotationController::default();
    let payload = Payload::new(
        "report",
        json!({
            "shapes": Shape::ALL.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "speed": controller.cfg().speed,
        }),
    );
    let obj = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn write_artifact<T: Serialize>(out: &str, doc: &T, payload: &Payload) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {out}"))?;
    let prov = provenance::write_sidecar(out_path, payload)?;
    tracing::info!(out, provenance = %prov.display(), "wrote");
    Ok(())
}
