//! JSON shapes for exported descriptors, frames and boards.

use ringlights::api::{Board, Frame, PolytopeDescriptor, WinEvent};
use serde::Serialize;

#[derive(Serialize)]
pub struct RingJson {
    pub vertices: Vec<usize>,
    pub bundle: usize,
}

#[derive(Serialize)]
pub struct DescriptorJson {
    pub name: String,
    pub edge_threshold: f64,
    pub vertices: Vec<[f64; 4]>,
    pub rings: Vec<RingJson>,
    pub bundle_colors: Vec<String>,
}

impl From<&PolytopeDescriptor> for DescriptorJson {
    fn from(d: &PolytopeDescriptor) -> Self {
        Self {
            name: d.name().to_string(),
            edge_threshold: d.edge_threshold(),
            vertices: d.vertices().iter().map(|v| [v.x, v.y, v.z, v.w]).collect(),
            rings: d
                .rings()
                .iter()
                .map(|r| RingJson {
                    vertices: r.vertices.clone(),
                    bundle: r.bundle,
                })
                .collect(),
            bundle_colors: d.bundle_colors().iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct RingPathJson {
    pub ring: usize,
    pub bundle: usize,
    pub color: String,
    pub lit: bool,
    pub points: Vec<[f64; 3]>,
}

#[derive(Serialize)]
pub struct FrameJson {
    pub vertices: Vec<[f64; 3]>,
    pub rings: Vec<RingPathJson>,
}

impl From<&Frame> for FrameJson {
    fn from(f: &Frame) -> Self {
        Self {
            vertices: f.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            rings: f
                .rings
                .iter()
                .map(|r| RingPathJson {
                    ring: r.ring,
                    bundle: r.bundle,
                    color: r.color.to_string(),
                    lit: r.lit,
                    points: r.points.iter().map(|p| [p.x, p.y, p.z]).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct WinJson {
    pub kind: String,
    pub moves: u32,
}

impl From<&WinEvent> for WinJson {
    fn from(w: &WinEvent) -> Self {
        Self {
            kind: format!("{:?}", w.kind),
            moves: w.moves,
        }
    }
}

#[derive(Serialize)]
pub struct BoardJson {
    pub ring_states: Vec<bool>,
    pub lit: usize,
    pub move_count: u32,
    pub mode: String,
    pub has_won: bool,
    pub wins: Vec<WinJson>,
}

impl BoardJson {
    pub fn new(board: &Board, wins: &[WinEvent]) -> Self {
        Self {
            ring_states: board.ring_states().to_vec(),
            lit: board.lit_count(),
            move_count: board.move_count(),
            mode: format!("{:?}", board.mode()),
            has_won: board.has_won(),
            wins: wins.iter().map(WinJson::from).collect(),
        }
    }
}
