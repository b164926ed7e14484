use std::fmt::Write as _;

use crate::edges::{Edge, PieceEdges};

pub const TAB_WIDTH_RATIO: f32 = 0.46;
pub const TAB_HANDLE_RATIO: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo {
        x: f32,
        y: f32,
    },
    LineTo {
        x: f32,
        y: f32,
    },
    CurveTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    cmds: Vec<PathCmd>,
}

impl Outline {
    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn to_svg(&self) -> String {
        let mut path = String::new();
        for cmd in &self.cmds {
            if !path.is_empty() {
                path.push(' ');
            }
            match *cmd {
                PathCmd::MoveTo { x, y } => {
                    let _ = write!(path, "M {},{}", fmt_coord(x), fmt_coord(y));
                }
                PathCmd::LineTo { x, y } => {
                    let _ = write!(path, "L {},{}", fmt_coord(x), fmt_coord(y));
                }
                PathCmd::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let _ = write!(
                        path,
                        "C {},{} {},{} {},{}",
                        fmt_coord(x1),
                        fmt_coord(y1),
                        fmt_coord(x2),
                        fmt_coord(y2),
                        fmt_coord(x),
                        fmt_coord(y)
                    );
                }
                PathCmd::Close => path.push('Z'),
            }
        }
        path
    }
}

fn fmt_coord(value: f32) -> String {
    format!("{:.2}", value)
}

fn edge_point(
    start: (f32, f32),
    dir: (f32, f32),
    normal: (f32, f32),
    along: f32,
    offset: f32,
) -> (f32, f32) {
    (
        start.0 + dir.0 * along + normal.0 * offset,
        start.1 + dir.1 * along + normal.1 * offset,
    )
}

fn append_edge(
    cmds: &mut Vec<PathCmd>,
    start: (f32, f32),
    dir: (f32, f32),
    normal: (f32, f32),
    length: f32,
    edge: Edge,
    depth_base: f32,
) -> (f32, f32) {
    let end = edge_point(start, dir, normal, length, 0.0);
    if edge.is_flat() {
        cmds.push(PathCmd::LineTo { x: end.0, y: end.1 });
        return end;
    }

    let tab_width = length * TAB_WIDTH_RATIO * edge.size;
    let mid = length * 0.5;
    let tab_start = mid - tab_width * 0.5;
    let tab_end = mid + tab_width * 0.5;
    let depth = depth_base * edge.depth * edge.sign as f32;
    let handle = tab_width * TAB_HANDLE_RATIO;

    let p1 = edge_point(start, dir, normal, tab_start, 0.0);
    let cp1 = edge_point(start, dir, normal, tab_start + handle, 0.0);
    let cp2 = edge_point(start, dir, normal, mid - handle, depth);
    let p2 = edge_point(start, dir, normal, mid, depth);
    let cp3 = edge_point(start, dir, normal, mid + handle, depth);
    let cp4 = edge_point(start, dir, normal, tab_end - handle, 0.0);
    let p3 = edge_point(start, dir, normal, tab_end, 0.0);

    cmds.push(PathCmd::LineTo { x: p1.0, y: p1.1 });
    cmds.push(PathCmd::CurveTo {
        x1: cp1.0,
        y1: cp1.1,
        x2: cp2.0,
        y2: cp2.1,
        x: p2.0,
        y: p2.1,
    });
    cmds.push(PathCmd::CurveTo {
        x1: cp3.0,
        y1: cp3.1,
        x2: cp4.0,
        y2: cp4.1,
        x: p3.0,
        y: p3.1,
    });
    cmds.push(PathCmd::LineTo { x: end.0, y: end.1 });
    end
}

// Walks top, right, bottom, left from the outer-box corner (tab, tab).
// Pure in its inputs: identical edges and dimensions yield an identical
// command list, so neighboring outlines interlock regardless of order.
pub fn build_piece_path(edges: &PieceEdges, width: f32, height: f32, tab: f32) -> Outline {
    let mut cmds = Vec::new();
    let start = (tab, tab);
    cmds.push(PathCmd::MoveTo {
        x: start.0,
        y: start.1,
    });

    let cursor = append_edge(&mut cmds, start, (1.0, 0.0), (0.0, -1.0), width, edges.top, tab);
    let cursor = append_edge(&mut cmds, cursor, (0.0, 1.0), (1.0, 0.0), height, edges.right, tab);
    let cursor = append_edge(
        &mut cmds,
        cursor,
        (-1.0, 0.0),
        (0.0, 1.0),
        width,
        edges.bottom,
        tab,
    );
    append_edge(&mut cmds, cursor, (0.0, -1.0), (-1.0, 0.0), height, edges.left, tab);

    cmds.push(PathCmd::Close);
    Outline { cmds }
}
