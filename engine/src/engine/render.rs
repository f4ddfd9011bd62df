// engine/src/engine/render.rs
#![forbid(unsafe_code)]

use crate::engine::cell::{Cell, CellKind};
use crate::engine::grid::GridSpec;
use crate::engine::path::ExtractedPath;
use crate::engine::values::{CellValue, ValueTable};
use crate::policy::PolicyTable;

const VALUE_W: usize = 8;

fn border(size: usize, cell_w: usize) -> String {
    format!("+{}+\n", "-".repeat(size * cell_w))
}

fn render_cells(spec: &GridSpec, cell_w: usize, mut glyph: impl FnMut(Cell) -> String) -> String {
    let n = spec.size();
    let mut s = border(n, cell_w);
    for row in 0..n {
        s.push('|');
        for col in 0..n {
            s.push_str(&format!("{:>cell_w$}", glyph(Cell::new(row, col))));
        }
        s.push_str("|\n");
    }
    s.push_str(&border(n, cell_w));
    s
}

/// Value table, one fixed-width column per cell. Obstacles print as `—`.
pub fn render_values(spec: &GridSpec, values: &ValueTable) -> String {
    render_cells(spec, VALUE_W, |cell| match values.get(cell) {
        CellValue::Defined(v) => format!("{v:.2}"),
        CellValue::Undefined => "—".to_string(),
    })
}

/// Policy arrows; `G` marks the end, `#` obstacles, `.` cells without an action.
pub fn render_policy(spec: &GridSpec, policy: &PolicyTable) -> String {
    render_cells(spec, 2, |cell| match spec.kind_at(cell) {
        Some(CellKind::End) => "G".to_string(),
        Some(CellKind::Obstacle) => "#".to_string(),
        _ => policy
            .get(cell)
            .map_or_else(|| ".".to_string(), |a| a.glyph().to_string()),
    })
}

/// Grid with `S`/`G`/`#` and `*` on path cells.
pub fn render_path(spec: &GridSpec, path: &ExtractedPath) -> String {
    let mut s = render_cells(spec, 2, |cell| match spec.kind_at(cell) {
        Some(CellKind::Start) => "S".to_string(),
        Some(CellKind::End) => "G".to_string(),
        Some(CellKind::Obstacle) => "#".to_string(),
        None if path.cells.contains(&cell) => "*".to_string(),
        None => ".".to_string(),
    });
    s.push_str(&format!(
        "len={} degenerate={}\n",
        path.len(),
        path.is_degenerate()
    ));
    s
}
