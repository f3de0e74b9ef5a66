use numeric_core::Grid;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Character heatmap of `field`, first grid row at the bottom. Values are
/// mapped linearly over `range` and clamped; non-finite cells print as `?`.
/// Columns and rows are sampled down to at most `max_cols` x `max_rows`.
pub fn heatmap(field: &Grid, range: (f64, f64), max_cols: usize, max_rows: usize) -> String {
    let (rows, cols) = field.shape();
    let out_cols = cols.min(max_cols.max(1));
    let out_rows = rows.min(max_rows.max(1));
    let (lo, hi) = range;
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut lines = Vec::with_capacity(out_rows);
    for r in (0..out_rows).rev() {
        let i = r * rows / out_rows;
        let line: String = (0..out_cols)
            .map(|c| {
                let v = field.get(i, c * cols / out_cols);
                if !v.is_finite() {
                    return '?';
                }
                let t = ((v - lo) / span).clamp(0.0, 1.0);
                let k = (t * (RAMP.len() - 1) as f64).round() as usize;
                RAMP[k] as char
            })
            .collect();
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_row_prints_last() {
        let mut g = Grid::new(3, 4).unwrap();
        g.fill_rect(0..1, 0..4, 1.0);
        let map = heatmap(&g, (0.0, 1.0), 80, 40);
        assert_eq!(map, "    \n    \n@@@@");
    }

    #[test]
    fn downsamples_and_marks_nan() {
        let mut g = Grid::filled(10, 10, 0.5).unwrap();
        g.set(0, 0, f64::NAN);
        let map = heatmap(&g, (0.0, 1.0), 5, 2);
        let lines: Vec<_> = map.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "?++++");
        assert_eq!(lines[0], "+++++");
    }
}
