use numeric_core::{EulerRow, StepError};

pub const HEADERS: [&str; 4] = ["x", "y", "Slope", "yn"];

/// `%g` style: six significant digits, trailing zeros dropped, scientific
/// outside `1e-4 <= |v| < 1e6`.
pub fn format_g(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    let sci = format!("{v:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..6).contains(&exp) {
        let decimals = (5 - exp).max(0) as usize;
        strip_zeros(&format!("{v:.decimals$}"))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    }
}

fn strip_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Renders the trace as a boxed grid table. A failed evaluation becomes a
/// last row with `error` in the computed columns.
pub fn render(rows: &[EulerRow], failure: Option<&StepError>) -> String {
    let mut body: Vec<[String; 4]> = rows
        .iter()
        .map(|r| [format_g(r.x), format_g(r.y), format_g(r.slope), format_g(r.y_next)])
        .collect();
    if let Some(StepError::Evaluation { x, y, .. }) = failure {
        body.push([format_g(*x), format_g(*y), "error".into(), "error".into()]);
    }

    let mut widths = HEADERS.map(str::len);
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let rule = |fill: char| {
        let mut line = String::from("+");
        for w in widths {
            line.extend(std::iter::repeat_n(fill, w + 2));
            line.push('+');
        }
        line
    };
    let line = |cells: &[&str]| {
        let mut out = String::from("|");
        for (cell, w) in cells.iter().zip(widths) {
            out.push_str(&format!(" {cell:>w$} |"));
        }
        out
    };

    let mut out = vec![rule('-'), line(&HEADERS[..]), rule('=')];
    for row in &body {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(line(&cells[..]));
        out.push(rule('-'));
    }
    if body.is_empty() {
        out.pop();
        out.push(rule('-'));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use numeric_core::EvaluationError;

    #[test]
    fn general_format() {
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(2.25), "2.25");
        assert_eq!(format_g(0.1 + 0.2), "0.3");
        assert_eq!(format_g(-0.5), "-0.5");
        assert_eq!(format_g(123456.0), "123456");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001234), "1.234e-05");
        assert_eq!(format_g(1e100), "1e+100");
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(f64::NAN), "nan");
        assert_eq!(format_g(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn renders_grid_table() {
        let rows = [
            EulerRow { x: 0.0, y: 1.0, slope: 1.0, y_next: 1.5 },
            EulerRow { x: 0.5, y: 1.5, slope: 1.5, y_next: 2.25 },
        ];
        let expected = "\
+-----+-----+-------+------+
|   x |   y | Slope |   yn |
+=====+=====+=======+======+
|   0 |   1 |     1 |  1.5 |
+-----+-----+-------+------+
| 0.5 | 1.5 |   1.5 | 2.25 |
+-----+-----+-------+------+";
        assert_eq!(render(&rows, None), expected);
    }

    #[test]
    fn failure_adds_error_row() {
        let rows = [EulerRow { x: 0.0, y: 1.0, slope: 2.0, y_next: 3.0 }];
        let err = StepError::Evaluation {
            step: 1,
            x: 1.0,
            y: 3.0,
            source: EvaluationError::DivisionByZero,
        };
        let table = render(&rows, Some(&err));
        let last_row = table.lines().rev().nth(1).unwrap();
        assert_eq!(last_row, "| 1 | 3 | error | error |");
    }
}
