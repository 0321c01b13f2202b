use std::fmt::Write;

use barframe::{BuiltModel, LocalFrame};
use nalgebra::Vector3;
use serde::Serialize;

/// Frame of a single bar, keyed by the identifier from the model file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarRow {
    /// Bar identifier.
    pub id: u32,
    /// Distance between the end nodes.
    pub length: f64,
    /// Local coordinate system of the bar.
    pub frame: LocalFrame,
}

/// Gather one row per bar in identifier order.
#[must_use]
pub fn collect_rows(built: &BuiltModel) -> Vec<BarRow> {
    built
        .bars
        .iter()
        .filter_map(|(&id, &bar)| {
            let frame = built.structure.bar_frame(bar)?;
            let length = built.structure.bar_length(bar)?;
            Some(BarRow { id, length, frame })
        })
        .collect()
}

/// Six decimals, with negative zero printed as zero.
fn format_vector(v: Vector3<f64>) -> String {
    format!("({:+.6}, {:+.6}, {:+.6})", v.x + 0.0, v.y + 0.0, v.z + 0.0)
}

/// Render the local axes of every bar as plain text.
#[must_use]
pub fn render_report(rows: &[BarRow]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        output.push_str("Model contains no bars\n");
        return output;
    }

    for row in rows {
        let frame = &row.frame;
        writeln!(&mut output, "Bar {} (length {:.6})", row.id, row.length)
            .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  origin {}",
            format_vector(frame.origin().to_vector())
        )
        .expect("writing to string cannot fail");
        writeln!(&mut output, "  x'     {}", format_vector(frame.x_prime()))
            .expect("writing to string cannot fail");
        writeln!(&mut output, "  y'     {}", format_vector(frame.y_prime()))
            .expect("writing to string cannot fail");
        writeln!(&mut output, "  z'     {}", format_vector(frame.z_prime()))
            .expect("writing to string cannot fail");
    }

    output
}
