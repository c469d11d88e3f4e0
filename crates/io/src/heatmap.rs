// Confusion-matrix heatmap (SVG)

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use sentival_recon::{ConfusionMatrix, Sentiment};

use crate::error::IoError;
use crate::report::percent;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 520;
const GRID_LEFT: i32 = 140;
const GRID_TOP: i32 = 70;
const CELL: i32 = 110;
const BAR_LEFT: i32 = GRID_LEFT + 3 * CELL + 30;
const BAR_WIDTH: i32 = 20;
const BAR_STEPS: i32 = 60;

/// Stops of the sequential blue scale, light to dark.
const BLUES: [(u8, u8, u8); 5] = [
    (247, 251, 255),
    (198, 219, 239),
    (107, 174, 214),
    (33, 113, 181),
    (8, 48, 107),
];

/// Blue for an intensity in `[0, 1]`.
pub fn blue_scale(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let span = (BLUES.len() - 1) as f64;
    let pos = t * span;
    let lo = (pos.floor() as usize).min(BLUES.len() - 2);
    let frac = pos - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (BLUES[lo], BLUES[lo + 1]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn font(size: f64, color: &RGBColor) -> TextStyle<'static> {
    ("sans-serif", size)
        .into_font()
        .color(color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Render the matrix as an annotated heatmap: true labels down the side,
/// predicted labels along the bottom, counts in each cell, colorbar on the right.
pub fn render_svg(cm: &ConfusionMatrix, accuracy: f64) -> Result<String, IoError> {
    let mut svg = String::new();
    draw(&mut svg, cm, accuracy).map_err(IoError::Render)?;
    Ok(svg)
}

fn render_err<E: std::fmt::Display>(e: E) -> String {
    e.to_string()
}

fn draw(buf: &mut String, cm: &ConfusionMatrix, accuracy: f64) -> Result<(), String> {
    let root = SVGBackend::with_string(buf, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let max = cm.max_cell().max(1) as f64;
    let labels = Sentiment::ALL;

    for (i, truth) in labels.iter().enumerate() {
        for (j, predicted) in labels.iter().enumerate() {
            let count = cm.get(*truth, *predicted);
            let t = count as f64 / max;
            let x0 = GRID_LEFT + j as i32 * CELL;
            let y0 = GRID_TOP + i as i32 * CELL;

            root.draw(&Rectangle::new([(x0, y0), (x0 + CELL, y0 + CELL)], blue_scale(t).filled()))
                .map_err(render_err)?;

            let ink = if t > 0.5 { WHITE } else { BLACK };
            root.draw(&Text::new(
                count.to_string(),
                (x0 + CELL / 2, y0 + CELL / 2),
                font(20.0, &ink),
            ))
            .map_err(render_err)?;
        }
    }

    let grid_bottom = GRID_TOP + 3 * CELL;
    root.draw(&Rectangle::new(
        [(GRID_LEFT, GRID_TOP), (GRID_LEFT + 3 * CELL, grid_bottom)],
        BLACK.stroke_width(1),
    ))
    .map_err(render_err)?;

    for (k, label) in labels.iter().enumerate() {
        let center = k as i32 * CELL + CELL / 2;
        root.draw(&Text::new(
            format!("{label} (real)"),
            (GRID_LEFT - 45, GRID_TOP + center),
            font(13.0, &BLACK),
        ))
        .map_err(render_err)?;
        root.draw(&Text::new(
            format!("{label} (pred)"),
            (GRID_LEFT + center, grid_bottom + 18),
            font(13.0, &BLACK),
        ))
        .map_err(render_err)?;
    }

    root.draw(&Text::new(
        format!("Matriz de Confusión - Accuracy: {}", percent(accuracy)),
        ((WIDTH / 2) as i32, 32),
        font(18.0, &BLACK),
    ))
    .map_err(render_err)?;
    root.draw(&Text::new(
        "Sentimiento Predicho".to_string(),
        (GRID_LEFT + 3 * CELL / 2, grid_bottom + 50),
        font(15.0, &BLACK),
    ))
    .map_err(render_err)?;
    root.draw(&Text::new(
        "Sentimiento Real".to_string(),
        (28, GRID_TOP + 3 * CELL / 2),
        ("sans-serif", 15.0)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(render_err)?;

    // Colorbar, dark end on top
    let bar_height = 3 * CELL;
    let step = bar_height as f64 / BAR_STEPS as f64;
    for s in 0..BAR_STEPS {
        let y0 = GRID_TOP + (s as f64 * step).round() as i32;
        let y1 = GRID_TOP + ((s + 1) as f64 * step).round() as i32;
        let t = 1.0 - (s as f64 + 0.5) / BAR_STEPS as f64;
        root.draw(&Rectangle::new([(BAR_LEFT, y0), (BAR_LEFT + BAR_WIDTH, y1)], blue_scale(t).filled()))
            .map_err(render_err)?;
    }
    root.draw(&Rectangle::new(
        [(BAR_LEFT, GRID_TOP), (BAR_LEFT + BAR_WIDTH, grid_bottom)],
        BLACK.stroke_width(1),
    ))
    .map_err(render_err)?;
    for (value, y) in [(cm.max_cell(), GRID_TOP), (0, grid_bottom)] {
        root.draw(&Text::new(
            value.to_string(),
            (BAR_LEFT + BAR_WIDTH + 18, y),
            font(12.0, &BLACK),
        ))
        .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}
