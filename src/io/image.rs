//! PNG rendering of a decomposition on a circular vertex layout

use crate::{
    algorithm::search::Decomposition,
    io::{
        configuration::{IMAGE_MARGIN, IMAGE_SIZE, VERTEX_RADIUS},
        error::{AdjacencyError, Result, WithContext},
    },
};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const Z_COLOR: Rgba<u8> = Rgba([220, 40, 40, 255]);
const W_COLOR: Rgba<u8> = Rgba([40, 80, 220, 255]);
const SHARED_COLOR: Rgba<u8> = Rgba([200, 40, 200, 255]);
const VERTEX_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

// Vertex 1 sits at the top; labels run clockwise
fn vertex_position(label: usize, n: usize, size: u32) -> (i64, i64) {
    let center = f64::from(size) / 2.0;
    let radius = center - f64::from(IMAGE_MARGIN);
    let angle = TAU * (label.saturating_sub(1)) as f64 / n.max(1) as f64 - FRAC_PI_2;
    (
        (center + radius * angle.cos()).round() as i64,
        (center + radius * angle.sin()).round() as i64,
    )
}

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
        *pixel = color;
    }
}

// Bresenham line between two pixel positions
fn draw_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut error = dx + dy;

    loop {
        put(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            error += dx;
            y += step_y;
        }
    }
}

fn draw_disc(img: &mut RgbaImage, center: (i64, i64), radius: i64, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put(img, center.0 + dx, center.1 + dy, color);
            }
        }
    }
}

/// Draw Z in red and W in blue; vertex pairs joined in both are magenta
pub fn render_decomposition(decomposition: &Decomposition, size: u32) -> RgbaImage {
    let n = decomposition.z.len();
    let orientation = decomposition.orientation;
    let mut img = ImageBuffer::from_pixel(size, size, BACKGROUND);

    let canonical = |pairs: &[(usize, usize)]| -> BTreeSet<(usize, usize)> {
        pairs
            .iter()
            .map(|&(a, b)| orientation.normalize(a, b))
            .collect()
    };
    let z_pairs = canonical(&decomposition.z);
    let w_pairs = canonical(&decomposition.w);

    for (pairs, own, other) in [(&z_pairs, Z_COLOR, &w_pairs), (&w_pairs, W_COLOR, &z_pairs)] {
        for &(a, b) in pairs {
            let color = if other.contains(&(a, b)) {
                SHARED_COLOR
            } else {
                own
            };
            draw_line(
                &mut img,
                vertex_position(a, n, size),
                vertex_position(b, n, size),
                color,
            );
        }
    }

    for label in 1..=n {
        draw_disc(
            &mut img,
            vertex_position(label, n, size),
            i64::from(VERTEX_RADIUS),
            VERTEX_COLOR,
        );
    }
    img
}

/// Render a decomposition and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_decomposition_png(decomposition: &Decomposition, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_file(parent, "create directory")?;
    }

    render_decomposition(decomposition, IMAGE_SIZE)
        .save(output_path)
        .map_err(|e| AdjacencyError::ImageExport {
            path: output_path.into(),
            source: e,
        })
}
