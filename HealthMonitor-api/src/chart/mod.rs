//! PNG rendering of a day of blood pressure readings
//!
//! Draws straight into an RGB buffer with the `image` crate: grid, axes,
//! systolic and diastolic lines with markers, a dashed average line and a
//! colour legend. Tick labels use a small built-in bitmap font.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use thiserror::Error;

use health_monitor_domain::entities::PlotSeries;

pub const CHART_WIDTH: u32 = 1500;
pub const CHART_HEIGHT: u32 = 700;

const MARGIN_LEFT: i64 = 90;
const MARGIN_RIGHT: i64 = 230;
const MARGIN_TOP: i64 = 40;
const MARGIN_BOTTOM: i64 = 80;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
pub const SYSTOLIC_COLOR: Rgb<u8> = Rgb([72, 61, 139]);
pub const DIASTOLIC_COLOR: Rgb<u8> = Rgb([100, 149, 237]);
pub const AVERAGE_COLOR: Rgb<u8> = Rgb([147, 112, 219]);

const TEXT_SCALE: i64 = 2;
const DASH_LENGTH: u32 = 10;
const MAX_TICKS: i64 = 10;

/// Errors raised while producing a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to encode chart: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render the series as a PNG image
pub fn render_blood_pressure_chart(series: &PlotSeries) -> Result<Vec<u8>, ChartError> {
    let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, WHITE);
    let area = PlotArea::new(value_range(series));

    draw_grid(&mut img, &area, series);
    draw_axes(&mut img, &area);

    let n = series.len();
    draw_series(&mut img, &area, n, &series.systolic, SYSTOLIC_COLOR, LineStyle::Solid);
    draw_series(&mut img, &area, n, &series.diastolic, DIASTOLIC_COLOR, LineStyle::Solid);
    draw_series(&mut img, &area, n, &series.average, AVERAGE_COLOR, LineStyle::Dashed);

    draw_legend(&mut img, &area);

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[derive(Clone, Copy, PartialEq)]
enum LineStyle {
    Solid,
    Dashed,
}

struct PlotArea {
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
    min: i64,
    max: i64,
}

impl PlotArea {
    fn new((min, max): (i64, i64)) -> Self {
        Self {
            left: MARGIN_LEFT,
            right: CHART_WIDTH as i64 - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: CHART_HEIGHT as i64 - MARGIN_BOTTOM,
            min,
            max,
        }
    }

    fn x(&self, index: usize, count: usize) -> i64 {
        if count <= 1 {
            return (self.left + self.right) / 2;
        }
        self.left + (self.right - self.left) * index as i64 / (count as i64 - 1)
    }

    fn y(&self, value: i64) -> i64 {
        let span = (self.max - self.min).max(1);
        self.bottom - (self.bottom - self.top) * (value - self.min) / span
    }
}

/// Value range padded by 10 and snapped to multiples of 10. Computed in
/// `i64` so readings at the `i32` limits still fit.
fn value_range(series: &PlotSeries) -> (i64, i64) {
    let values = series
        .systolic
        .iter()
        .chain(&series.diastolic)
        .chain(&series.average)
        .map(|&v| i64::from(v));

    let (min, max) = values.fold(None, |acc: Option<(i64, i64)>, v| match acc {
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        None => Some((v, v)),
    })
    .unwrap_or((50, 150));

    let lo = (min - 10).div_euclid(10) * 10;
    let hi = (max + 10 + 9).div_euclid(10) * 10;
    (lo, hi.max(lo + 10))
}

/// Smallest 1/2/5 step (at least 10) that keeps the grid within
/// `MAX_TICKS` intervals
fn tick_step(min: i64, max: i64) -> i64 {
    let raw = ((max - min + MAX_TICKS - 1) / MAX_TICKS).max(10);
    let mut magnitude = 1;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw)
        .unwrap_or(magnitude * 10)
}

fn draw_grid(img: &mut RgbImage, area: &PlotArea, series: &PlotSeries) {
    let step = tick_step(area.min, area.max);
    let mut value = area.min;
    while value <= area.max {
        let y = area.y(value);
        draw_line(img, (area.left, y), (area.right, y), GRID, 1, None);
        let label = value.to_string();
        let width = text_width(&label);
        draw_text(img, area.left - width - 10, y - 7, &label, AXIS);
        value += step;
    }

    for &index in &series.label_indexes {
        let x = area.x(index, series.len());
        draw_line(img, (x, area.top), (x, area.bottom), GRID, 1, None);
        if let Some(label) = series.labels.get(index) {
            let width = text_width(label);
            draw_text(img, x - width / 2, area.bottom + 14, label, AXIS);
        }
    }
}

fn draw_axes(img: &mut RgbImage, area: &PlotArea) {
    draw_line(img, (area.left, area.top), (area.left, area.bottom), AXIS, 2, None);
    draw_line(img, (area.left, area.bottom), (area.right, area.bottom), AXIS, 2, None);
}

fn draw_series(
    img: &mut RgbImage,
    area: &PlotArea,
    count: usize,
    values: &[i32],
    color: Rgb<u8>,
    style: LineStyle,
) {
    let points: Vec<(i64, i64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (area.x(i, count), area.y(i64::from(v))))
        .collect();

    let mut dash = (style == LineStyle::Dashed).then_some(0u32);
    for pair in points.windows(2) {
        draw_line(img, pair[0], pair[1], color, 2, dash.as_mut());
    }

    if style == LineStyle::Solid {
        for &(x, y) in &points {
            fill_rect(img, x - 3, y - 3, 7, 7, color);
        }
    }
}

fn draw_legend(img: &mut RgbImage, area: &PlotArea) {
    let x = area.right + 30;
    let entries = [
        (SYSTOLIC_COLOR, LineStyle::Solid),
        (DIASTOLIC_COLOR, LineStyle::Solid),
        (AVERAGE_COLOR, LineStyle::Dashed),
    ];

    for (row, (color, style)) in entries.iter().enumerate() {
        let y = area.top + 20 + row as i64 * 30;
        let mut dash = (*style == LineStyle::Dashed).then_some(0u32);
        draw_line(img, (x, y), (x + 60, y), *color, 2, dash.as_mut());
        if *style == LineStyle::Solid {
            fill_rect(img, x + 27, y - 3, 7, 7, *color);
        }
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < img.width() as i64 && y < img.height() as i64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(img: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    for dy in 0..h {
        for dx in 0..w {
            put(img, x + dx, y + dy, color);
        }
    }
}

/// Bresenham line. `dash` carries the dash phase across segments.
fn draw_line(
    img: &mut RgbImage,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    color: Rgb<u8>,
    thickness: i64,
    mut dash: Option<&mut u32>,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        let visible = match dash.as_deref_mut() {
            Some(phase) => {
                *phase += 1;
                (*phase / DASH_LENGTH) % 2 == 0
            }
            None => true,
        };
        if visible {
            fill_rect(img, x, y, thickness, thickness, color);
        }

        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn text_width(text: &str) -> i64 {
    text.chars().count() as i64 * 6 * TEXT_SCALE
}

fn draw_text(img: &mut RgbImage, x: i64, y: i64, text: &str, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let origin = x + i as i64 * 6 * TEXT_SCALE;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..5 {
                if bits & (0x10 >> col) != 0 {
                    fill_rect(
                        img,
                        origin + col * TEXT_SCALE,
                        y + row as i64 * TEXT_SCALE,
                        TEXT_SCALE,
                        TEXT_SCALE,
                        color,
                    );
                }
            }
        }
    }
}

// 5x7 glyphs, one byte per row, high bit on the left
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        _ => [0; 7],
    }
}
