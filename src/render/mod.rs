mod fonts;

pub use fonts::FontCatalog;

use crate::background::Background;
use crate::format::{format_bytes, format_uptime};
use crate::model::MetricsSnapshot;
use chrono::FixedOffset;
use image::imageops::FilterType;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_bitmap::BitMapBackend;
use tracing::debug;

pub const WIDTH: u32 = 1280;
pub const HEIGHT: u32 = 720;

const PANEL_X: i32 = 500;
const PANEL_Y: i32 = 60;
const PANEL_W: i32 = 720;
const PANEL_H: i32 = 600;
const PANEL_OPACITY: f64 = 0.55;

const WATERMARK_POS: (i32, i32) = (60, 56);
const TEXT_X: i32 = PANEL_X + 40;
const TITLE_Y: i32 = PANEL_Y + 30;
const TIMESTAMP_Y: i32 = TITLE_Y + 60;
const ROWS_Y: i32 = TIMESTAMP_Y + 80;
const ROW_GAP: i32 = 75;
const VALUE_X: i32 = TEXT_X + 220;

pub const BAR_TRACK_WIDTH: i32 = 325;
const BAR_HEIGHT: i32 = 20;
const BAR_TRACK_OPACITY: f64 = 0.4;
const PERCENT_X: i32 = VALUE_X + BAR_TRACK_WIDTH + 15;

const TITLE_SIZE: f64 = 48.0;
const TIMESTAMP_SIZE: f64 = 20.0;
const WATERMARK_SIZE: f64 = 24.0;
const ROW_SIZE: f64 = 26.0;
const PERCENT_SIZE: f64 = 22.0;

const LABEL_COLOR: RGBColor = RGBColor(0xff, 0xde, 0x59);
const BAR_FILL_COLOR: RGBColor = RGBColor(0xff, 0x4b, 0x1f);

const WATERMARK: &str = "STATUS CARD";
const TITLE: &str = "System Status";

// Display timezone is a fixed IST offset, not a tz lookup, so the
// timestamp line is deterministic for a given capture instant.
const TZ_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %I:%M:%S %P";

/// In-memory RGB24 raster, row-major, discarded after encoding.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Fixed 1280x720 layout. Deterministic for identical inputs; individual
/// text elements may degrade (missing fonts) but composition never fails.
pub fn compose(snapshot: &MetricsSnapshot, background: &Background, fonts: &FontCatalog) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(WIDTH, HEIGHT);
    paint_background(&mut buffer, background);

    {
        let backend = BitMapBackend::with_buffer(&mut buffer.data, (WIDTH, HEIGHT));
        let root = backend.into_drawing_area();

        draw_rect(
            &root,
            (PANEL_X, PANEL_Y),
            (PANEL_X + PANEL_W, PANEL_Y + PANEL_H),
            BLACK.mix(PANEL_OPACITY).filled(),
        );

        draw_text(&root, WATERMARK, WATERMARK_POS, fonts.bold(), WATERMARK_SIZE, FontStyle::Bold, &WHITE);
        draw_text(&root, TITLE, (TEXT_X, TITLE_Y), fonts.bold(), TITLE_SIZE, FontStyle::Bold, &WHITE);

        let timestamp = local_timestamp(snapshot);
        draw_text(
            &root,
            &timestamp,
            (TEXT_X, TIMESTAMP_Y),
            fonts.regular(),
            TIMESTAMP_SIZE,
            FontStyle::Normal,
            &WHITE.mix(0.8),
        );

        let memory_value = format!(
            "{} / {} ({}%)",
            format_bytes(snapshot.used_memory_bytes),
            format_bytes(snapshot.total_memory_bytes),
            snapshot.memory_percent,
        );
        let language_value = format!("{} {}", snapshot.runtime_language, snapshot.runtime_version);

        let mut y = ROWS_Y;
        draw_row(&root, fonts, y, "Ping:", &snapshot.ping_label);
        y += ROW_GAP;
        draw_cpu_row(&root, fonts, y, snapshot.cpu_usage_percent);
        y += ROW_GAP;
        draw_row(&root, fonts, y, "Memory:", &memory_value);
        y += ROW_GAP;
        draw_row(&root, fonts, y, "Uptime:", &format_uptime(snapshot.uptime_seconds));
        y += ROW_GAP;
        draw_row(&root, fonts, y, "Language:", &language_value);

        let _ = root.present();
    }

    buffer
}

fn paint_background(buffer: &mut PixelBuffer, background: &Background) {
    match background {
        Background::Image(image) => {
            let scaled = image
                .resize_exact(buffer.width, buffer.height, FilterType::Triangle)
                .into_rgb8();
            buffer.data.copy_from_slice(scaled.as_raw());
        }
        Background::Gradient { top, bottom } => fill_gradient(buffer, *top, *bottom),
    }
}

/// Top-left to bottom-right linear gradient between the two stops.
fn fill_gradient(buffer: &mut PixelBuffer, top: (u8, u8, u8), bottom: (u8, u8, u8)) {
    let (w, h) = (buffer.width as usize, buffer.height as usize);
    let span = (w + h).saturating_sub(2).max(1) as f32;
    for y in 0..h {
        for x in 0..w {
            let t = (x + y) as f32 / span;
            let px = &mut buffer.data[(y * w + x) * 3..(y * w + x) * 3 + 3];
            px[0] = lerp(top.0, bottom.0, t);
            px[1] = lerp(top.1, bottom.1, t);
            px[2] = lerp(top.2, bottom.2, t);
        }
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn local_timestamp(snapshot: &MetricsSnapshot) -> String {
    let offset = FixedOffset::east_opt(TZ_OFFSET_SECS).expect("offset within a day");
    snapshot
        .captured_at
        .with_timezone(&offset)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

fn draw_row(
    root: &DrawingArea<BitMapBackend, Shift>,
    fonts: &FontCatalog,
    y: i32,
    label: &str,
    value: &str,
) {
    draw_text(root, label, (TEXT_X, y), fonts.bold(), ROW_SIZE, FontStyle::Bold, &LABEL_COLOR);
    draw_text(root, value, (VALUE_X, y), fonts.regular(), ROW_SIZE, FontStyle::Normal, &WHITE);
}

fn draw_cpu_row(root: &DrawingArea<BitMapBackend, Shift>, fonts: &FontCatalog, y: i32, percent: f32) {
    draw_text(root, "CPU Usage:", (TEXT_X, y), fonts.bold(), ROW_SIZE, FontStyle::Bold, &LABEL_COLOR);

    draw_rect(
        root,
        (VALUE_X, y),
        (VALUE_X + BAR_TRACK_WIDTH, y + BAR_HEIGHT),
        BLACK.mix(BAR_TRACK_OPACITY).filled(),
    );
    let fill = bar_fill_width(percent, BAR_TRACK_WIDTH);
    if fill > 0 {
        draw_rect(
            root,
            (VALUE_X, y),
            (VALUE_X + fill, y + BAR_HEIGHT),
            BAR_FILL_COLOR.filled(),
        );
    }

    let text = format!("{percent:.1}%");
    draw_text(root, &text, (PERCENT_X, y), fonts.regular(), PERCENT_SIZE, FontStyle::Normal, &WHITE);
}

/// Proportional fill, clamped to the track so out-of-range readings can
/// never overflow the bar bounds.
pub(crate) fn bar_fill_width(percent: f32, track_width: i32) -> i32 {
    let filled = percent / 100.0 * track_width as f32;
    (filled as i32).clamp(0, track_width)
}

fn draw_rect(
    root: &DrawingArea<BitMapBackend, Shift>,
    top_left: (i32, i32),
    bottom_right: (i32, i32),
    style: ShapeStyle,
) {
    if let Err(err) = root.draw(&Rectangle::new([top_left, bottom_right], style)) {
        debug!(error = %err, "rectangle element dropped");
    }
}

fn draw_text<C: Color>(
    root: &DrawingArea<BitMapBackend, Shift>,
    text: &str,
    pos: (i32, i32),
    family: FontFamily<'static>,
    size: f64,
    style: FontStyle,
    color: &C,
) {
    let desc = FontDesc::new(family, size, style);
    if root.draw(&Text::new(text, pos, desc.color(color))).is_ok() {
        return;
    }

    // Named family not present in the host font catalog; the platform
    // default must always be able to carry the text.
    let fallback = FontDesc::new(FontFamily::SansSerif, size, style);
    if let Err(err) = root.draw(&Text::new(text, pos, fallback.color(color))) {
        debug!(error = %err, "text element dropped");
    }
}
