//! Startup banner: the app name in figlet ASCII, shaded left to right from deep blue to sky.

use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

const TITLE: &str = "City Discussion";
const TAGLINE: &str = "Find out the current hot news in your city and what Reddit says about it";

const FROM: [u8; 3] = [0x1d, 0x4e, 0xd8];
const TO: [u8; 3] = [0x38, 0xbd, 0xf8];

/// Colour of column `col` in a banner `width` columns wide.
fn shade(col: usize, width: usize) -> Color {
    let span = width.saturating_sub(1).max(1) as u32;
    let pos = (col as u32).min(span);
    let mix = |a: u8, b: u8| ((u32::from(a) * (span - pos) + u32::from(b) * pos) / span) as u8;
    Color::Rgb {
        r: mix(FROM[0], TO[0]),
        g: mix(FROM[1], TO[1]),
        b: mix(FROM[2], TO[2]),
    }
}

fn art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_uppercase())
}

fn write_banner(out: &mut impl Write) -> io::Result<()> {
    let art = art();
    let width = art.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    for line in art.lines() {
        for (col, ch) in line.chars().enumerate() {
            out.queue(SetForegroundColor(shade(col, width)))?
                .queue(Print(ch))?;
        }
        out.queue(Print("\r\n"))?;
    }
    out.queue(ResetColor)?.queue(Print(format!(
        "{} v{}\r\n{}\r\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        TAGLINE
    )))?;
    out.flush()
}

pub fn print_welcome() {
    let _ = write_banner(&mut stdout().lock());
}
