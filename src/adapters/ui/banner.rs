//! Startup banner (LEVER-RANK) with a vertical color gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Lever teal (#00b2a9).
const TEAL: (u8, u8, u8) = (0x00, 0xb2, 0xa9);
/// Signal amber (#ffb000).
const AMBER: (u8, u8, u8) = (0xff, 0xb0, 0x00);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn banner_art() -> Option<String> {
    let font = FIGfont::standard().ok()?;
    font.convert("LEVER-RANK").map(|figure| figure.to_string())
}

/// Prints "LEVER-RANK" in the standard figlet font, teal to amber, then the
/// version. Falls back to plain text if the font cannot be loaded.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art().unwrap_or_else(|| "LEVER-RANK".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(TEAL, AMBER, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: TEAL.0,
        g: TEAL.1,
        b: TEAL.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  candidate ranking for Lever\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(lerp_rgb(TEAL, AMBER, 0.0), TEAL);
        assert_eq!(lerp_rgb(TEAL, AMBER, 1.0), AMBER);
    }
}
