// Command-line settings for a drawing session.

use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};

/// Largest canvas side accepted on the command line.
pub const MAX_SIDE: usize = 8192;

#[derive(Parser, Debug, Clone)]
#[command(name = "flipbook", version, about = "Draw frames, flip through them, play them back")]
pub struct Cli {
    /// Canvas width in pixels (fixed for the session).
    #[arg(long, default_value_t = 640)]
    pub width: usize,

    /// Canvas height in pixels (fixed for the session).
    #[arg(long, default_value_t = 400)]
    pub height: usize,

    /// Playback interval between frames, in milliseconds.
    #[arg(long = "interval-ms", default_value_t = 100)]
    pub interval_ms: u64,

    /// Starting brush width in pixels.
    #[arg(long = "brush-size", default_value_t = 5)]
    pub brush_size: u32,

    /// Starting brush colour as #RRGGBB.
    #[arg(long, default_value = "#000000")]
    pub color: String,
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub interval: Duration,
    pub brush_size: u32,
    pub color: u32,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.width == 0 || cli.height == 0 {
            return Err(Error::config(format!("canvas must not be empty ({}x{})", cli.width, cli.height)));
        }
        if cli.width > MAX_SIDE || cli.height > MAX_SIDE {
            return Err(Error::config(format!(
                "canvas {}x{} is larger than {MAX_SIDE}x{MAX_SIDE}",
                cli.width, cli.height
            )));
        }
        if cli.interval_ms == 0 {
            return Err(Error::config("playback interval must be at least 1 ms"));
        }
        Ok(Self {
            width: cli.width,
            height: cli.height,
            interval: Duration::from_millis(cli.interval_ms),
            brush_size: cli.brush_size,
            color: parse_hex_color(&cli.color)?,
        })
    }
}

/// "#RRGGBB" (or "RRGGBB") -> 0x00RRGGBB.
pub fn parse_hex_color(s: &str) -> Result<u32> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::config(format!("colour must look like #RRGGBB, got {s:?}")));
    }
    u32::from_str_radix(hex, 16).map_err(|e| Error::config(format!("colour {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["flipbook"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_match_the_classic_tool() {
        let cfg = Config::from_cli(&cli(&[])).unwrap();
        assert_eq!((cfg.width, cfg.height), (640, 400));
        assert_eq!(cfg.interval, Duration::from_millis(100));
        assert_eq!(cfg.color, 0);
        assert_eq!(cfg.brush_size, 5);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::from_cli(&cli(&["--width", "320", "--interval-ms", "40", "--color", "#ff8000"])).unwrap();
        assert_eq!(cfg.width, 320);
        assert_eq!(cfg.interval, Duration::from_millis(40));
        assert_eq!(cfg.color, 0x00_FF_80_00);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(Config::from_cli(&cli(&["--height", "0"])), Err(Error::Config(_))));
        assert!(matches!(Config::from_cli(&cli(&["--interval-ms", "0"])), Err(Error::Config(_))));
        assert!(matches!(Config::from_cli(&cli(&["--width", "8193"])), Err(Error::Config(_))));
        assert!(matches!(
            Config::from_cli(&cli(&["--height", "18446744073709551615"])),
            Err(Error::Config(_))
        ));
        assert!(Config::from_cli(&cli(&["--width", "8192", "--height", "8192"])).is_ok());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert_eq!(parse_hex_color("00ff00").unwrap(), 0x00_00_FF_00);
    }
}
