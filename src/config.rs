use std::path::PathBuf;
use std::str::FromStr;

use clap::{value_parser, Arg, ArgMatches, Command};
use log::LevelFilter;

pub const DEFAULT_WIDTH: usize = 1280;
pub const DEFAULT_HEIGHT: usize = 720;
pub const DEFAULT_FPS: u32 = 75;
pub const DEFAULT_UI_SIZE: usize = 512;
pub const DEFAULT_BUILDING_SEED: u64 = 42;
pub const DEFAULT_GROUND_SEED: u64 = 12345;
pub const DEFAULT_OVERLAY_TEXT: &str = "SmartWatch 3D";
/// Largest accepted window or UI side, in pixels.
pub const MAX_DIMENSION: i64 = 8192;

/// Runtime settings, all from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
    /// Side of the square watch UI target, in pixels.
    pub ui_size: usize,
    pub building_seed: u64,
    pub ground_seed: u64,
    pub bezel_texture: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub overlay_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            ui_size: DEFAULT_UI_SIZE,
            building_seed: DEFAULT_BUILDING_SEED,
            ground_seed: DEFAULT_GROUND_SEED,
            bezel_texture: None,
            log_level: LevelFilter::Info,
            log_file: None,
            overlay_text: DEFAULT_OVERLAY_TEXT.to_string(),
        }
    }
}

pub fn create_clap_command() -> Command {
    Command::new("smartwatch3d")
        .about("Smartwatch UI composited onto a 3D watch face in a software-rendered scene")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .help("Window width")
                .default_value("1280")
                .value_parser(value_parser!(u32).range(1..=MAX_DIMENSION)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .help("Window height")
                .default_value("720")
                .value_parser(value_parser!(u32).range(1..=MAX_DIMENSION)),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .help("Frame rate cap")
                .default_value("75")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("ui-size")
                .long("ui-size")
                .value_name("PIXELS")
                .help("Resolution of the square off-screen watch UI")
                .default_value("512")
                .value_parser(value_parser!(u32).range(1..=MAX_DIMENSION)),
        )
        .arg(
            Arg::new("building-seed")
                .long("building-seed")
                .help("Seed for building placement, size and colour")
                .default_value("42")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("ground-seed")
                .long("ground-seed")
                .help("Seed for the ground and road noise textures")
                .default_value("12345")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("bezel-texture")
                .long("bezel-texture")
                .value_name("FILE")
                .help("Image applied to the watch bezel. If it fails to load the bezel is untextured.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value("info")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"]),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Also write the log to this file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("overlay-text")
                .long("overlay-text")
                .value_name("TEXT")
                .help("Title shown in the corner banner")
                .default_value(DEFAULT_OVERLAY_TEXT),
        )
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Config::default();
        let log_level = matches
            .get_one::<String>("log-level")
            .and_then(|s| LevelFilter::from_str(s).ok())
            .unwrap_or(defaults.log_level);

        Self {
            width: dimension(matches, "width").unwrap_or(defaults.width),
            height: dimension(matches, "height").unwrap_or(defaults.height),
            fps: matches.get_one("fps").copied().unwrap_or(defaults.fps),
            ui_size: dimension(matches, "ui-size").unwrap_or(defaults.ui_size),
            building_seed: matches
                .get_one("building-seed")
                .copied()
                .unwrap_or(defaults.building_seed),
            ground_seed: matches
                .get_one("ground-seed")
                .copied()
                .unwrap_or(defaults.ground_seed),
            bezel_texture: matches.get_one::<PathBuf>("bezel-texture").cloned(),
            log_level,
            log_file: matches.get_one::<PathBuf>("log-file").cloned(),
            overlay_text: matches
                .get_one::<String>("overlay-text")
                .cloned()
                .unwrap_or(defaults.overlay_text),
        }
    }

    /// Second banner line.
    pub fn overlay_subtitle(&self) -> String {
        format!("{}x{} @ {} fps", self.width, self.height, self.fps)
    }
}

fn dimension(matches: &ArgMatches, id: &str) -> Option<usize> {
    matches.get_one::<u32>(id).map(|&v| v as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = std::iter::once("smartwatch3d").chain(args.iter().copied());
        create_clap_command()
            .try_get_matches_from(argv)
            .map(|m| Config::from_matches(&m))
    }

    #[test]
    fn defaults_match_config_default() {
        assert_eq!(parse(&[]).unwrap(), Config::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--width", "320", "--height", "200", "--fps", "30", "--ui-size", "128",
            "--building-seed", "7", "--log-level", "debug", "--log-file", "run.log",
            "--bezel-texture", "bezel.png", "--overlay-text", "Demo",
        ])
        .unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.fps, cfg.ui_size), (320, 200, 30, 128));
        assert_eq!(cfg.building_seed, 7);
        assert_eq!(cfg.ground_seed, DEFAULT_GROUND_SEED);
        assert_eq!(cfg.log_level, LevelFilter::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(cfg.bezel_texture, Some(PathBuf::from("bezel.png")));
        assert_eq!(cfg.overlay_text, "Demo");
        assert_eq!(cfg.overlay_subtitle(), "320x200 @ 30 fps");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse(&["--fps", "0"]).is_err());
        assert!(parse(&["--width", "wide"]).is_err());
        assert!(parse(&["--log-level", "loud"]).is_err());
    }

    #[test]
    fn dimensions_are_range_checked() {
        for flag in ["--width", "--height", "--ui-size"] {
            assert!(parse(&[flag, "0"]).is_err(), "{flag} 0");
            assert!(parse(&[flag, "100000"]).is_err(), "{flag} 100000");
            assert!(parse(&[flag, "-4"]).is_err(), "{flag} -4");
        }
        let cfg = parse(&["--width", "1", "--height", "8192", "--ui-size", "8192"]).unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.ui_size), (1, 8192, 8192));
    }
}
