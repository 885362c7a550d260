use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, error, info, Level};

use imgconv::bmp::{BmpDecodeOptions, BmpStrictness};
use imgconv::{codec_for, CodecOptions, ImageFormat, Limits, DEFAULT_JPEG_QUALITY};

const EXIT_USAGE: u8 = 1;
const EXIT_UNKNOWN_INPUT: u8 = 2;
const EXIT_UNKNOWN_OUTPUT: u8 = 3;
const EXIT_LOAD_FAILED: u8 = 4;
const EXIT_SAVE_FAILED: u8 = 5;

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    Command::new("imgconv")
        .about("Convert images between BMP, PPM and JPEG, picking formats by file extension")
        .arg(Arg::new("in_file")
            .help("Input image (.bmp, .ppm, .jpg, .jpeg)")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("out_file")
            .help("Output image (.bmp, .ppm, .jpg, .jpeg)")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("DECODING")
            .help("Reject BMP files that are not uncompressed 24-bit with a BM signature"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DECODING")
            .help("Refuse to decode images wider than this")
            .value_parser(value_parser!(u64)))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DECODING")
            .help("Refuse to decode images taller than this")
            .value_parser(value_parser!(u64)))
        .arg(Arg::new("quality")
            .long("quality")
            .help_heading("ENCODING")
            .help(format!("JPEG quality, 1-100 [default: {DEFAULT_JPEG_QUALITY}]"))
            .value_parser(value_parser!(u8).range(1..=100)))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display progress information"))
}

/// The first of `--debug`, `--trace`, `--warn`, `--info` wins, so `--warn`
/// silences a `--info` given alongside it.
fn log_level(options: &ArgMatches) -> Level {
    if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    }
}

fn setup_logger(options: &ArgMatches) {
    let log_level = log_level(options);

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("could not initialize logger: {e}");
    }
    debug!("Log level: {log_level}");
}

fn parse_options(options: &ArgMatches) -> CodecOptions {
    let limits = Limits {
        max_width: options.get_one::<u64>("max-width").copied(),
        max_height: options.get_one::<u64>("max-height").copied(),
        ..Default::default()
    };
    let strictness = if options.get_flag("strict") {
        info!("Using strict BMP validation");
        BmpStrictness::Strict
    } else {
        BmpStrictness::Compatible
    };

    CodecOptions {
        bmp: BmpDecodeOptions {
            strictness,
            limits: limits.clone(),
        },
        limits,
        jpeg_quality: options
            .get_one::<u8>("quality")
            .copied()
            .unwrap_or(DEFAULT_JPEG_QUALITY),
    }
}

fn main() -> ExitCode {
    let options = match create_cmd_args().try_get_matches() {
        Ok(options) => options,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    setup_logger(&options);

    // both are required arguments
    let (Some(in_path), Some(out_path)) = (
        options.get_one::<PathBuf>("in_file"),
        options.get_one::<PathBuf>("out_file"),
    ) else {
        return ExitCode::from(EXIT_USAGE);
    };

    let Some(in_format) = ImageFormat::from_path(in_path) else {
        eprintln!("Unknown format of the input file");
        return ExitCode::from(EXIT_UNKNOWN_INPUT);
    };
    let Some(out_format) = ImageFormat::from_path(out_path) else {
        eprintln!("Unknown format of the output file");
        return ExitCode::from(EXIT_UNKNOWN_OUTPUT);
    };
    info!("Converting {in_format:?} to {out_format:?}");

    let codec_options = parse_options(&options);

    let reader = match codec_for(in_format, &codec_options) {
        Ok(codec) => codec,
        Err(e) => {
            error!("{e}");
            eprintln!("Loading failed");
            return ExitCode::from(EXIT_LOAD_FAILED);
        }
    };
    let image = reader.load(in_path);
    if image.is_empty() {
        eprintln!("Loading failed");
        return ExitCode::from(EXIT_LOAD_FAILED);
    }
    info!("Loaded {}x{} image", image.width(), image.height());

    let writer = match codec_for(out_format, &codec_options) {
        Ok(codec) => codec,
        Err(e) => {
            error!("{e}");
            eprintln!("Saving failed");
            return ExitCode::from(EXIT_SAVE_FAILED);
        }
    };
    if !writer.save(out_path, &image) {
        eprintln!("Saving failed");
        return ExitCode::from(EXIT_SAVE_FAILED);
    }

    println!("Successfully converted");
    ExitCode::SUCCESS
}
