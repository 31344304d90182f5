#![deny(unsafe_code)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{fmt::Display, path::PathBuf};

use anyhow::Context;
use chromacut::{
    get_palette_async, validate, Color, ColorFormat, ImageSource, Options, DEFAULT_QUALITY,
    DOMINANT_PALETTE_SIZE,
};
use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, ValueEnum)]
enum CliFormat {
    Hex,
    Triple,
}

impl From<CliFormat> for ColorFormat {
    fn from(value: CliFormat) -> Self {
        match value {
            CliFormat::Hex => ColorFormat::Hex,
            CliFormat::Triple => ColorFormat::Triple,
        }
    }
}

impl Display for CliFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CliFormat::Hex => "hex",
                CliFormat::Triple => "triple",
            }
        )
    }
}

/// Prints the color palette or the dominant color of images.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The maximum number of palette colors.
    #[arg(short, long, default_value_t = 10)]
    colors: u32,

    /// Look at every n-th pixel; 1 looks at every pixel.
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: u32,

    /// How to print each color.
    #[arg(short, long, default_value_t = CliFormat::Hex)]
    format: CliFormat,

    /// Print only the dominant color.
    #[arg(short, long)]
    dominant: bool,

    /// Skip near-white pixels.
    #[arg(long)]
    ignore_white: bool,

    #[arg(required = true)]
    images: Vec<PathBuf>,
}

/// What to print for one image.
#[derive(Debug, PartialEq, Eq)]
enum Report {
    Unreadable,
    Transparent,
    Colors(Vec<Color>),
}

impl Report {
    /// The dominant color is the first entry of a palette of `DOMINANT_PALETTE_SIZE` colors.
    fn new(palette: Option<Vec<Color>>, dominant: bool) -> Self {
        match palette {
            None => Report::Unreadable,
            Some(palette) if palette.is_empty() => Report::Transparent,
            Some(mut palette) => {
                if dominant {
                    palette.truncate(1);
                }
                Report::Colors(palette)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Cli { colors, quality, format, dominant, ignore_white, images } = Cli::parse();

    let color_count = if dominant { DOMINANT_PALETTE_SIZE.into() } else { colors };
    validate(color_count, quality).context("invalid arguments")?;

    let options = Options::new()
        .quality(quality)
        .format(format.into())
        .ignore_white(ignore_white);

    let multiple = images.len() > 1;

    for path in images {
        let source = ImageSource::path(&path);

        if multiple {
            println!("{}:", path.display());
        }

        let palette = get_palette_async(&source, color_count, &options).await?;
        match Report::new(palette, dominant) {
            Report::Unreadable => eprintln!("could not read {}", path.display()),
            Report::Transparent => eprintln!("{} has no opaque pixels", path.display()),
            Report::Colors(colors) => {
                for color in colors {
                    println!("{color}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::Hex(s.into())
    }

    #[test]
    fn unreadable_and_transparent_are_distinct() {
        for dominant in [false, true] {
            assert_eq!(Report::new(None, dominant), Report::Unreadable);
            assert_eq!(Report::new(Some(Vec::new()), dominant), Report::Transparent);
        }
    }

    #[test]
    fn dominant_keeps_first_color() {
        let palette = vec![hex("#ff0000"), hex("#0000ff")];
        assert_eq!(
            Report::new(Some(palette.clone()), true),
            Report::Colors(vec![hex("#ff0000")])
        );
        assert_eq!(Report::new(Some(palette.clone()), false), Report::Colors(palette));
    }
}
