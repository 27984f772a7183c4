//! A tool to inspect the contents of TrueType fonts

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use font::{Font, GlyphID, Segment};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// The font file to inspect
    #[arg(value_hint = clap::ValueHint::FilePath)]
    font: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show general information about the font
    Info,

    /// Show the outline and metrics of a single glyph
    Glyph {
        /// Glyph index
        #[arg(long, conflicts_with = "character")]
        id: Option<u16>,

        /// Character to look up in the character map
        #[arg(long = "char")]
        character: Option<char>,
    },

    /// Show the glyphs and advance widths used to lay out a string
    Text { text: String },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();

    let font_bytes = fs::read(&args.font)
        .with_context(|| format!("Failed to read {}", args.font.display()))?;
    log::debug!("Read {} bytes from {}", font_bytes.len(), args.font.display());
    let font = Font::new(&font_bytes)
        .with_context(|| format!("Failed to parse {}", args.font.display()))?;

    match args.command {
        Command::Info => print_info(&font),
        Command::Glyph { id, character } => {
            let glyph_id = match (id, character) {
                (Some(id), _) => GlyphID::new(id),
                (None, Some(c)) => font.glyph_id_for_char(c),
                (None, None) => bail!("Either --id or --char is required"),
            };
            print_glyph(&font, glyph_id)?;
        },
        Command::Text { text } => print_text(&font, &text)?,
    }

    Ok(())
}

fn print_info(font: &Font) {
    println!("Name: {}", font.name().as_deref().unwrap_or("<unnamed>"));
    println!("Units per em: {}", font.units_per_em());
    println!("Glyphs: {}", font.num_glyphs());
    println!("Mapped characters: {}", font.character_map().len());
    println!("Tables:");
    for entry in font.offset_table().tables() {
        println!(
            "    {} offset={:#x} length={} checksum={:#010x}",
            entry.tag(),
            entry.offset(),
            entry.length(),
            entry.checksum()
        );
    }
}

fn print_glyph(font: &Font, glyph_id: GlyphID) -> Result<()> {
    // Report the actual reason if the outline could not be resolved
    let outline = font.resolve_outline(glyph_id)?;
    let metric = font.metric_for(glyph_id)?;

    println!("Glyph {glyph_id}");
    println!(
        "Advance width: {}, left side bearing: {}",
        metric.advance_width(),
        metric.left_side_bearing()
    );
    if let Some(bounds) = outline.bounds() {
        println!(
            "Bounds: ({}, {}) - ({}, {})",
            bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
        );
    }
    println!(
        "{} contours, {} points",
        outline.num_contours(),
        outline.num_points()
    );

    for (index, path) in outline.paths().iter().enumerate() {
        let start = path.start();
        println!("Contour {index}: start ({}, {})", start.x, start.y);
        for segment in path.segments() {
            match segment {
                Segment::Line(to) => println!("    line ({}, {})", to.x, to.y),
                Segment::QuadBez(control, to) => println!(
                    "    quad ({}, {}) ({}, {})",
                    control.x, control.y, to.x, to.y
                ),
            }
        }
    }

    Ok(())
}

fn print_text(font: &Font, text: &str) -> Result<()> {
    for c in text.chars() {
        let glyph_id = font.glyph_id_for_char(c);
        let metric = font.metric_for(glyph_id)?;
        println!("{c:?} -> {glyph_id} advance={}", metric.advance_width());
    }
    println!("Total advance width: {}", font.advance_width_of(text));

    Ok(())
}
