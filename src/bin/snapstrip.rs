use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use snapstrip::{
    CAPTURE_COUNT, CollageStyle, Compositor, FilterId, PhotoSequence, PixelStage, StampFont,
};

#[derive(Parser, Debug)]
#[command(name = "snapstrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose photos into a collage JPEG.
    Compose(ComposeArgs),
    /// List the filters and their effect chains.
    Filters(FiltersArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input photo, repeated in capture order.
    #[arg(long = "photo", required = true)]
    photos: Vec<PathBuf>,

    /// Filter applied to every tile.
    #[arg(long, default_value = "normal")]
    filter: FilterId,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Style JSON overriding the default look.
    #[arg(long)]
    style: Option<PathBuf>,

    /// TTF/OTF font for the date stamps, tried before the system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Stamp date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<chrono::NaiveDate>,

    /// Convert photos to grayscale before filtering.
    #[arg(long, default_value_t = false)]
    grayscale: bool,

    /// Also write the untilted strip as PNG.
    #[arg(long)]
    strip_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FiltersArgs {
    /// Style JSON whose filter overrides should be listed.
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Filters(args) => cmd_filters(args),
    }
}

fn load_style(path: Option<&Path>) -> anyhow::Result<CollageStyle> {
    Ok(match path {
        Some(p) => CollageStyle::from_path(p)?,
        None => CollageStyle::default(),
    })
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut style = load_style(args.style.as_deref())?;
    if args.grayscale && !style.pixel_stages.contains(&PixelStage::Grayscale) {
        style.pixel_stages.push(PixelStage::Grayscale);
    }

    let mut compositor = Compositor::new(style)?;
    if let Some(font) = &args.font {
        compositor = compositor.with_font(StampFont::from_path(font)?);
    }

    let photos = PhotoSequence::from_paths(&args.photos)?;
    if !photos.is_complete() {
        tracing::warn!(
            count = photos.len(),
            expected = CAPTURE_COUNT,
            "composing a partial strip"
        );
    }
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    if let Some(strip_out) = &args.strip_out {
        if let Some(strip) = compositor.render_strip(&photos, args.filter, date)? {
            ensure_parent(strip_out)?;
            image::save_buffer_with_format(
                strip_out,
                &strip.data,
                strip.width,
                strip.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", strip_out.display()))?;
            eprintln!("wrote {}", strip_out.display());
        }
    }

    let collage = compositor
        .compose(&photos, args.filter, date)?
        .context("no photos to compose")?;
    ensure_parent(&args.out)?;
    std::fs::write(&args.out, collage.bytes())
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} bytes)",
        args.out.display(),
        collage.width(),
        collage.height(),
        collage.bytes().len()
    );
    Ok(())
}

fn cmd_filters(args: FiltersArgs) -> anyhow::Result<()> {
    let style = load_style(args.style.as_deref())?;
    for id in FilterId::ALL {
        println!("{id}\t{}", style.filter_spec(id));
    }
    Ok(())
}
