//! Command-line front end: render one icon, or a manifest of icons, to PNG.
//!
//! ```text
//! ide-icons render --text @ --color blue --scale 2 --out at.png
//! ide-icons batch icons.json --out-dir build/icons --scales 1,2,3
//! ```
//!
//! Set `RUST_LOG=ide_icons=debug` to see why a layer was left out.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ide_icons::{
    Appearance, IconColor, IconContent, IconDescriptor, IconError, IconImage,
    IconManifest, IconResult, IconSize, IconStyle, Renderer, RendererProfile,
};

#[derive(Parser, Debug)]
#[command(name = "ide-icons", version, about = "Render IDE-style badge icons to PNG")]
struct Cli {
    /// Renderer profile (JSON).
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single icon.
    Render(RenderArgs),
    /// Render every icon in a manifest.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ContentArgs {
    /// Text label, e.g. "@" or "Ex".
    #[arg(long)]
    text: Option<String>,
    /// Symbol name, e.g. "list.bullet".
    #[arg(long)]
    symbol: Option<String>,
    /// Bundled image name.
    #[arg(long)]
    image: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Directory to look the image up in.
    #[arg(long, requires = "image")]
    bundle: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = IconColor::Purple)]
    color: IconColor,

    #[arg(long, value_enum, default_value_t = IconStyle::Default)]
    style: IconStyle,

    #[arg(long, value_enum, default_value_t = Appearance::Dark)]
    appearance: Appearance,

    /// Size in points.
    #[arg(long, default_value_t = IconSize::REGULAR)]
    size: f32,

    /// Device scale; overrides the profile.
    #[arg(long)]
    scale: Option<f32>,

    /// Output PNG path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Manifest JSON file.
    manifest: PathBuf,

    /// Directory PNGs are written to.
    #[arg(long)]
    out_dir: PathBuf,

    /// Device scales to render; anything but 1 gets an `@Nx` suffix.
    #[arg(long, value_delimiter = ',', default_value = "1")]
    scales: Vec<f32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> IconResult<()> {
    let profile = match &cli.profile {
        Some(path) => RendererProfile::from_json(&read(path)?)?,
        None => RendererProfile::default(),
    };

    match cli.command {
        Command::Render(args) => {
            let profile = match args.scale {
                Some(scale) => profile.with_scale(scale),
                None => profile,
            };
            render_one(&Renderer::from_profile(&profile), args)
        }
        Command::Batch(args) => render_batch(&Renderer::from_profile(&profile), args),
    }
}

fn render_one(renderer: &Renderer, args: RenderArgs) -> IconResult<()> {
    let ContentArgs { text, symbol, image } = args.content;
    let content = if let Some(text) = text {
        IconContent::Text(text)
    } else if let Some(symbol) = symbol {
        IconContent::SystemImage(symbol)
    } else {
        IconContent::Image {
            name: image.unwrap_or_default(),
            bundle: args.bundle,
        }
    };
    let icon = IconDescriptor::new(content)
        .with_color(args.color)
        .with_style(args.style)
        .with_appearance(args.appearance)
        .with_size(args.size);

    write(&renderer.render(&icon), &args.out)
}

fn render_batch(renderer: &Renderer, args: BatchArgs) -> IconResult<()> {
    let manifest = IconManifest::from_json(&read(&args.manifest)?)?;
    std::fs::create_dir_all(&args.out_dir).map_err(|source| IconError::Io {
        path: args.out_dir.clone(),
        source,
    })?;

    for entry in &manifest.icons {
        for image in renderer.render_set(&entry.icon, &args.scales) {
            let path = args.out_dir.join(file_name(&entry.name, image.scale));
            write(&image, &path)?;
        }
    }

    tracing::info!(
        icons = manifest.len(),
        scales = args.scales.len(),
        "wrote {}",
        args.out_dir.display()
    );
    Ok(())
}

fn file_name(name: &str, scale: f32) -> String {
    if scale == 1.0 {
        format!("{name}.png")
    } else {
        format!("{name}@{scale}x.png")
    }
}

fn read(path: &Path) -> IconResult<String> {
    std::fs::read_to_string(path).map_err(|source| IconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(image: &IconImage, path: &Path) -> IconResult<()> {
    image.save_png(path)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}
