//! Render a delimited table as a glyph model
//!
//! Reads the table, styles its first layer from the command line and writes
//! `model_<label>.<ext>` through the same pipeline the notebook viewer uses.
//!
//! ```text
//! render_table stars.csv --color-by mag --colormap viridis --size-by mass
//! ```

use anyhow::Context;
use clap::Parser;
use glyphview_core::{ColorMode, SizeMode};
use glyphview_io::{AssetFormat, TableReader};
use glyphview_viewer::{Layer, MemoryWidget, ModelViewer, ModelWidget, RedrawOutcome, ViewerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "render_table", version)]
struct Args {
    /// Delimited text file with a header row
    input: PathBuf,

    /// JSON viewer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the asset is written to (overrides the config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Asset extension: gltf or glb (overrides the config)
    #[arg(long)]
    format: Option<String>,

    /// Fixed glyph color
    #[arg(long, default_value = "0.35")]
    color: String,

    /// Color glyphs by this column
    #[arg(long)]
    color_by: Option<String>,

    #[arg(long, default_value = "viridis")]
    colormap: String,

    /// Fixed glyph size
    #[arg(long, default_value_t = 3.0)]
    size: f64,

    /// Size glyphs by this column
    #[arg(long)]
    size_by: Option<String>,

    #[arg(long, default_value_t = 1.0)]
    size_scaling: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glyphview=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.export.output_dir = dir.clone();
    }
    if let Some(ext) = &args.format {
        config.export.format = AssetFormat::from_extension(ext)?;
    }

    let table = TableReader::read_table(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let label = table.label().to_string();
    tracing::info!(
        label = %label,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    let mut viewer = ModelViewer::new(config, MemoryWidget::new());
    viewer.add_layer(Layer::new(table))?;

    if let Some(attribute) = &args.color_by {
        viewer.set_color_attribute(&label, attribute)?;
    }
    if let Some(attribute) = &args.size_by {
        viewer.set_size_attribute(&label, attribute)?;
    }

    let colormap = args.colormap.clone();
    let color_by = args.color_by.is_some();
    let size_by = args.size_by.is_some();
    viewer.update_style(&label, |style| {
        style.fixed_color = args.color.clone();
        style.fixed_size = args.size;
        style.size_scaling = args.size_scaling;
        if color_by {
            style.color_mode = ColorMode::Mapped;
            style.colormap_name = Some(colormap);
        }
        if size_by {
            style.size_mode = SizeMode::Mapped;
        }
    })?;

    match viewer.last_outcome() {
        Some(RedrawOutcome::Published(path)) => {
            let bytes = viewer.widget().model().map_or(0, <[u8]>::len);
            println!("{} ({} bytes)", path.display(), bytes);
        }
        _ => println!("nothing to display"),
    }
    Ok(())
}
