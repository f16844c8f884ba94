use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use plot4d::{
    AnimationConfig, Colormap, Domain2D, ImageSize, PlotConfig, PointCloud,
    PointSample, rhai::ScriptFunction,
};

/// Cross-section plots and flipbooks of w = f(x, y, z)
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single cross-section at a fixed z
    Section {
        /// Rhai expression in `x`, `y`, and `z`
        #[clap(short, long)]
        expr: String,

        /// Value of the third coordinate
        #[clap(long, allow_negative_numbers = true)]
        z: f64,

        #[clap(flatten)]
        settings: PlotSettings,

        /// Directory for the `.png` file
        #[clap(short, long, default_value = "Figures")]
        out: PathBuf,
    },

    /// Render a sequence of cross-sections into an animated `.gif`
    Animate {
        /// Rhai expression in `x`, `y`, and `z`
        #[clap(short, long)]
        expr: String,

        #[clap(flatten)]
        settings: PlotSettings,

        #[clap(flatten)]
        z: ZSettings,

        /// Playback rate, in frames per second
        #[clap(long, default_value_t = 1.0)]
        fps: f64,

        /// Delete the per-frame `.png` files after encoding
        #[clap(long)]
        discard_frames: bool,

        /// Directory for per-frame `.png` files
        #[clap(long, default_value = "temp")]
        frame_dir: PathBuf,

        /// Name of the `.gif` file to write
        ///
        /// Defaults to the function name, next to the frame directory
        #[clap(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a point cloud as a 3D scatter plot
    Scatter {
        /// Text file with one `x y z w` sample per line
        #[clap(short, long)]
        input: PathBuf,

        #[clap(flatten)]
        settings: PlotSettings,

        /// Draw every sample alike, without highlighting the best one
        #[clap(long)]
        no_best: bool,

        /// Directory for the `.png` file
        #[clap(short, long, default_value = "Figures")]
        out: PathBuf,
    },
}

#[derive(Parser)]
struct PlotSettings {
    /// Lower X bound
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    xmin: f64,

    /// Upper X bound
    #[clap(long, default_value_t = 1.0, allow_negative_numbers = true)]
    xmax: f64,

    /// Lower Y bound
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    ymin: f64,

    /// Upper Y bound
    #[clap(long, default_value_t = 1.0, allow_negative_numbers = true)]
    ymax: f64,

    /// Samples along the X axis
    #[clap(long, default_value_t = 21)]
    xnum: usize,

    /// Samples along the Y axis
    #[clap(long, default_value_t = 21)]
    ynum: usize,

    /// X axis label
    #[clap(long, default_value = "x")]
    xlabel: String,

    /// Y axis label
    #[clap(long, default_value = "y")]
    ylabel: String,

    /// Name of the third coordinate, used in titles
    #[clap(long, default_value = "z")]
    z_label: String,

    /// Function name, used in titles and file names
    #[clap(short, long)]
    name: Option<String>,

    /// Number of color levels
    #[clap(short, long, default_value_t = 21)]
    levels: usize,

    /// Color gradient
    #[clap(short, long, default_value_t = Colormap::Viridis)]
    colormap: Colormap,

    /// Image width
    #[clap(long, default_value_t = 640)]
    width: u32,

    /// Image height
    #[clap(long, default_value_t = 480)]
    height: u32,

    /// Fixed lower bound of the color scale
    #[clap(long, requires = "wmax", allow_negative_numbers = true)]
    wmin: Option<f64>,

    /// Fixed upper bound of the color scale
    #[clap(long, requires = "wmin", allow_negative_numbers = true)]
    wmax: Option<f64>,
}

impl PlotSettings {
    fn config(&self) -> Result<PlotConfig> {
        let domain = Domain2D::new(
            self.xmin..=self.xmax,
            self.ymin..=self.ymax,
            self.xnum,
            self.ynum,
        )?
        .with_labels(&self.xlabel, &self.ylabel);
        Ok(PlotConfig {
            domain,
            levels: self.levels,
            colormap: self.colormap,
            image_size: ImageSize::new(self.width, self.height),
            func_name: self.name.clone(),
            z_label: self.z_label.clone(),
        })
    }

    fn wbounds(&self) -> Option<(f64, f64)> {
        self.wmin.zip(self.wmax)
    }
}

#[derive(Parser)]
struct ZSettings {
    /// Comma-separated z-values, in playback order
    #[clap(long, value_delimiter = ',', allow_negative_numbers = true)]
    z: Vec<f64>,

    /// First z-value of an evenly spaced sequence
    #[clap(long, allow_negative_numbers = true, conflicts_with = "z")]
    z_start: Option<f64>,

    /// Last z-value of an evenly spaced sequence
    #[clap(long, allow_negative_numbers = true, conflicts_with = "z")]
    z_end: Option<f64>,

    /// Number of z-values in an evenly spaced sequence
    #[clap(long, conflicts_with = "z")]
    z_count: Option<usize>,
}

impl ZSettings {
    fn values(&self) -> Result<Vec<f64>> {
        if !self.z.is_empty() {
            return Ok(self.z.clone());
        }
        match (self.z_start, self.z_end, self.z_count) {
            (Some(a), Some(b), Some(n)) => Ok(plot4d::linspace(a, b, n)),
            (None, None, None) => {
                bail!("either --z or --z-start/--z-end/--z-count is required")
            }
            _ => bail!("--z-start, --z-end, and --z-count must be used together"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Parses whitespace-separated `x y z w` lines
///
/// Blank lines and lines starting with `#` are skipped.
fn read_points(path: &Path) -> Result<Vec<PointSample>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {path:?}"))?;
    let mut out = vec![];
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let v = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("bad number on line {}", i + 1))?;
        let [x, y, z, w] = v[..] else {
            bail!("line {} has {} values; expected 4", i + 1, v.len());
        };
        out.push(PointSample::new(x, y, z, w));
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    match args.cmd {
        Command::Section {
            expr,
            z,
            settings,
            out,
        } => {
            let start = Instant::now();
            let f = ScriptFunction::new(&expr)?;
            let cfg = settings.config()?;
            info!("Compiled expression in {:?}", start.elapsed());

            let start = Instant::now();
            let frame = plot4d::plot_cross_section(
                &f,
                z,
                &cfg,
                settings.wbounds(),
                Some(&out),
            )?;
            info!("Rendered cross-section in {:?}", start.elapsed());
            if let Some(frame) = frame {
                info!("Wrote image to {:?}", frame.path);
            }
        }
        Command::Animate {
            expr,
            settings,
            z,
            fps,
            discard_frames,
            frame_dir,
            out,
        } => {
            let start = Instant::now();
            let f = ScriptFunction::new(&expr)?;
            let z_values = z.values()?;
            let cfg = AnimationConfig {
                fps,
                keep_frames: !discard_frames,
                output: out,
                wbounds: settings.wbounds(),
                ..AnimationConfig::new(settings.config()?, frame_dir)
            };
            info!("Compiled expression in {:?}", start.elapsed());

            let start = Instant::now();
            let anim = plot4d::build_animation(&f, &z_values, &cfg)?;
            info!(
                "Rendered {} frames at {:?} ms/frame",
                anim.frame_count,
                start.elapsed().as_micros() as f64
                    / 1000.0
                    / (anim.frame_count as f64)
            );
            info!(
                "Color scale is [{}, {}]; wrote animation to {:?}",
                anim.scale.min(),
                anim.scale.max(),
                anim.path
            );
        }
        Command::Scatter {
            input,
            settings,
            no_best,
            out,
        } => {
            let start = Instant::now();
            let mut cloud = PointCloud::new(read_points(&input)?)?;
            if no_best {
                cloud = cloud.without_best();
            }
            info!(
                "Loaded {} samples in {:?}",
                cloud.samples().len(),
                start.elapsed()
            );
            if let Some(best) = cloud.best() {
                info!(
                    "Best sample is w = {} at ({}, {}, {})",
                    best.magnitude, best.x, best.y, best.z
                );
            }

            let start = Instant::now();
            let path =
                plot4d::plot_point_cloud(&cloud, &settings.config()?, Some(&out))?;
            info!("Rendered point cloud in {:?}", start.elapsed());
            if let Some(path) = path {
                info!("Wrote image to {path:?}");
            }
        }
    }
    Ok(())
}
