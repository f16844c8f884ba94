//! Flipbook animations over a sequence of cross-sections
use crate::{
    AnimationConfig, ColorScale, Error, FrameArtifact, Function,
    frame::write_frame,
    render::{RasterRenderer, Renderer},
    resolve_scale, sample,
};
use image::{
    Delay, Frame,
    codecs::gif::{GifEncoder, Repeat},
};
use log::{debug, info, warn};
use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

/// An encoded animation
#[derive(Clone, Debug)]
pub struct AnimationArtifact {
    /// Location of the GIF file
    pub path: PathBuf,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Playback rate, in frames per second
    pub fps: f64,
    /// Color scale shared by every frame
    pub scale: ColorScale,
    /// Frames in playback order
    ///
    /// If frames were not kept, these paths no longer exist.
    pub frames: Vec<FrameArtifact>,
}

/// Returns the default animation file name for a function
///
/// ```
/// use plot4d::default_animation_name;
/// assert_eq!(default_animation_name(Some("lift")), "lift.gif");
/// assert_eq!(default_animation_name(None), "Cross Sections.gif");
/// ```
pub fn default_animation_name(func_name: Option<&str>) -> String {
    format!("{}.gif", func_name.unwrap_or("Cross Sections"))
}

/// Builds a flipbook animation with the built-in renderer
///
/// See [`build_animation_with`] for details.
pub fn build_animation<F: Function + ?Sized>(
    f: &F,
    z_values: &[f64],
    config: &AnimationConfig,
) -> Result<AnimationArtifact, Error> {
    build_animation_with(&RasterRenderer, f, z_values, config)
}

/// Renders one cross-section per z-value and encodes them as a GIF
///
/// Frames appear in exactly the order of `z_values`, with one frame per
/// value; repeated values produce repeated frames.
///
/// Every cross-section is sampled before anything is drawn.  Unless
/// `config.wbounds` is set, the color scale then spans the extrema across all
/// of those cross-sections, so every frame shares one color mapping.
///
/// Frames are written into `config.frame_dir` (created if needed).  If
/// `config.keep_frames` is false, they are deleted once the animation has been
/// encoded, and the frame directory is removed if it is left empty.
///
/// # Errors
/// An empty `z_values` returns [`Error::EmptySequence`] before any file is
/// touched; likewise, sampling and validation errors are reported before any
/// file is written.  Frames written before an IO or encoding failure are left
/// on disk.
pub fn build_animation_with<R: Renderer + ?Sized, F: Function + ?Sized>(
    renderer: &R,
    f: &F,
    z_values: &[f64],
    config: &AnimationConfig,
) -> Result<AnimationArtifact, Error> {
    if z_values.is_empty() {
        return Err(Error::EmptySequence);
    }
    let delay = config.frame_delay()?;
    let plot = &config.plot;

    let grids = z_values
        .iter()
        .map(|z| sample(f, &plot.domain, *z))
        .collect::<Result<Vec<_>, _>>()?;
    let scale = resolve_scale(&grids, config.wbounds, plot.levels)?;
    info!(
        "color scale for {} frames is [{}, {}]",
        grids.len(),
        scale.min(),
        scale.max()
    );

    let mut frames = Vec::with_capacity(grids.len());
    for grid in &grids {
        frames.push(write_frame(
            renderer,
            grid,
            &scale,
            plot,
            &config.frame_dir,
        )?);
    }
    drop(grids);

    let path = config.output_path();
    encode_gif(&frames, &path, delay)?;
    info!("wrote {} frame animation to {path:?}", frames.len());

    if !config.keep_frames {
        remove_frames(&frames, &config.frame_dir)?;
    }

    Ok(AnimationArtifact {
        path,
        frame_count: frames.len(),
        fps: config.fps,
        scale,
        frames,
    })
}

/// Encodes frame files into a looping GIF at `path`
///
/// The animation is first written to a sibling `.part` file, which is renamed
/// into place once encoding succeeds.
fn encode_gif(
    frames: &[FrameArtifact],
    path: &Path,
    delay: Duration,
) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let delay = Delay::from_saturating_duration(delay);
    let r = (|| {
        let file = std::fs::File::create(&part)?;
        let mut writer = BufWriter::new(file);
        {
            // The GIF trailer is written when the encoder is dropped
            let mut encoder = GifEncoder::new(&mut writer);
            encoder.set_repeat(Repeat::Infinite)?;
            for frame in frames {
                let img = image::open(&frame.path)?.to_rgba8();
                encoder.encode_frame(Frame::from_parts(img, 0, 0, delay))?;
                debug!("encoded {:?}", frame.title);
            }
        }
        writer.flush()?;
        Ok::<(), Error>(())
    })();

    match r {
        Ok(()) => {
            std::fs::rename(&part, path)?;
            Ok(())
        }
        Err(e) => {
            let _ = std::fs::remove_file(&part);
            Err(e)
        }
    }
}

/// Deletes frame files, then the frame directory if it is empty
fn remove_frames(frames: &[FrameArtifact], dir: &Path) -> Result<(), Error> {
    // Repeated z-values share one file
    let mut paths: Vec<&Path> =
        frames.iter().map(|f| f.path.as_path()).collect();
    paths.sort();
    paths.dedup();
    for p in paths {
        std::fs::remove_file(p)?;
    }

    match std::fs::read_dir(dir).map(|mut e| e.next().is_none()) {
        Ok(true) => {
            if let Err(e) = std::fs::remove_dir(dir) {
                warn!("could not remove frame directory {dir:?}: {e}");
            }
        }
        Ok(false) => debug!("keeping non-empty frame directory {dir:?}"),
        Err(e) => warn!("could not inspect frame directory {dir:?}: {e}"),
    }
    Ok(())
}
