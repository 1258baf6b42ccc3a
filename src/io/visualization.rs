//! Frame capture and GIF export of the generation process

use std::path::Path;

use image::{Delay, Frame};

use crate::io::configuration::{MAX_TRACE_FRAMES, Palette, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::io::image::render_grid_image;
use crate::spatial::grid::TileGrid;

/// Generation step a frame was captured after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    /// A room layout was stamped
    RoomsPlaced,
    /// A corridor was committed
    CorridorCommitted,
    /// A corridor epoch was rolled back to the room layout
    RolledBack,
    /// Doors were resolved
    DoorsResolved,
    /// Player, exit and treasure were stamped
    EntitiesPlaced,
}

/// Grid snapshot tagged with the step that produced it
#[derive(Debug, Clone)]
pub struct TraceFrame {
    /// Step that produced the snapshot
    pub phase: TracePhase,
    /// Grid contents after the step
    pub grid: TileGrid,
}

/// Captures grid snapshots while a level is generated
///
/// Generation phases take the trace as `&mut Option<GenerationTrace>` and record
/// only when it is present.
#[derive(Debug, Clone)]
pub struct GenerationTrace {
    frames: Vec<TraceFrame>,
    palette: Palette,
}

impl GenerationTrace {
    /// Empty trace rendering frames with `palette`
    pub const fn new(palette: Palette) -> Self {
        Self {
            frames: Vec::new(),
            palette,
        }
    }

    /// Record a snapshot of `grid`
    pub fn record(&mut self, phase: TracePhase, grid: &TileGrid) {
        self.frames.push(TraceFrame {
            phase,
            grid: grid.clone(),
        });
    }

    /// All captured frames in order
    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    /// Number of captured frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames captured after the given step
    pub fn count(&self, phase: TracePhase) -> usize {
        self.frames.iter().filter(|frame| frame.phase == phase).count()
    }

    /// Export the frames as an animated GIF
    ///
    /// Long traces are thinned to at most `MAX_TRACE_FRAMES` frames, always keeping
    /// the last one, which is held on screen longer than the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - The parent directory or output file cannot be created
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        output_path: &Path,
        frame_delay_ms: u32,
        cell_size: u32,
    ) -> Result<()> {
        if self.frames.is_empty() {
            return Err(invalid_parameter(
                "trace",
                &"empty",
                &"no generation frames were captured",
            ));
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let frames = self.encode_frames(delay_ms, cell_size);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| GenerationError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| GenerationError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Frames kept after thinning, last frame included
    pub fn sampled_frames(&self) -> Vec<&TraceFrame> {
        let stride = self.frames.len().div_ceil(MAX_TRACE_FRAMES).max(1);
        let last = self.frames.len().saturating_sub(1);
        self.frames
            .iter()
            .enumerate()
            .filter(|&(index, _)| index % stride == 0 || index == last)
            .map(|(_, frame)| frame)
            .collect()
    }

    fn encode_frames(&self, delay_ms: u32, cell_size: u32) -> Vec<Frame> {
        let sampled = self.sampled_frames();
        let last = sampled.len().saturating_sub(1);

        sampled
            .into_iter()
            .enumerate()
            .map(|(index, frame)| {
                // Final frame displays longer
                let delay = if index == last { delay_ms * 20 } else { delay_ms };
                Frame::from_parts(
                    render_grid_image(&frame.grid, &self.palette, cell_size),
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay, 1),
                )
            })
            .collect()
    }
}
