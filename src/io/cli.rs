//! Command-line interface: build one level, export it, optionally play it

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::algorithm::assembler::{Level, LevelGenerator};
use crate::io::configuration::{
    CorridorStrategy, DEFAULT_COLS, DEFAULT_MAX_CORRIDOR_EPOCHS, DEFAULT_MAX_ROOM_EPOCHS,
    DEFAULT_MIN_ROOMS, DEFAULT_ROWS, DEFAULT_SEED, GIF_FRAME_DELAY_MS, IMAGE_CELL_SIZE,
    LevelConfig, MAX_ROOMS, Palette, PlacementStrategy, RoomCount, RoomSpacing, SeedChoice,
    SizeRange, WallAnchor,
};
use crate::io::error::Result;
use crate::io::image::export_grid_as_png;
use crate::io::progress::{ProgressLogger, ProgressManager, verbosity_filter};
use crate::io::render::write_grid;
use crate::play::movement::{Command, MoveOutcome, Session};
use crate::spatial::quadrants::AdjacencyMode;

/// Room packing strategy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlacementArg {
    /// Rooms anywhere on the grid
    Free,
    /// One room per quadrant
    Quadrant,
}

/// Corridor strategy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorridorArg {
    /// Straight three-wide corridors
    Rectangular,
    /// Random-walk corridors between facing walls
    Bent,
}

/// Quadrant adjacency flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdjacencyArg {
    /// Up, down, left and right neighbours
    Cardinal,
    /// Cardinal neighbours plus diagonals
    Diagonal,
}

#[derive(Parser)]
#[command(name = "roomgraph")]
#[command(
    author,
    version,
    about = "Generate connected dungeon levels of rooms, corridors and doors"
)]
/// Command-line arguments for the level generator
// Every toggle of the generator is a flag
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Draw a fresh seed instead of using --seed
    #[arg(long)]
    pub random_seed: bool,

    /// Grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Exact number of rooms
    #[arg(short, long, conflicts_with_all = ["min_rooms", "max_rooms"])]
    pub rooms: Option<usize>,

    /// Fewest rooms when the count is random
    #[arg(long)]
    pub min_rooms: Option<usize>,

    /// Most rooms when the count is random
    #[arg(long)]
    pub max_rooms: Option<usize>,

    /// Room packing strategy
    #[arg(long, value_enum, default_value_t = PlacementArg::Quadrant)]
    pub placement: PlacementArg,

    /// Corridor strategy
    #[arg(long, value_enum, default_value_t = CorridorArg::Bent)]
    pub corridors: CorridorArg,

    /// Which quadrants count as neighbours for bent corridors
    #[arg(long, value_enum, default_value_t = AdjacencyArg::Cardinal)]
    pub adjacency: AdjacencyArg,

    /// Corridor epochs per room layout
    #[arg(long, default_value_t = DEFAULT_MAX_CORRIDOR_EPOCHS)]
    pub corridor_epochs: usize,

    /// Room layouts attempted before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ROOM_EPOCHS)]
    pub room_epochs: usize,

    /// Let freely placed rooms touch
    #[arg(long)]
    pub touching: bool,

    /// Attach bent corridors at random wall cells instead of wall midpoints
    #[arg(long)]
    pub random_anchors: bool,

    /// Mark the start room as explored
    #[arg(long)]
    pub reveal: bool,

    /// Walk the level interactively after generating it
    #[arg(short, long)]
    pub play: bool,

    /// Write the level as a PNG image
    #[arg(long, value_name = "PATH")]
    pub png: Option<PathBuf>,

    /// Write the generation process as an animated GIF
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Level configuration described by the flags
    ///
    /// Starts from the preset matching the placement and corridor strategies,
    /// then applies every explicit flag.
    pub fn to_config(&self) -> LevelConfig {
        let mut config = match (self.placement, self.corridors) {
            (PlacementArg::Free, CorridorArg::Rectangular) => LevelConfig::free_rectangular(),
            (PlacementArg::Quadrant, CorridorArg::Rectangular) => {
                LevelConfig::quadrant_rectangular()
            }
            (_, CorridorArg::Bent) => LevelConfig::quadrant_bent(),
        };

        config.placement = match self.placement {
            PlacementArg::Free => PlacementStrategy::Free,
            PlacementArg::Quadrant => PlacementStrategy::Quadrant,
        };
        config.corridors = match self.corridors {
            CorridorArg::Rectangular => CorridorStrategy::Rectangular,
            CorridorArg::Bent => CorridorStrategy::BentWalk,
        };
        config.adjacency = match self.adjacency {
            AdjacencyArg::Cardinal => AdjacencyMode::Cardinal,
            AdjacencyArg::Diagonal => AdjacencyMode::CardinalAndDiagonal,
        };

        config.rows = self.rows;
        config.cols = self.cols;
        config.seed = if self.random_seed {
            SeedChoice::Random
        } else {
            SeedChoice::Fixed(self.seed)
        };

        if let Some(rooms) = self.rooms {
            config.room_count = RoomCount::Fixed(rooms);
        } else if self.min_rooms.is_some() || self.max_rooms.is_some() {
            config.room_count = RoomCount::Range(SizeRange::new(
                self.min_rooms.unwrap_or(DEFAULT_MIN_ROOMS),
                self.max_rooms.unwrap_or(MAX_ROOMS),
            ));
        }

        config.max_corridor_epochs = self.corridor_epochs;
        config.max_room_epochs = self.room_epochs;
        if self.touching {
            config.spacing = RoomSpacing::Touching;
        }
        if self.random_anchors {
            config.wall_anchor = WallAnchor::Random;
        }
        if self.reveal {
            config.reveal_start_room = true;
        }

        config
    }
}

/// Runs one generation according to the command line
pub struct LevelRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl LevelRunner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate, export and print or play the level
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, generation fails, an
    /// export cannot be written, or terminal I/O fails
    pub fn run(&mut self) -> Result<()> {
        let filter = verbosity_filter(self.cli.verbose, self.cli.quiet);
        ProgressLogger::new(filter, self.progress_manager.as_ref().map(ProgressManager::bar))
            .install();

        let config = self.cli.to_config();
        let palette = config.palette;
        let mut generator = LevelGenerator::new(config)?;
        if self.cli.trace.is_some() {
            generator.enable_trace();
        }

        if let Some(ref pm) = self.progress_manager {
            pm.start("Generating level");
        }
        let level = match generator.generate() {
            Ok(level) => level,
            Err(err) => {
                if let Some(ref pm) = self.progress_manager {
                    pm.clear();
                }
                return Err(err);
            }
        };
        if let Err(err) = self.export(&level, &generator, &palette) {
            if let Some(ref pm) = self.progress_manager {
                pm.clear();
            }
            return Err(err);
        }
        if let Some(ref pm) = self.progress_manager {
            pm.finish(&summary(&level));
        }

        let stdout = std::io::stdout();
        let mut output = stdout.lock();
        if self.cli.play {
            let mut session = Session::new(&level, palette);
            play(&mut session, std::io::stdin().lock(), &mut output)?;
        } else {
            write_grid(&level.grid, &mut output)?;
        }

        Ok(())
    }

    fn export(&self, level: &Level, generator: &LevelGenerator, palette: &Palette) -> Result<()> {
        if self.cli.png.is_none() && self.cli.trace.is_none() {
            return Ok(());
        }
        if let Some(ref pm) = self.progress_manager {
            pm.update("Exporting images");
        }
        if let Some(path) = &self.cli.png {
            export_grid_as_png(&level.grid, palette, IMAGE_CELL_SIZE, path)?;
        }
        if let (Some(path), Some(trace)) = (&self.cli.trace, &generator.trace) {
            trace.export_gif(path, GIF_FRAME_DELAY_MS, IMAGE_CELL_SIZE)?;
        }
        Ok(())
    }
}

/// One-line description of a finished level
pub fn summary(level: &Level) -> String {
    format!(
        "{} rooms, {} corridors, {} doors (seed {}, {} room epochs)",
        level.rooms.len(),
        level.corridors.len(),
        level.doors.len(),
        level.seed,
        level.stats.room_epochs
    )
}

/// Interactive loop: print the grid, read keys, apply moves until the game ends
///
/// Each input line may hold several keys; unknown keys are ignored. End of input
/// counts as quitting.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails
pub fn play<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> Result<MoveOutcome> {
    write_grid(session.grid(), output)?;
    writeln!(output, "Move with w/a/s/d, q to quit")?;

    for line in input.lines() {
        for key in line?.chars() {
            let Some(command) = Command::from_key(key) else {
                continue;
            };
            let outcome = session.apply(command);
            if outcome != MoveOutcome::Quit {
                write_grid(session.grid(), output)?;
            }
            if let Some(message) = outcome.message() {
                writeln!(output, "{message}")?;
            }
            if outcome.is_terminal() {
                return Ok(outcome);
            }
        }
    }

    Ok(MoveOutcome::Quit)
}
