//! Tests for generation frame capture and GIF export

#[cfg(test)]
mod tests {
    use roomgraph::GenerationError;
    use roomgraph::io::configuration::{MAX_TRACE_FRAMES, Palette};
    use roomgraph::io::visualization::{GenerationTrace, TracePhase};
    use roomgraph::spatial::geometry::Point;
    use roomgraph::spatial::grid::TileGrid;

    fn trace_with(frames: usize) -> GenerationTrace {
        let palette = Palette::default();
        let grid = TileGrid::new(3, 3, palette.floor);
        let mut trace = GenerationTrace::new(palette);
        for _ in 0..frames {
            trace.record(TracePhase::CorridorCommitted, &grid);
        }
        trace
    }

    // Tests frames are stored as independent snapshots in order
    // Verified by storing a shared reference to the live grid
    #[test]
    fn test_record_snapshots() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(3, 3, palette.empty);
        let mut trace = GenerationTrace::new(palette);
        assert!(trace.is_empty());

        trace.record(TracePhase::RoomsPlaced, &grid);
        grid.set(Point::new(1, 1), palette.corridor);
        trace.record(TracePhase::CorridorCommitted, &grid);
        trace.record(TracePhase::RolledBack, &grid);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.count(TracePhase::RoomsPlaced), 1);
        assert_eq!(trace.count(TracePhase::DoorsResolved), 0);
        let phases: Vec<TracePhase> = trace.frames().iter().map(|frame| frame.phase).collect();
        assert_eq!(
            phases,
            vec![
                TracePhase::RoomsPlaced,
                TracePhase::CorridorCommitted,
                TracePhase::RolledBack
            ]
        );
        assert_eq!(
            trace.frames().first().and_then(|frame| frame.grid.get(Point::new(1, 1))),
            Some(' ')
        );
    }

    // Tests short traces keep every frame
    // Verified by always applying a stride of two
    #[test]
    fn test_sampled_frames_short_trace() {
        assert_eq!(trace_with(10).sampled_frames().len(), 10);
        assert_eq!(trace_with(MAX_TRACE_FRAMES).sampled_frames().len(), MAX_TRACE_FRAMES);
        assert!(trace_with(0).sampled_frames().is_empty());
    }

    // Tests long traces are thinned by a constant stride and keep the last frame
    // Verified by dropping the final frame when it falls between strides
    #[test]
    fn test_sampled_frames_long_trace() {
        let trace = trace_with(1001);

        // Stride 3 keeps frames 0, 3, .., 999, then the last frame 1000
        assert_eq!(trace.sampled_frames().len(), 335);
    }

    // Tests an empty trace cannot be exported
    // Verified by writing an empty GIF
    #[test]
    fn test_export_empty_trace() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output_path = temp_dir.path().join("empty.gif");

        let result = trace_with(0).export_gif(&output_path, 100, 2);

        assert!(matches!(
            result,
            Err(GenerationError::InvalidParameter {
                parameter: "trace",
                ..
            })
        ));
        assert!(!output_path.exists());
    }

    // Tests GIF export writes a file inside a fresh directory
    // Verified by skipping directory creation
    #[test]
    fn test_export_gif_creates_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output_path = temp_dir.path().join("traces").join("generation.gif");

        let result = trace_with(4).export_gif(&output_path, 10, 2);

        assert!(result.is_ok(), "GIF export should succeed");
        assert!(output_path.exists(), "GIF file should be created");
    }
}
