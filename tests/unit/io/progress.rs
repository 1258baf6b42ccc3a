//! Tests for the generation spinner and the log sink printing through it

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Record};
    use roomgraph::io::progress::{ProgressLogger, ProgressManager, verbosity_filter};

    fn formatted(level: Level, message: &str) -> String {
        ProgressLogger::format(
            &Record::builder()
                .level(level)
                .args(format_args!("{message}"))
                .build(),
        )
    }

    // Tests the spinner lifecycle
    // Verified by panicking when finishing an idle spinner
    #[test]
    fn test_progress_manager_lifecycle() {
        let pm = ProgressManager::new();
        pm.start("Generating level");
        pm.update("Routing corridors");
        pm.finish("5 rooms, 4 corridors");
        assert!(pm.bar().is_finished());

        let pm = ProgressManager::default();
        pm.start("Generating level");
        pm.clear();
        assert!(pm.bar().is_finished());
    }

    // Tests the verbosity count maps onto log levels
    // Verified by letting quiet only lower the level by one
    #[test]
    fn test_verbosity_filter() {
        assert_eq!(verbosity_filter(0, false), LevelFilter::Warn);
        assert_eq!(verbosity_filter(1, false), LevelFilter::Info);
        assert_eq!(verbosity_filter(2, false), LevelFilter::Debug);
        assert_eq!(verbosity_filter(7, false), LevelFilter::Trace);
        assert_eq!(verbosity_filter(3, true), LevelFilter::Error);
    }

    // Tests the logger honours its filter
    // Verified by enabling every level
    #[test]
    fn test_logger_filter() {
        let logger = ProgressLogger::new(LevelFilter::Info, None);
        let info = Record::builder().level(Level::Info).build();
        let debug = Record::builder().level(Level::Debug).build();

        assert!(logger.enabled(info.metadata()));
        assert!(!logger.enabled(debug.metadata()));

        logger.log(&debug);
        logger.flush();
    }

    // Tests record formatting pads the level name
    // Verified by printing the target instead of the level
    #[test]
    fn test_logger_format() {
        assert_eq!(
            formatted(Level::Warn, "room epoch 3 failed"),
            "[WARN ] room epoch 3 failed"
        );
        assert_eq!(formatted(Level::Error, "stuck"), "[ERROR] stuck");
    }

    // Tests logging above a finished spinner falls back to stderr
    // Verified by printing through a finished bar
    #[test]
    fn test_logger_with_finished_bar() {
        let pm = ProgressManager::new();
        pm.finish("done");
        let logger = ProgressLogger::new(LevelFilter::Trace, Some(pm.bar()));
        let record = Record::builder()
            .level(Level::Trace)
            .args(format_args!("trace line"))
            .build();

        assert!(logger.enabled(record.metadata()));
        logger.log(&record);
    }
}
