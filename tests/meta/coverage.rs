//! Every source file has a unit test file at the mirrored path, and every test file tests something

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Crate roots and module index files carry no logic of their own
    fn is_organizational(relative_path: &str) -> bool {
        let file_name = Path::new(relative_path)
            .file_name()
            .and_then(|name| name.to_str());
        matches!(file_name, Some("main.rs" | "lib.rs" | "mod.rs"))
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(io::Error::other)?;
                found.insert(relative.to_string_lossy().to_string());
            }
        }
        Ok(())
    }

    fn logic_files(dir: &str) -> BTreeSet<String> {
        let base = Path::new(dir);
        let mut found = BTreeSet::new();
        if let Err(error) = rust_files(base, base, &mut found) {
            assert!(!base.exists(), "Failed to read {dir}: {error}");
        }
        found.retain(|path| !is_organizational(path));
        found
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let sources = logic_files("src");
        let unit_tests = logic_files("tests/unit");

        let missing: Vec<String> = sources
            .difference(&unit_tests)
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = logic_files("src");
        let unit_tests = logic_files("tests/unit");

        let orphaned: Vec<String> = unit_tests
            .difference(&sources)
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let mut files_without_tests = Vec::new();

        for path in logic_files("tests") {
            let full_path = Path::new("tests").join(&path);
            match fs::read_to_string(&full_path) {
                Ok(content) if content.contains("#[test]") => {}
                Ok(_) => files_without_tests.push(format!("  - {}", full_path.display())),
                Err(error) => panic!("Failed to read {}: {error}", full_path.display()),
            }
        }

        assert!(
            files_without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }
}
