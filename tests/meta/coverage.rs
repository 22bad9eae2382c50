//! Checks that every source module has a compiled unit test module

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    /// Module files below `root`, relative to it, skipping directory roots
    fn module_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                let is_rust = path.extension().is_some_and(|ext| ext == "rs");
                let is_root = matches!(
                    path.file_name().and_then(|name| name.to_str()),
                    Some("mod.rs" | "lib.rs" | "main.rs")
                );
                if !is_rust || is_root {
                    continue;
                }
                if let Ok(relative) = path.strip_prefix(root) {
                    found.insert(relative.to_path_buf());
                }
            }
        }

        Ok(found)
    }

    /// Names declared with `mod name;` or `pub mod name;` in a module root
    fn declared_modules(root_file: &Path) -> io::Result<BTreeSet<String>> {
        let text = fs::read_to_string(root_file)?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("pub ").unwrap_or(line).strip_prefix("mod "))
            .filter_map(|rest| rest.strip_suffix(';'))
            .map(str::to_owned)
            .collect())
    }

    /// The file declaring modules for `dir`: `main.rs` at the unit root, `mod.rs` below it
    fn module_root(unit_root: &Path, dir: &Path) -> PathBuf {
        if dir == unit_root {
            dir.join("main.rs")
        } else {
            dir.join("mod.rs")
        }
    }

    fn listing(paths: &[PathBuf]) -> String {
        paths
            .iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests each source module has a unit test file at the same relative path
    // Verified by adding a source file without a unit test file
    #[test]
    fn test_unit_tree_mirrors_sources() {
        let sources = module_files(Path::new(SOURCE_ROOT)).unwrap();
        let units = module_files(Path::new(UNIT_ROOT)).unwrap();

        let untested: Vec<PathBuf> = sources.difference(&units).cloned().collect();
        let orphaned: Vec<PathBuf> = units.difference(&sources).cloned().collect();

        assert!(
            untested.is_empty(),
            "source modules without unit tests:\n{}",
            listing(&untested)
        );
        assert!(
            orphaned.is_empty(),
            "unit test files without a source module:\n{}",
            listing(&orphaned)
        );
    }

    // Tests every unit test file is declared so the test binary compiles it
    // Verified by removing a module declaration from a unit mod.rs
    #[test]
    fn test_unit_files_are_declared() {
        let unit_root = Path::new(UNIT_ROOT);
        let mut undeclared = Vec::new();

        for relative in module_files(unit_root).unwrap() {
            let file = unit_root.join(&relative);
            let (Some(dir), Some(stem)) = (file.parent(), file.file_stem()) else {
                continue;
            };
            let declared = declared_modules(&module_root(unit_root, dir)).unwrap_or_default();
            if !declared.contains(stem.to_string_lossy().as_ref()) {
                undeclared.push(relative);
            }
        }

        let top = declared_modules(&unit_root.join("main.rs")).unwrap();
        for entry in fs::read_dir(unit_root).unwrap() {
            let path = entry.unwrap().path();
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if path.is_dir() && !top.contains(&name) {
                undeclared.push(PathBuf::from(name));
            }
        }

        assert!(
            undeclared.is_empty(),
            "unit test modules missing a `mod` declaration:\n{}",
            listing(&undeclared)
        );
    }

    // Tests each library module is declared in the unit tree under the same name
    // Verified by declaring a source module the unit tree does not name
    #[test]
    fn test_library_modules_have_unit_modules() {
        let source_root = Path::new(SOURCE_ROOT);
        let unit_root = Path::new(UNIT_ROOT);

        let top = declared_modules(&source_root.join("lib.rs")).unwrap();
        assert_eq!(declared_modules(&unit_root.join("main.rs")).unwrap(), top);

        for module in &top {
            let library = declared_modules(&source_root.join(module).join("mod.rs")).unwrap();
            let unit = declared_modules(&unit_root.join(module).join("mod.rs")).unwrap();
            assert_eq!(unit, library, "modules under {module} differ");
        }
    }

    // Tests every test file outside module roots defines at least one test
    // Verified by emptying a unit test file
    #[test]
    fn test_test_files_define_tests() {
        let tests_root = Path::new("tests");
        let mut empty = Vec::new();

        for relative in module_files(tests_root).unwrap() {
            let text = fs::read_to_string(tests_root.join(&relative)).unwrap();
            if !text.contains("#[test]") {
                empty.push(relative);
            }
        }

        assert!(
            empty.is_empty(),
            "test files without any #[test]:\n{}",
            listing(&empty)
        );
    }
}
