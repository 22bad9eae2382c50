//! Tests for test case validation and the plain and VNS dataset formats

#[cfg(test)]
mod tests {
    use hamcycle_adjacency::AdjacencyError;
    use hamcycle_adjacency::graph::multigraph::Orientation;
    use hamcycle_adjacency::io::dataset::{
        TestCase, import_from_file, import_from_vns_file, parse_plain, parse_vns,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const VNS_LOG: &str = "\
Run 1
\tInitial Cycle 1: 1, 2, 3, 4, 5
\tInitial Cycle 2: 1, 3, 5, 2, 4
a
b
c
d
e
f
g
h
Run 2
\tInitial Cycle 1: 2,1,3
\tInitial Cycle 2: 3 1 2
";

    // Tests well-formed cases pass validation
    // Verified by rejecting cycles that do not start at vertex one
    #[test]
    fn test_validate_accepts_permutations() {
        let case = TestCase::new(vec![3, 1, 2, 4], vec![2, 4, 1, 3]);

        assert!(case.validate(Orientation::Directed).is_ok());
        assert!(case.validate(Orientation::Undirected).is_ok());
        assert_eq!(case.vertex_count(), 4);
        assert_eq!(case.swapped().x, vec![2, 4, 1, 3]);
    }

    // Tests every malformed case is rejected with the matching error
    // Verified by removing the duplicate label check
    #[test]
    fn test_validate_rejections() {
        let mismatch = TestCase::new(vec![1, 2, 3], vec![1, 2, 3, 4]);
        assert!(matches!(
            mismatch.validate(Orientation::Directed),
            Err(AdjacencyError::LengthMismatch { x: 3, y: 4 })
        ));

        let short = TestCase::new(vec![1, 2], vec![2, 1]);
        assert!(matches!(
            short.validate(Orientation::Directed),
            Err(AdjacencyError::InvalidCycle { cycle: "X", .. })
        ));

        let repeated = TestCase::new(vec![1, 2, 3], vec![1, 1, 3]);
        assert!(matches!(
            repeated.validate(Orientation::Directed),
            Err(AdjacencyError::InvalidCycle { cycle: "Y", .. })
        ));

        let out_of_range = TestCase::new(vec![1, 2, 4], vec![1, 3, 2]);
        assert!(matches!(
            out_of_range.validate(Orientation::Undirected),
            Err(AdjacencyError::InvalidCycle { cycle: "X", .. })
        ));
    }

    // Tests reversed cycles are equal only when undirected
    // Verified by comparing directed edge sets for both orientations
    #[test]
    fn test_validate_equal_cycles() {
        let reversed = TestCase::new(vec![1, 2, 3, 4], vec![1, 4, 3, 2]);

        assert!(reversed.validate(Orientation::Directed).is_ok());
        assert!(matches!(
            reversed.validate(Orientation::Undirected),
            Err(AdjacencyError::EqualCycles {
                orientation: "undirected"
            })
        ));

        let rotated = TestCase::new(vec![1, 2, 3, 4], vec![3, 4, 1, 2]);
        assert!(rotated.validate(Orientation::Directed).is_err());
    }

    // Tests the plain format reads two-line blocks separated by blank lines
    // Verified by requiring exactly one blank line between blocks
    #[test]
    fn test_parse_plain() {
        let text = "1 2 3 4\n1 3 2 4\n\n\n4 3 2 1\n2 4 1 3\n";
        let cases = parse_plain(text, Path::new("cases.txt")).unwrap();

        assert_eq!(
            cases,
            vec![
                TestCase::new(vec![1, 2, 3, 4], vec![1, 3, 2, 4]),
                TestCase::new(vec![4, 3, 2, 1], vec![2, 4, 1, 3]),
            ]
        );
        assert!(parse_plain("", Path::new("empty.txt")).unwrap().is_empty());
    }

    // Tests malformed plain input names the offending line
    // Verified by reporting the line after the block
    #[test]
    fn test_parse_plain_errors() {
        let three_lines = "1 2 3\n1 3 2\n\n1 2 3\n1 3 2\n2 1 3\n";
        let error = parse_plain(three_lines, Path::new("bad.txt")).unwrap_err();
        assert!(matches!(error, AdjacencyError::Parse { line: 4, .. }));

        let not_a_number = "1 2 x\n1 3 2\n";
        let error = parse_plain(not_a_number, Path::new("bad.txt")).unwrap_err();
        assert!(matches!(error, AdjacencyError::Parse { line: 1, .. }));
        assert!(error.to_string().contains("'x'"));
    }

    // Tests VNS logs yield one case per record and accept either separator
    // Verified by skipping seven trailing lines instead of eight
    #[test]
    fn test_parse_vns() {
        let cases = parse_vns(VNS_LOG, Path::new("run.log")).unwrap();

        assert_eq!(
            cases,
            vec![
                TestCase::new(vec![1, 2, 3, 4, 5], vec![1, 3, 5, 2, 4]),
                TestCase::new(vec![2, 1, 3], vec![3, 1, 2]),
            ]
        );
    }

    // Tests a truncated VNS record ends parsing without an error
    // Verified by returning an error for missing markers
    #[test]
    fn test_parse_vns_truncated() {
        let truncated = "Run 1\n\tInitial Cycle 1: 1, 2, 3\n";
        assert!(parse_vns(truncated, Path::new("run.log")).unwrap().is_empty());

        let garbage = "Run 1\n\tInitial Cycle 1: 1, two, 3\n\tInitial Cycle 2: 1, 2, 3\n";
        assert!(parse_vns(garbage, Path::new("run.log")).is_err());
    }

    // Tests both importers read files and report missing ones
    // Verified by swallowing file system errors
    #[test]
    fn test_import_from_files() {
        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("cases.txt");
        let vns = temp_dir.path().join("run.log");
        fs::write(&plain, "1 2 3\n1 3 2\n").unwrap();
        fs::write(&vns, VNS_LOG).unwrap();

        assert_eq!(import_from_file(&plain).unwrap().len(), 1);
        assert_eq!(import_from_vns_file(&vns).unwrap().len(), 2);

        let missing = temp_dir.path().join("missing.txt");
        assert!(matches!(
            import_from_file(&missing),
            Err(AdjacencyError::FileSystem { .. })
        ));
        assert!(import_from_vns_file(&missing).is_err());
    }
}
