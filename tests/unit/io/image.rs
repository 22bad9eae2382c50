//! Tests for rendering decompositions and exporting them as PNG

#[cfg(test)]
mod tests {
    use hamcycle_adjacency::AdjacencyError;
    use hamcycle_adjacency::algorithm::search::Decomposition;
    use hamcycle_adjacency::graph::multigraph::Orientation;
    use hamcycle_adjacency::io::configuration::IMAGE_SIZE;
    use hamcycle_adjacency::io::image::{export_decomposition_png, render_decomposition};
    use image::Rgba;
    use std::fs;
    use tempfile::TempDir;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn pentagon_and_star() -> Decomposition {
        Decomposition {
            orientation: Orientation::Undirected,
            z: vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)],
            w: vec![(1, 3), (3, 5), (5, 2), (2, 4), (4, 1)],
            z_edges: Vec::new(),
            w_edges: Vec::new(),
        }
    }

    fn has_color(img: &image::RgbaImage, predicate: impl Fn(&Rgba<u8>) -> bool) -> bool {
        img.pixels().any(predicate)
    }

    // Tests the canvas size and vertex placement
    // Verified by placing vertex one at angle zero
    #[test]
    fn test_render_layout() {
        let img = render_decomposition(&pentagon_and_star(), 200);

        assert_eq!(img.dimensions(), (200, 200));
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(100, 40), BLACK);
    }

    // Tests Z is red and W is blue
    // Verified by drawing both cycles in one colour
    #[test]
    fn test_render_cycle_colors() {
        let img = render_decomposition(&pentagon_and_star(), 200);

        assert!(has_color(&img, |p| p.0[0] > 200 && p.0[2] < 100));
        assert!(has_color(&img, |p| p.0[2] > 200 && p.0[0] < 100));
    }

    // Tests vertex pairs joined by both cycles get their own colour
    // Verified by letting W overdraw shared pairs
    #[test]
    fn test_render_shared_pairs() {
        let mut decomposition = pentagon_and_star();
        decomposition.w = vec![(1, 2), (2, 4), (4, 3), (3, 5), (5, 1)];
        let img = render_decomposition(&decomposition, 200);

        assert!(has_color(&img, |p| p.0[0] > 150 && p.0[2] > 150 && p.0[1] < 100));
    }

    // Tests export creates missing parent directories
    // Verified by skipping directory creation
    #[test]
    fn test_export_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("renders").join("n5").join("case.png");

        export_decomposition_png(&pentagon_and_star(), &output).unwrap();

        let saved = image::open(&output).unwrap();
        assert_eq!(saved.width(), IMAGE_SIZE);
        assert_eq!(saved.height(), IMAGE_SIZE);
    }

    // Tests a file in place of the parent directory is reported
    // Verified by ignoring the directory creation result
    #[test]
    fn test_export_blocked_parent() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = export_decomposition_png(&pentagon_and_star(), &blocker.join("case.png"));

        assert!(matches!(result, Err(AdjacencyError::FileSystem { .. })));
    }
}
