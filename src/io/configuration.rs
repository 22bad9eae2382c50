//! Search constants and runtime configuration defaults

// Search settings
/// Vertex every simple-path search starts from
pub const START_VERTEX: usize = 1;
/// Smallest cycle length for which a decomposition question is meaningful
pub const MIN_VERTEX_COUNT: usize = 3;

// Recursion depth grows with n, so each test runs on a worker thread sized for it
/// Stack size of a search worker thread, in bytes, for small graphs
pub const MIN_SEARCH_STACK_BYTES: usize = 8 * 1024 * 1024;
/// Stack bytes reserved per vertex and unit of recursion depth
pub const SEARCH_FRAME_BYTES: usize = 1024;
/// Recursion depth allowance per vertex when sizing worker stacks
pub const SEARCH_DEPTH_FACTOR: usize = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for configurable parameters
/// Fixed seed for reproducible test generation
pub const DEFAULT_SEED: u64 = 42;
/// Number of random cases generated per vertex count
pub const DEFAULT_TIMES: usize = 100;
/// Method number used when none is given (undirected simple path)
pub const DEFAULT_METHOD: usize = 1;

// Output settings
/// Width and height of rendered decompositions in pixels
pub const IMAGE_SIZE: u32 = 800;
/// Margin between the vertex circle and the image border in pixels
pub const IMAGE_MARGIN: u32 = 40;
/// Radius of a drawn vertex in pixels
pub const VERTEX_RADIUS: u32 = 4;
