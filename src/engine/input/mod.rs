// Input handling
//
// Mouse and touch input is reduced to a single pointer whose events are
// reported in world coordinates, ready for the scene to turn into movement
// targets.

mod pointer;

pub use pointer::{PointerEvent, PointerInput};
