pub mod animate;
pub mod emit;
pub mod frame;
pub mod grid;
pub mod palette;
