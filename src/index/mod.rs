pub mod inverted;
pub mod posting;
pub mod writer;
