//! Utility functions

pub mod bits;

pub use bits::{Rotation, rot_byte, rot_byte_left, rot_byte_right};
