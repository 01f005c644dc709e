//! qbl-render — output renderers for question banks.
//!
//! Each module is a pure function of the working question sequence (plus
//! format-specific options) producing output text. Renderers never mutate
//! the questions they are given.

pub mod d2l;
pub mod debug;
pub mod gradescope;
pub mod latex;
pub mod qbl;
pub mod web;
