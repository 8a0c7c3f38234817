//! Image preprocessing module for handwriting OCR
//!
//! Turns a color photo of handwriting into a binary image with ink as the
//! foreground (255) and background as 0.

pub mod pipeline;
pub mod steps;

pub use pipeline::Pipeline;
