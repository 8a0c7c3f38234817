//! Individual preprocessing steps

pub mod grayscale;
pub mod morphology;
pub mod threshold;
