//! Color mapping for the external renderer. Drawing itself happens elsewhere;
//! pixel snapping and quantization are the renderer's business.

pub mod colors;
