pub mod vignette;
