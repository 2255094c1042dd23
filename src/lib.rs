//! Dialer library exports for the binary and integration tests

pub mod core;
pub mod effects;
pub mod headless;
pub mod tui;
pub mod voice;

#[cfg(test)]
pub mod test_support;
