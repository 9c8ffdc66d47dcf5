//! no6 Infrastructure Layer
pub mod dns;
