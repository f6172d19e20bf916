//! Infrastructure layer: wire-format concerns.

pub mod dto;
