//! Shared setup and assertions for the tracking tests

pub mod assertions;
pub mod feeds;
