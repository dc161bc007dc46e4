//! Build-time configuration.
//!
//! Generated by `build.rs` from `CAFBERIHT_WIDTH` (default 10): the width
//! itself, `CoreAggregator` over the first `CAFBERIHT_WIDTH` operations, and
//! `CoreCafberiht`, the container laid out by it.

include!(concat!(env!("OUT_DIR"), "/cafberiht_config.rs"));
