//! # Binary record shards
//!
//! A minimal sharded record format for (image, key-point grid) training
//! pairs. Each shard file holds a finite, ordered sequence of independent
//! self-describing records — no cross-record indexing, no compression.
//! Shards are written once and never modified.

pub mod error;
pub mod reader;
pub mod record;
pub mod writer;

pub use error::{Result, ShardError};
pub use reader::read_shard;
pub use record::{Record, Tensor};
pub use writer::{ShardWriter, DEFAULT_EXTENSION};
