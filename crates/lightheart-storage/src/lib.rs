//! Durable key-value storage for the Light Heart Tales reader.

pub mod json_file_store;
