//! am-storage - Storage library for assignment-maker
//!
//! This crate provides the file system implementation of the assignment store.

mod store;

pub use store::FileSystemStore;
