//! Core data models for the item service

pub mod item;

pub use item::{Item, ItemPayload, STATUS_NEW, STATUS_PROCESSED};
