//! Item service
//!
//! CRUD operations over the item store plus the batch processing entry point

mod service;


pub use service::ItemService;
