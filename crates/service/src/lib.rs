//! Service layer for the todo collection.
//! - `storage` owns every read and write of the persisted collection.
//! - `todos` holds the list/create/update/delete rules on top of a store.

pub mod errors;
pub mod storage;
pub mod todos;
