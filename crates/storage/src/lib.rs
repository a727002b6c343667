pub mod credential;
pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, NewProfile, ProfileRecord, ProfileRepository, ProgressRepository,
    Storage, StorageError,
};
