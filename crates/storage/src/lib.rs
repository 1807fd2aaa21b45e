#![forbid(unsafe_code)]

pub mod remote;
pub mod repository;
pub mod sqlite;

pub use repository::{
    CategoryRepository, InMemoryRepository, ProgressRepository, QuestionRepository, Storage,
    StorageError,
};
