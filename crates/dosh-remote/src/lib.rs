pub mod error;
pub mod github;
pub mod memory;
pub mod store;

pub use error::{RemoteError, Result};
pub use github::GitHubStore;
pub use memory::MemoryStore;
pub use store::{RemoteStore, Resource, Revision};
