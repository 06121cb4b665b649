pub mod cache;
pub mod context;
pub mod dictionary;
pub mod error;
pub mod preprocess;
pub mod publish;
pub mod search;
pub mod session;
pub mod sync;
pub mod validate;

pub use cache::DocumentCache;
pub use context::SessionContext;
pub use dictionary::{Dictionary, Mode};
pub use error::{Error, LoadFailure, Operation, Result, ValidationError};
pub use publish::{PublishReport, Skipped};
pub use session::{EditSession, Editor, FieldPath};
pub use sync::{AudioOwner, AudioUpload, SyncEngine};
