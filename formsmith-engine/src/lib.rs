//! Form persistence, authoring, and filling sessions
//!
//! `formsmith-engine` wraps the pure schema core from
//! `formsmith-fields` with everything stateful: form and response
//! definitions, a pluggable persistence port with file and in-memory
//! backends, the `FormStore` authoring API, and the
//! `SubmissionSession` state machine for filling a form.
//!
//! # Architecture
//!
//! - **Memory is authoritative**: the store mutates in memory first and
//!   writes the whole collection through the backend after every
//!   mutation; a failed write is logged and absorbed
//! - **Injected persistence**: backends implement the `FormStorage`
//!   trait and are chosen by the embedding application
//! - **Explicit misses**: lookups that find nothing return errors, and
//!   a failed operation leaves the collection unchanged

pub mod error;
pub mod ids;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{EngineError, Result};
pub use ids::{FormId, ResponseId};
pub use session::{SessionState, SubmissionSession};
pub use storage::{FormStorage, JsonFileStorage, MemoryStorage};
pub use store::FormStore;
pub use types::{
    FieldConfig, FieldUpdate, FormConfigUpdate, FormDefinition, FormResponse,
};
