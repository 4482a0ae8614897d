//! Field type system and schema derivation
//!
//! `formsmith-fields` is the pure core of the form builder: the field
//! type registry, label-to-key generation, validation rules, schema
//! derivation, and control rendering. It owns no storage and performs
//! no I/O; `formsmith-engine` layers persistence and filling sessions
//! on top.
//!
//! # Architecture
//!
//! - **Typed field model**: field types are a closed tagged union, and
//!   choice types carry their options inline
//! - **Graceful degradation**: unrecognized persisted types fall back
//!   to a plain text control instead of failing the load
//! - **Pure derivation**: validators and defaults are a deterministic
//!   function of the field list, shared by authoring and fill time

pub mod derive;
pub mod error;
pub mod key;
pub mod render;
pub mod rules;
pub mod types;
pub mod value;

pub use derive::{default_value, derive, DerivedSchema, FieldValidator, ValidationResult};
pub use error::{FieldsError, Result};
pub use key::generate_key;
pub use render::{render_control, toggle_choice, validate_submission, ControlDescription};
pub use rules::{BaseCheck, ValidationRule};
pub use types::{
    ControlKind, DefaultValueKind, FieldDefinition, FieldId, FieldOption, FieldType, InputMode,
    TypeDescription,
};
pub use value::FieldValue;
