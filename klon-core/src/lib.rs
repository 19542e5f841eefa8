//! Klon Core - Structural deep-copy engine (pure logic, no IO)
//!
//! Contains the dynamic value model, type classifier, identity registry,
//! and copy dispatcher. Only operates on in-memory data structures, no file
//! IO or terminal output.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod core;
pub mod runtime;

// Re-export common types
pub use crate::core::object::{
    ElementKind, HostNode, NativeFn, ObjArray, ObjArrayBuffer, ObjBuffer, ObjDate, ObjError,
    ObjFunction, ObjMap, ObjNodeList, ObjObject, ObjPromise, ObjRegExp, ObjResource, ObjSet,
    ObjShape, ObjSymbol, PropKey, Property, PropertyBag, RegExpFlags,
};
pub use crate::core::{InternalError, Value};
pub use crate::runtime::{classify, CopyEngine, CopyPolicy, CopyRegistry, CopyStats, ObjId, TypeTag};

// Re-export config types from klon-config
pub use klon_config::{EngineConfig, Profile, RegistryConfig, Stage};
