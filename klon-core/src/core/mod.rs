//! Core 层 - 纯类型定义
//!
//! 值模型、堆对象与内部错误类型。拷贝逻辑在 runtime 层实现。

pub mod error;
pub mod object;
pub mod value;

pub use error::InternalError;
pub use object::{
    ElementKind, HostNode, NativeFn, ObjArray, ObjArrayBuffer, ObjBuffer, ObjDate, ObjError,
    ObjFunction, ObjMap, ObjNodeList, ObjObject, ObjPromise, ObjRegExp, ObjResource, ObjSet,
    ObjShape, ObjSymbol, PropKey, Property, PropertyBag, RegExpFlags,
};
pub use value::Value;
