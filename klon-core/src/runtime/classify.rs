//! 类型分类器
//!
//! 检查一个值并返回唯一的类型 tag，tag 决定拷贝策略。
//! 识别顺序与优先级由 match 的分支顺序体现（首个匹配生效）；
//! 冻结/密封是正交标志，不参与分类。

use crate::core::value::Value;

/// 类型 tag（封闭集合）
///
/// 每次访问重新计算，从不存储；访问去重由身份注册表负责。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    /// 原始值：null/undefined/布尔/数值/文本
    Primitive,
    /// 可调用值
    Function,
    /// 唯一符号令牌
    Symbol,
    /// 挂起的异步句柄
    Promise,
    /// 外部资源句柄
    Resource,
    /// 错误值
    Error,
    /// 日期
    Date,
    /// 模式
    RegExp,
    /// 类型化数值缓冲区
    Buffer,
    /// 原始字节缓冲区
    ArrayBuffer,
    /// 有序序列
    Array,
    /// 键值容器
    Map,
    /// 唯一元素集合
    Set,
    /// 普通/自定义对象（默认复合类型）
    Object,
    /// 宿主结构化节点
    Node,
    /// 宿主节点集合
    NodeList,
}

/// 拷贝策略
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyPolicy {
    /// 按值返回（值语义，身份无关紧要）
    ByValue,
    /// 返回同一引用（原子值）
    ByReference,
    /// 递归重建
    Reconstruct,
}

impl TypeTag {
    /// tag 对应的拷贝策略
    pub const fn policy(self) -> CopyPolicy {
        match self {
            TypeTag::Primitive => CopyPolicy::ByValue,
            TypeTag::Function
            | TypeTag::Symbol
            | TypeTag::Promise
            | TypeTag::Resource
            | TypeTag::Error => CopyPolicy::ByReference,
            TypeTag::Date
            | TypeTag::RegExp
            | TypeTag::Buffer
            | TypeTag::ArrayBuffer
            | TypeTag::Array
            | TypeTag::Map
            | TypeTag::Set
            | TypeTag::Object
            | TypeTag::Node
            | TypeTag::NodeList => CopyPolicy::Reconstruct,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TypeTag::Primitive => "primitive",
            TypeTag::Function => "function",
            TypeTag::Symbol => "symbol",
            TypeTag::Promise => "promise",
            TypeTag::Resource => "resource",
            TypeTag::Error => "error",
            TypeTag::Date => "date",
            TypeTag::RegExp => "regexp",
            TypeTag::Buffer => "buffer",
            TypeTag::ArrayBuffer => "arraybuffer",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Set => "set",
            TypeTag::Object => "object",
            TypeTag::Node => "node",
            TypeTag::NodeList => "nodelist",
        }
    }
}

/// 对值进行分类，恰好返回一个 tag
///
/// match 覆盖全部变体，编译期保证穷尽。
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Null | Value::Undefined | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {
            TypeTag::Primitive
        }
        Value::Function(_) => TypeTag::Function,
        Value::Symbol(_) => TypeTag::Symbol,
        Value::Promise(_) => TypeTag::Promise,
        Value::Resource(_) => TypeTag::Resource,
        Value::Error(_) => TypeTag::Error,
        Value::Date(_) => TypeTag::Date,
        Value::RegExp(_) => TypeTag::RegExp,
        Value::Buffer(_) => TypeTag::Buffer,
        Value::ArrayBuffer(_) => TypeTag::ArrayBuffer,
        Value::Array(_) => TypeTag::Array,
        Value::Map(_) => TypeTag::Map,
        Value::Set(_) => TypeTag::Set,
        Value::Object(_) => TypeTag::Object,
        Value::Node(_) => TypeTag::Node,
        Value::NodeList(_) => TypeTag::NodeList,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::ElementKind;

    #[test]
    fn test_classify_primitives() {
        assert_eq!(classify(&Value::Null), TypeTag::Primitive);
        assert_eq!(classify(&Value::Undefined), TypeTag::Primitive);
        assert_eq!(classify(&Value::bool_from(false)), TypeTag::Primitive);
        assert_eq!(classify(&Value::number(f64::NAN)), TypeTag::Primitive);
        assert_eq!(classify(&Value::number(f64::INFINITY)), TypeTag::Primitive);
        assert_eq!(classify(&Value::str("x")), TypeTag::Primitive);
    }

    #[test]
    fn test_classify_atomics() {
        fn noop(_: &[Value]) -> Value {
            Value::Undefined
        }
        assert_eq!(classify(&Value::function("noop", 0, noop)), TypeTag::Function);
        assert_eq!(classify(&Value::symbol(Some("s"))), TypeTag::Symbol);
        assert_eq!(classify(&Value::promise("fetch")), TypeTag::Promise);
        assert_eq!(classify(&Value::resource("tcp://")), TypeTag::Resource);
        assert_eq!(classify(&Value::error("TypeError", "foo")), TypeTag::Error);
    }

    #[test]
    fn test_classify_composites() {
        assert_eq!(classify(&Value::date(0.0)), TypeTag::Date);
        assert_eq!(
            classify(&Value::regexp("a", Default::default())),
            TypeTag::RegExp
        );
        assert_eq!(classify(&Value::buffer(ElementKind::U8, 4)), TypeTag::Buffer);
        assert_eq!(classify(&Value::array_buffer(8)), TypeTag::ArrayBuffer);
        assert_eq!(classify(&Value::array(vec![])), TypeTag::Array);
        assert_eq!(classify(&Value::map()), TypeTag::Map);
        assert_eq!(classify(&Value::set()), TypeTag::Set);
        assert_eq!(classify(&Value::object()), TypeTag::Object);
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(TypeTag::Primitive.policy(), CopyPolicy::ByValue);
        assert_eq!(TypeTag::Function.policy(), CopyPolicy::ByReference);
        assert_eq!(TypeTag::Symbol.policy(), CopyPolicy::ByReference);
        assert_eq!(TypeTag::Promise.policy(), CopyPolicy::ByReference);
        assert_eq!(TypeTag::Resource.policy(), CopyPolicy::ByReference);
        assert_eq!(TypeTag::Error.policy(), CopyPolicy::ByReference);
        assert_eq!(TypeTag::Date.policy(), CopyPolicy::Reconstruct);
        assert_eq!(TypeTag::Array.policy(), CopyPolicy::Reconstruct);
        assert_eq!(TypeTag::Object.policy(), CopyPolicy::Reconstruct);
        assert_eq!(TypeTag::Node.policy(), CopyPolicy::Reconstruct);
    }

    #[test]
    fn test_frozen_is_orthogonal() {
        // 冻结数组仍然分类为 array，冻结是独立标志
        let arr = Value::array(vec![Value::number(1.0)]);
        if let Value::Array(rc) = &arr {
            rc.borrow_mut().freeze();
        }
        assert_eq!(classify(&arr), TypeTag::Array);
    }
}
