//! 动态值模型 (Core 层)
//!
//! 引擎操作的封闭值类型：立即值内联存储，堆值持有 Rc 句柄。
//! 堆身份即 Rc 分配地址，供身份注册表做别名/环检测。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::object::{
    ElementKind, HostNode, NativeFn, ObjArray, ObjArrayBuffer, ObjBuffer, ObjDate, ObjError,
    ObjFunction, ObjMap, ObjNodeList, ObjObject, ObjPromise, ObjRegExp, ObjResource, ObjSet,
    ObjShape, ObjSymbol, RegExpFlags,
};

/// 动态值（封闭枚举）
#[derive(Clone)]
pub enum Value {
    /// 空值
    Null,
    /// 未定义
    Undefined,
    /// 布尔值
    Bool(bool),
    /// 数值（含 NaN 与 ±Infinity）
    Number(f64),
    /// 不可变文本（值语义）
    Str(Rc<str>),
    /// 唯一符号令牌（原子）
    Symbol(Rc<ObjSymbol>),
    /// 可调用值（原子）
    Function(Rc<ObjFunction>),
    /// 挂起的异步句柄（原子）
    Promise(Rc<ObjPromise>),
    /// 外部资源句柄（原子）
    Resource(Rc<ObjResource>),
    /// 错误值（原子）
    Error(Rc<ObjError>),
    /// 日期对象
    Date(Rc<RefCell<ObjDate>>),
    /// 模式对象
    RegExp(Rc<ObjRegExp>),
    /// 类型化数值缓冲区
    Buffer(Rc<RefCell<ObjBuffer>>),
    /// 原始字节缓冲区
    ArrayBuffer(Rc<RefCell<ObjArrayBuffer>>),
    /// 有序序列
    Array(Rc<RefCell<ObjArray>>),
    /// 键值容器
    Map(Rc<RefCell<ObjMap>>),
    /// 唯一元素集合
    Set(Rc<RefCell<ObjSet>>),
    /// 普通/自定义对象
    Object(Rc<RefCell<ObjObject>>),
    /// 宿主结构化节点
    Node(Rc<dyn HostNode>),
    /// 宿主节点集合
    NodeList(Rc<RefCell<ObjNodeList>>),
}

impl Value {
    // ==================== 构造方法 ====================

    /// 创建数值
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// 创建布尔值
    pub fn bool_from(b: bool) -> Self {
        Value::Bool(b)
    }

    /// 创建文本
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// 创建符号
    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Rc::new(ObjSymbol::new(description.map(str::to_string))))
    }

    /// 创建原生函数
    pub fn function(name: impl Into<String>, arity: u8, func: NativeFn) -> Self {
        Value::Function(Rc::new(ObjFunction::new(name, arity, func)))
    }

    /// 创建挂起的异步句柄
    pub fn promise(operation: impl Into<String>) -> Self {
        Value::Promise(Rc::new(ObjPromise::new(operation)))
    }

    /// 创建外部资源句柄
    pub fn resource(descriptor: impl Into<String>) -> Self {
        Value::Resource(Rc::new(ObjResource::new(descriptor)))
    }

    /// 创建错误值
    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Error(Rc::new(ObjError::new(kind, message)))
    }

    /// 创建日期
    pub fn date(epoch_ms: f64) -> Self {
        Value::Date(Rc::new(RefCell::new(ObjDate::new(epoch_ms))))
    }

    /// 创建模式
    pub fn regexp(source: impl Into<String>, flags: RegExpFlags) -> Self {
        Value::RegExp(Rc::new(ObjRegExp::new(source, flags)))
    }

    /// 创建零填充类型化缓冲区
    pub fn buffer(kind: ElementKind, len: usize) -> Self {
        Value::Buffer(Rc::new(RefCell::new(ObjBuffer::new(kind, len))))
    }

    /// 从字节创建类型化缓冲区
    pub fn buffer_from_bytes(kind: ElementKind, data: Vec<u8>) -> Self {
        Value::Buffer(Rc::new(RefCell::new(ObjBuffer::from_bytes(kind, data))))
    }

    /// 创建原始字节缓冲区
    pub fn array_buffer(byte_len: usize) -> Self {
        Value::ArrayBuffer(Rc::new(RefCell::new(ObjArrayBuffer::new(byte_len))))
    }

    /// 创建数组
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(ObjArray::from_vec(elements))))
    }

    /// 创建空键值容器
    pub fn map() -> Self {
        Value::Map(Rc::new(RefCell::new(ObjMap::new())))
    }

    /// 创建空集合
    pub fn set() -> Self {
        Value::Set(Rc::new(RefCell::new(ObjSet::new())))
    }

    /// 创建空对象（无类型描述符、无原型）
    pub fn object() -> Self {
        Value::Object(Rc::new(RefCell::new(ObjObject::new())))
    }

    /// 从已构建的对象创建
    pub fn object_from(obj: ObjObject) -> Self {
        Value::Object(Rc::new(RefCell::new(obj)))
    }

    /// 创建指定类型描述符的对象
    pub fn object_with_shape(shape: Rc<ObjShape>) -> Self {
        Value::Object(Rc::new(RefCell::new(ObjObject::with_shape(shape))))
    }

    /// 包装宿主节点
    pub fn node(node: Rc<dyn HostNode>) -> Self {
        Value::Node(node)
    }

    /// 创建宿主节点集合
    pub fn node_list(nodes: Vec<Rc<dyn HostNode>>) -> Self {
        Value::NodeList(Rc::new(RefCell::new(ObjNodeList::from_vec(nodes))))
    }

    // ==================== 类型判断 ====================

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// 是否为原始值（非对象/复合值）
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Undefined | Value::Bool(_) | Value::Number(_) | Value::Str(_)
        )
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_promise(&self) -> bool {
        matches!(self, Value::Promise(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Value::Resource(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    pub fn is_regexp(&self) -> bool {
        matches!(self, Value::RegExp(_))
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Value::Buffer(_))
    }

    pub fn is_array_buffer(&self) -> bool {
        matches!(self, Value::ArrayBuffer(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    pub fn is_node_list(&self) -> bool {
        matches!(self, Value::NodeList(_))
    }

    // ==================== 解包方法 ====================

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Rc<ObjSymbol>> {
        match self {
            Value::Symbol(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Rc<ObjFunction>> {
        match self {
            Value::Function(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&Rc<ObjError>> {
        match self {
            Value::Error(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Rc<RefCell<ObjDate>>> {
        match self {
            Value::Date(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_regexp(&self) -> Option<&Rc<ObjRegExp>> {
        match self {
            Value::RegExp(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&Rc<RefCell<ObjBuffer>>> {
        match self {
            Value::Buffer(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_array_buffer(&self) -> Option<&Rc<RefCell<ObjArrayBuffer>>> {
        match self {
            Value::ArrayBuffer(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Rc<RefCell<ObjArray>>> {
        match self {
            Value::Array(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Rc<RefCell<ObjMap>>> {
        match self {
            Value::Map(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Rc<RefCell<ObjSet>>> {
        match self {
            Value::Set(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<RefCell<ObjObject>>> {
        match self {
            Value::Object(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Rc<dyn HostNode>> {
        match self {
            Value::Node(rc) => Some(rc),
            _ => None,
        }
    }

    pub fn as_node_list(&self) -> Option<&Rc<RefCell<ObjNodeList>>> {
        match self {
            Value::NodeList(rc) => Some(rc),
            _ => None,
        }
    }

    // ==================== 身份 ====================

    /// 堆身份（Rc 分配地址）；立即值与文本返回 None
    pub fn heap_id(&self) -> Option<usize> {
        match self {
            Value::Null | Value::Undefined | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {
                None
            }
            Value::Symbol(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Function(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Promise(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Resource(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Error(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Date(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::RegExp(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Buffer(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::ArrayBuffer(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Array(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Set(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Object(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Node(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::NodeList(rc) => Some(Rc::as_ptr(rc) as usize),
        }
    }

    /// 是否为同一堆分配（立即值恒为 false）
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self.heap_id(), other.heap_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// SameValueZero 比较：原始值按值（NaN 等于自身），堆值按身份
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => self.ptr_eq(other),
        }
    }
}

// ==================== Debug 输出 ====================

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Undefined => write!(f, "Undefined"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Symbol(rc) => write!(f, "Symbol(0x{:x})", Rc::as_ptr(rc) as usize),
            Value::Function(rc) => write!(f, "Function({})", rc.name),
            Value::Promise(_) => write!(f, "Promise"),
            Value::Resource(rc) => write!(f, "Resource({})", rc.descriptor),
            Value::Error(rc) => write!(f, "Error({}: {})", rc.kind, rc.message),
            Value::Date(rc) => write!(f, "Date({})", rc.borrow().epoch_ms),
            Value::RegExp(rc) => write!(f, "RegExp(/{}/{})", rc.source, rc.flags.to_suffix()),
            Value::Buffer(rc) => {
                let buf = rc.borrow();
                write!(f, "Buffer({} x{})", buf.kind.as_str(), buf.len())
            }
            Value::ArrayBuffer(rc) => write!(f, "ArrayBuffer({})", rc.borrow().byte_len()),
            Value::Array(rc) => write!(f, "Array(0x{:x})", Rc::as_ptr(rc) as usize),
            Value::Map(rc) => write!(f, "Map(0x{:x})", Rc::as_ptr(rc) as usize),
            Value::Set(rc) => write!(f, "Set(0x{:x})", Rc::as_ptr(rc) as usize),
            Value::Object(rc) => write!(f, "Object(0x{:x})", Rc::as_ptr(rc) as usize),
            Value::Node(rc) => write!(f, "Node({})", rc.node_name()),
            Value::NodeList(rc) => write!(f, "NodeList({})", rc.borrow().len()),
        }
    }
}

// ==================== Display 输出 ====================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut seen = Vec::new();
        fmt_value(self, f, &mut seen)
    }
}

/// 环安全的递归渲染：正在渲染的堆对象再次出现时输出 <circular>
fn fmt_value(value: &Value, f: &mut fmt::Formatter<'_>, seen: &mut Vec<usize>) -> fmt::Result {
    if let Some(id) = value.heap_id() {
        if seen.contains(&id) {
            return write!(f, "<circular>");
        }
    }

    match value {
        Value::Null => write!(f, "null"),
        Value::Undefined => write!(f, "undefined"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::Str(s) => write!(f, "{s}"),
        Value::Symbol(rc) => match &rc.description {
            Some(desc) => write!(f, "<symbol {desc}>"),
            None => write!(f, "<symbol>"),
        },
        Value::Function(rc) => write!(f, "<function {}>", rc.name),
        Value::Promise(_) => write!(f, "<promise>"),
        Value::Resource(rc) => write!(f, "<resource {}>", rc.descriptor),
        Value::Error(rc) => write!(f, "<{}: {}>", rc.kind, rc.message),
        Value::Date(rc) => write!(f, "<date {}>", rc.borrow().epoch_ms),
        Value::RegExp(rc) => write!(f, "/{}/{}", rc.source, rc.flags.to_suffix()),
        Value::Buffer(rc) => {
            let buf = rc.borrow();
            write!(f, "<buffer {} x{}>", buf.kind.as_str(), buf.len())
        }
        Value::ArrayBuffer(rc) => write!(f, "<arraybuffer {}>", rc.borrow().byte_len()),
        Value::Array(rc) => {
            seen.push(Rc::as_ptr(rc) as usize);
            let arr = rc.borrow();
            write!(f, "[")?;
            for (i, element) in arr.elements.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_value(element, f, seen)?;
            }
            write!(f, "]")?;
            seen.pop();
            Ok(())
        }
        Value::Map(rc) => {
            seen.push(Rc::as_ptr(rc) as usize);
            let map = rc.borrow();
            write!(f, "Map {{")?;
            for (i, (key, val)) in map.entries().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_value(key, f, seen)?;
                write!(f, " => ")?;
                fmt_value(val, f, seen)?;
            }
            write!(f, "}}")?;
            seen.pop();
            Ok(())
        }
        Value::Set(rc) => {
            seen.push(Rc::as_ptr(rc) as usize);
            let set = rc.borrow();
            write!(f, "Set {{")?;
            for (i, item) in set.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_value(item, f, seen)?;
            }
            write!(f, "}}")?;
            seen.pop();
            Ok(())
        }
        Value::Object(rc) => {
            seen.push(Rc::as_ptr(rc) as usize);
            let obj = rc.borrow();
            if let Some(shape) = &obj.shape {
                write!(f, "{} ", shape.name)?;
            }
            write!(f, "{{")?;
            let mut first = true;
            for (key, prop) in obj.props.string_entries() {
                if !first {
                    write!(f, ", ")?;
                }
                first = false;
                write!(f, "{key}: ")?;
                fmt_value(&prop.value, f, seen)?;
            }
            for (sym, prop) in obj.props.symbol_entries() {
                if !first {
                    write!(f, ", ")?;
                }
                first = false;
                match &sym.description {
                    Some(desc) => write!(f, "[{desc}]: ")?,
                    None => write!(f, "[symbol]: ")?,
                }
                fmt_value(&prop.value, f, seen)?;
            }
            write!(f, "}}")?;
            seen.pop();
            Ok(())
        }
        Value::Node(rc) => write!(f, "<node {}>", rc.node_name()),
        Value::NodeList(rc) => write!(f, "<nodelist {}>", rc.borrow().len()),
    }
}

// ==================== 测试 ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_predicates() {
        assert!(Value::Null.is_primitive());
        assert!(Value::Undefined.is_primitive());
        assert!(Value::bool_from(true).is_primitive());
        assert!(Value::number(1.5).is_primitive());
        assert!(Value::str("x").is_primitive());
        assert!(!Value::object().is_primitive());
        assert!(!Value::symbol(Some("s")).is_primitive());
    }

    #[test]
    fn test_nan_predicate() {
        assert!(Value::number(f64::NAN).is_nan());
        assert!(!Value::number(1.0).is_nan());
        assert!(!Value::str("NaN").is_nan());
    }

    #[test]
    fn test_heap_id_stability() {
        let obj = Value::object();
        let alias = obj.clone();

        assert!(obj.heap_id().is_some());
        assert_eq!(obj.heap_id(), alias.heap_id());
        assert!(obj.ptr_eq(&alias));

        let other = Value::object();
        assert!(!obj.ptr_eq(&other));
    }

    #[test]
    fn test_primitives_have_no_identity() {
        assert!(Value::Null.heap_id().is_none());
        assert!(Value::number(1.0).heap_id().is_none());
        assert!(Value::str("x").heap_id().is_none());
        assert!(!Value::str("x").ptr_eq(&Value::str("x")));
    }

    #[test]
    fn test_same_value_zero() {
        assert!(Value::number(f64::NAN).same_value_zero(&Value::number(f64::NAN)));
        assert!(Value::str("a").same_value_zero(&Value::str("a")));
        assert!(Value::Null.same_value_zero(&Value::Null));
        assert!(!Value::Null.same_value_zero(&Value::Undefined));

        let obj = Value::object();
        assert!(obj.same_value_zero(&obj.clone()));
        assert!(!obj.same_value_zero(&Value::object()));
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(format!("{}", Value::Null), "null");
        assert_eq!(format!("{}", Value::Undefined), "undefined");
        assert_eq!(format!("{}", Value::bool_from(true)), "true");
        assert_eq!(format!("{}", Value::number(42.0)), "42");
        assert_eq!(format!("{}", Value::str("hi")), "hi");
    }

    #[test]
    fn test_display_array() {
        let arr = Value::array(vec![Value::number(1.0), Value::str("two")]);
        assert_eq!(format!("{arr}"), "[1, two]");
    }

    #[test]
    fn test_display_regexp() {
        let re = Value::regexp(
            "^asdf",
            RegExpFlags {
                global: true,
                ignore_case: true,
                multiline: true,
            },
        );
        assert_eq!(format!("{re}"), "/^asdf/gim");
    }

    #[test]
    fn test_display_cycle_terminates() {
        let arr = Value::array(vec![]);
        if let Value::Array(rc) = &arr {
            rc.borrow_mut().elements.push(arr.clone());
        }

        let rendered = format!("{arr}");
        assert!(rendered.contains("<circular>"));
    }

    #[test]
    fn test_display_shaped_object() {
        let shape = Rc::new(ObjShape::new("Point"));
        let value = Value::object_with_shape(shape);
        if let Value::Object(rc) = &value {
            rc.borrow_mut().set("x", Value::number(1.0));
        }
        let rendered = format!("{value}");
        assert!(rendered.starts_with("Point {"));
        assert!(rendered.contains("x: 1"));
    }

    #[test]
    fn test_function_call() {
        fn add(args: &[Value]) -> Value {
            let a = args.first().and_then(Value::as_number).unwrap_or(0.0);
            let b = args.get(1).and_then(Value::as_number).unwrap_or(0.0);
            Value::number(a + b)
        }

        let func = Value::function("add", 2, add);
        let result = func
            .as_function()
            .map(|f| f.call(&[Value::number(2.0), Value::number(3.0)]))
            .unwrap();
        assert_eq!(result.as_number(), Some(5.0));
    }
}
