//! 测试辅助工具
//!
//! 提供图构建辅助与环安全的深度相等比较（仅测试用，引擎本身不提供比较器）

#![allow(dead_code)]

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use klon_core::{HostNode, Value};

/// 构建带字符串键属性的对象
pub fn obj(entries: &[(&str, Value)]) -> Value {
    let value = Value::object();
    if let Value::Object(rc) = &value {
        let mut inner = rc.borrow_mut();
        for (key, val) in entries {
            inner.set(*key, val.clone());
        }
    }
    value
}

/// 读取对象的自有属性
pub fn get(value: &Value, key: &str) -> Value {
    value
        .as_object()
        .and_then(|rc| rc.borrow().get(key))
        .unwrap_or(Value::Undefined)
}

/// 写入对象的自有属性
pub fn set(value: &Value, key: &str, val: Value) {
    if let Some(rc) = value.as_object() {
        rc.borrow_mut().set(key, val);
    }
}

/// 读取数组元素
pub fn at(value: &Value, index: usize) -> Value {
    value
        .as_array()
        .and_then(|rc| rc.borrow().get(index))
        .unwrap_or(Value::Undefined)
}

/// 环安全的结构化深度相等
///
/// 原子值按身份比较，复合值按内容递归比较；
/// 已在比较中的对象对视为相等（协归纳处理环）。
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    deep_eq_inner(a, b, &mut Vec::new())
}

fn deep_eq_inner(a: &Value, b: &Value, in_progress: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Str(x), Value::Str(y)) => x == y,
        // 原子种类：相等当且仅当同一句柄
        (Value::Symbol(_), Value::Symbol(_))
        | (Value::Function(_), Value::Function(_))
        | (Value::Promise(_), Value::Promise(_))
        | (Value::Resource(_), Value::Resource(_))
        | (Value::Error(_), Value::Error(_)) => a.ptr_eq(b),
        (Value::Date(x), Value::Date(y)) => x.borrow().epoch_ms == y.borrow().epoch_ms,
        (Value::RegExp(x), Value::RegExp(y)) => x.source == y.source && x.flags == y.flags,
        (Value::Buffer(x), Value::Buffer(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.kind == y.kind && x.data == y.data
        }
        (Value::ArrayBuffer(x), Value::ArrayBuffer(y)) => x.borrow().data == y.borrow().data,
        (Value::Array(x), Value::Array(y)) => {
            let pair = (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize);
            if in_progress.contains(&pair) {
                return true;
            }
            in_progress.push(pair);
            let (x, y) = (x.borrow(), y.borrow());
            let equal = x.elements.len() == y.elements.len()
                && x.elements
                    .iter()
                    .zip(y.elements.iter())
                    .all(|(ea, eb)| deep_eq_inner(ea, eb, in_progress))
                && bags_eq(&x.props, &y.props, in_progress)
                && x.is_frozen() == y.is_frozen()
                && x.is_sealed() == y.is_sealed();
            in_progress.pop();
            equal
        }
        (Value::Map(x), Value::Map(y)) => {
            let pair = (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize);
            if in_progress.contains(&pair) {
                return true;
            }
            in_progress.push(pair);
            let (x, y) = (x.borrow(), y.borrow());
            let equal = x.len() == y.len()
                && x.entries().all(|(key, val)| {
                    y.entries().any(|(other_key, other_val)| {
                        deep_eq_inner(key, other_key, in_progress)
                            && deep_eq_inner(val, other_val, in_progress)
                    })
                });
            in_progress.pop();
            equal
        }
        (Value::Set(x), Value::Set(y)) => {
            let pair = (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize);
            if in_progress.contains(&pair) {
                return true;
            }
            in_progress.push(pair);
            let (x, y) = (x.borrow(), y.borrow());
            let equal = x.len() == y.len()
                && x.iter()
                    .all(|item| y.iter().any(|other| deep_eq_inner(item, other, in_progress)));
            in_progress.pop();
            equal
        }
        (Value::Object(x), Value::Object(y)) => {
            let pair = (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize);
            if in_progress.contains(&pair) {
                return true;
            }
            in_progress.push(pair);
            let (x, y) = (x.borrow(), y.borrow());
            let shape_eq = match (&x.shape, &y.shape) {
                (None, None) => true,
                (Some(sa), Some(sb)) => Rc::ptr_eq(sa, sb),
                _ => false,
            };
            let proto_eq = match (&x.proto, &y.proto) {
                (None, None) => true,
                // 原型是共享的，不是克隆的
                (Some(pa), Some(pb)) => Rc::ptr_eq(pa, pb),
                _ => false,
            };
            let equal = shape_eq
                && proto_eq
                && bags_eq(&x.props, &y.props, in_progress)
                && x.is_frozen() == y.is_frozen()
                && x.is_sealed() == y.is_sealed();
            in_progress.pop();
            equal
        }
        (Value::Node(x), Value::Node(y)) => x.node_name() == y.node_name(),
        (Value::NodeList(x), Value::NodeList(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len()
                && x.nodes
                    .iter()
                    .zip(y.nodes.iter())
                    .all(|(na, nb)| na.node_name() == nb.node_name())
        }
        _ => false,
    }
}

fn bags_eq(
    a: &klon_core::PropertyBag,
    b: &klon_core::PropertyBag,
    in_progress: &mut Vec<(usize, usize)>,
) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let strings_equal = a.string_entries().all(|(key, prop)| {
        b.get_property(key)
            .map(|other| {
                prop.enumerable == other.enumerable
                    && deep_eq_inner(&prop.value, &other.value, in_progress)
            })
            .unwrap_or(false)
    });
    let symbols_equal = a.symbol_entries().all(|(sym, prop)| {
        b.get_symbol(sym)
            .map(|other| deep_eq_inner(&prop.value, other, in_progress))
            .unwrap_or(false)
    });
    strings_equal && symbols_equal
}

// ==================== 模拟宿主节点 ====================

/// 测试用宿主节点：可配置是否提供原生克隆设施
pub struct MockNode {
    pub name: String,
    pub content: RefCell<String>,
    pub children: RefCell<Vec<Rc<MockNode>>>,
    pub cloneable: bool,
}

impl MockNode {
    pub fn new(name: &str, content: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            content: RefCell::new(content.to_string()),
            children: RefCell::new(Vec::new()),
            cloneable: true,
        })
    }

    /// 无克隆设施的节点
    pub fn opaque(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            content: RefCell::new(String::new()),
            children: RefCell::new(Vec::new()),
            cloneable: false,
        })
    }

    pub fn append(self: &Rc<Self>, child: Rc<MockNode>) {
        self.children.borrow_mut().push(child);
    }

    fn deep_clone_mock(&self) -> MockNode {
        MockNode {
            name: self.name.clone(),
            content: RefCell::new(self.content.borrow().clone()),
            children: RefCell::new(
                self.children
                    .borrow()
                    .iter()
                    .map(|child| Rc::new(child.deep_clone_mock()))
                    .collect(),
            ),
            cloneable: self.cloneable,
        }
    }
}

impl HostNode for MockNode {
    fn node_name(&self) -> &str {
        &self.name
    }

    fn clone_node_deep(&self) -> Option<Rc<dyn HostNode>> {
        if !self.cloneable {
            return None;
        }
        Some(Rc::new(self.deep_clone_mock()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 把 Value::Node 向下转型回 MockNode（字段是 RefCell，可直接读写）
pub fn mock_of(value: &Value) -> &MockNode {
    value
        .as_node()
        .expect("expected a node value")
        .as_any()
        .downcast_ref::<MockNode>()
        .expect("expected a MockNode")
}
