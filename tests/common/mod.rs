//! 测试辅助工具
//!
//! 提供端到端测试的图构建辅助函数

#![allow(dead_code)]

use klon_workspace::api::Value;

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
