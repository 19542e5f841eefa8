//! 身份注册表
//!
//! 原值身份 → 已生成拷贝 的映射，仅在单次顶层拷贝调用期间存活。
//! 键是引用/指针身份而非结构相等：两个结构相同但分配不同的输入
//! 必须得到各自独立的拷贝。

use std::collections::HashMap;

use klon_config::RegistryConfig;

use crate::core::value::Value;

/// 堆对象身份（Rc 分配地址）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjId(usize);

impl ObjId {
    /// 从值提取身份；立即值没有身份
    pub fn from_value(value: &Value) -> Option<ObjId> {
        value.heap_id().map(ObjId)
    }
}

/// 拷贝注册表
///
/// 条目在调用期间从不移除，整个表在调用结束时丢弃。
/// 这保证了同一子对象的多条引用路径（包括任意长度的间接环）
/// 在拷贝中收敛到同一个对象。
#[derive(Debug, Default)]
pub struct CopyRegistry {
    entries: HashMap<ObjId, Value>,
}

impl CopyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置的初始容量预分配
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.initial_capacity),
        }
    }

    /// 查找已生成的拷贝
    pub fn get(&self, original: &Value) -> Option<Value> {
        let id = ObjId::from_value(original)?;
        self.entries.get(&id).cloned()
    }

    /// 登记拷贝（必须在递归进入子值之前调用，这是打破环的关键）
    pub fn put(&mut self, original: &Value, copy: Value) {
        match ObjId::from_value(original) {
            Some(id) => {
                self.entries.insert(id, copy);
            }
            None => {
                // 立即值不应该到达这里
                debug_assert!(false, "registry was handed a value without heap identity");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空全部条目（顶层调用结束时使用）
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_heap_value() {
        let obj = Value::object();
        let alias = obj.clone();

        assert_eq!(ObjId::from_value(&obj), ObjId::from_value(&alias));
        assert!(ObjId::from_value(&Value::number(1.0)).is_none());
    }

    #[test]
    fn test_get_put_roundtrip() {
        let mut registry = CopyRegistry::new();
        let original = Value::object();
        let copy = Value::object();

        assert!(registry.get(&original).is_none());
        registry.put(&original, copy.clone());

        let hit = registry.get(&original).unwrap();
        assert!(hit.ptr_eq(&copy));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_originals_distinct_entries() {
        let mut registry = CopyRegistry::new();
        let a = Value::object();
        let b = Value::object();

        registry.put(&a, Value::str("copy of a"));
        registry.put(&b, Value::str("copy of b"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&a).unwrap().as_str(), Some("copy of a"));
        assert_eq!(registry.get(&b).unwrap().as_str(), Some("copy of b"));
    }

    #[test]
    fn test_aliases_share_entry() {
        let mut registry = CopyRegistry::new();
        let original = Value::array(vec![]);
        let alias = original.clone();

        registry.put(&original, Value::str("the copy"));
        assert_eq!(registry.get(&alias).unwrap().as_str(), Some("the copy"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut registry = CopyRegistry::with_config(&RegistryConfig::default());
        let obj = Value::object();
        registry.put(&obj, Value::Null);
        assert!(!registry.is_empty());

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get(&obj).is_none());
    }
}
