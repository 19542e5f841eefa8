//! 拷贝分派器
//!
//! 递归引擎：对每个值先查注册表（环短路），再分类，
//! 分配正确种类的空壳，在递归进入子值**之前**登记空壳（支持环），
//! 最后填充。冻结/密封状态严格在填充完成后施加。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use klon_config::{EngineConfig, RegistryConfig};
use klon_log::{error, Logger};

use crate::core::error::InternalError;
use crate::core::object::{
    ObjArray, ObjArrayBuffer, ObjBuffer, ObjMap, ObjNodeList, ObjObject, ObjRegExp, ObjSet,
    PropertyBag,
};
use crate::core::value::Value;
use crate::runtime::classify::{classify, CopyPolicy, TypeTag};
use crate::runtime::registry::CopyRegistry;

/// 单次顶层拷贝的运行统计
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// 访问的值总数
    pub values_visited: usize,
    /// 分配的空壳数
    pub shells_allocated: usize,
    /// 注册表命中数（别名/环收敛）
    pub registry_hits: usize,
    /// 按引用共享的原子值数
    pub atoms_shared: usize,
    /// 拷贝的缓冲区字节数
    pub bytes_copied: usize,
}

impl fmt::Display for CopyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "visited={} shells={} hits={} atoms={} bytes={}",
            self.values_visited,
            self.shells_allocated,
            self.registry_hits,
            self.atoms_shared,
            self.bytes_copied
        )
    }
}

/// 拷贝引擎
///
/// 注册表每次顶层调用新建、返回前丢弃；统计信息按调用重置。
/// 单线程同步递归，无阻塞、无让出。
pub struct CopyEngine {
    registry: CopyRegistry,
    stats: CopyStats,
    logger: Arc<Logger>,
    config: EngineConfig,
    registry_config: RegistryConfig,
}

impl CopyEngine {
    /// 默认配置 + 静默日志
    pub fn new() -> Self {
        Self::with_config(
            EngineConfig::default(),
            RegistryConfig::default(),
            Logger::noop(),
        )
    }

    pub fn with_config(
        config: EngineConfig,
        registry_config: RegistryConfig,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            registry: CopyRegistry::with_config(&registry_config),
            stats: CopyStats::default(),
            logger,
            config,
            registry_config,
        }
    }

    /// 顶层拷贝操作
    ///
    /// 对输入无副作用；返回后引擎不再持有任何对结果的引用。
    pub fn copy(&mut self, value: &Value) -> Value {
        self.stats = CopyStats::default();
        self.registry = CopyRegistry::with_config(&self.registry_config);

        klon_log::debug!(self.logger, "copy started");
        let result = self.copy_value(value);
        klon_log::debug!(self.logger, "copy finished: {}", self.stats);

        // 注册表不跨调用存活
        self.registry.clear();
        result
    }

    /// 上一次顶层拷贝的统计
    pub fn stats(&self) -> &CopyStats {
        &self.stats
    }

    // ==================== 递归分派 ====================

    fn copy_value(&mut self, value: &Value) -> Value {
        self.stats.values_visited += 1;
        let tag = classify(value);
        match tag.policy() {
            CopyPolicy::ByValue => value.clone(),
            CopyPolicy::ByReference => {
                self.stats.atoms_shared += 1;
                value.clone()
            }
            CopyPolicy::Reconstruct => self.copy_composite(value, tag),
        }
    }

    fn copy_composite(&mut self, value: &Value, tag: TypeTag) -> Value {
        if let Some(hit) = self.registry.get(value) {
            self.stats.registry_hits += 1;
            #[cfg(feature = "trace_copy")]
            klon_log::trace!(self.logger, "registry hit for {}", tag.as_str());
            return hit;
        }

        #[cfg(feature = "trace_copy")]
        klon_log::trace!(self.logger, "reconstruct {}", tag.as_str());

        match (tag, value) {
            (TypeTag::Date, Value::Date(cell)) => {
                let copy = Value::date(cell.borrow().epoch_ms);
                self.register_shell(value, copy)
            }
            (TypeTag::RegExp, Value::RegExp(rc)) => {
                let copy = Value::RegExp(Rc::new(ObjRegExp::new(rc.source.clone(), rc.flags)));
                self.register_shell(value, copy)
            }
            (TypeTag::Buffer, Value::Buffer(cell)) => {
                let src = cell.borrow();
                self.stats.bytes_copied += src.data.len();
                let copy = Value::Buffer(Rc::new(RefCell::new(ObjBuffer::from_bytes(
                    src.kind,
                    src.data.clone(),
                ))));
                drop(src);
                self.register_shell(value, copy)
            }
            (TypeTag::ArrayBuffer, Value::ArrayBuffer(cell)) => {
                let src = cell.borrow();
                self.stats.bytes_copied += src.data.len();
                let copy = Value::ArrayBuffer(Rc::new(RefCell::new(ObjArrayBuffer::from_bytes(
                    src.data.clone(),
                ))));
                drop(src);
                self.register_shell(value, copy)
            }
            (TypeTag::Array, Value::Array(cell)) => self.copy_array(value, cell),
            (TypeTag::Map, Value::Map(cell)) => self.copy_map(value, cell),
            (TypeTag::Set, Value::Set(cell)) => self.copy_set(value, cell),
            (TypeTag::Object, Value::Object(cell)) => self.copy_object(value, cell),
            (TypeTag::Node, Value::Node(rc)) => match rc.clone_node_deep() {
                Some(cloned) => self.register_shell(value, Value::Node(cloned)),
                None => {
                    // 无克隆设施的宿主节点保持引用共享
                    self.stats.atoms_shared += 1;
                    value.clone()
                }
            },
            (TypeTag::NodeList, Value::NodeList(cell)) => {
                let src = cell.borrow();
                let mut nodes = Vec::with_capacity(src.nodes.len());
                for node in &src.nodes {
                    nodes.push(node.clone_node_deep().unwrap_or_else(|| Rc::clone(node)));
                }
                drop(src);
                let copy = Value::NodeList(Rc::new(RefCell::new(ObjNodeList::from_vec(nodes))));
                self.register_shell(value, copy)
            }
            // 防御性默认分支：按值/按引用的 tag 到达重建路径属于编程缺陷
            _ => self.defect(value, tag),
        }
    }

    // ==================== 逐类重建 ====================

    fn copy_array(&mut self, original: &Value, cell: &Rc<RefCell<ObjArray>>) -> Value {
        let src = cell.borrow();
        let shell = Rc::new(RefCell::new(ObjArray::with_capacity(src.elements.len())));
        let copy = Value::Array(Rc::clone(&shell));
        self.registry.put(original, copy.clone());
        self.stats.shells_allocated += 1;

        for element in &src.elements {
            let copied = self.copy_value(element);
            shell.borrow_mut().elements.push(copied);
        }

        // 非索引自有属性
        let bag = self.copy_bag(&src.props);
        shell.borrow_mut().props = bag;

        // 不可变状态严格在填充之后施加
        if src.is_frozen() {
            shell.borrow_mut().freeze();
        } else if src.is_sealed() {
            shell.borrow_mut().seal();
        }
        copy
    }

    fn copy_map(&mut self, original: &Value, cell: &Rc<RefCell<ObjMap>>) -> Value {
        let src = cell.borrow();
        let shell = Rc::new(RefCell::new(ObjMap::new()));
        let copy = Value::Map(Rc::clone(&shell));
        self.registry.put(original, copy.clone());
        self.stats.shells_allocated += 1;

        for (key, val) in src.entries() {
            let copied_key = self.copy_value(key);
            let copied_val = self.copy_value(val);
            shell.borrow_mut().set(copied_key, copied_val);
        }
        copy
    }

    fn copy_set(&mut self, original: &Value, cell: &Rc<RefCell<ObjSet>>) -> Value {
        let src = cell.borrow();
        let shell = Rc::new(RefCell::new(ObjSet::new()));
        let copy = Value::Set(Rc::clone(&shell));
        self.registry.put(original, copy.clone());
        self.stats.shells_allocated += 1;

        for item in src.iter() {
            let copied = self.copy_value(item);
            shell.borrow_mut().add(copied);
        }
        copy
    }

    fn copy_object(&mut self, original: &Value, cell: &Rc<RefCell<ObjObject>>) -> Value {
        let src = cell.borrow();
        let mut shell_obj = ObjObject::new();
        // 类型描述符与原型链接共享原实例，不克隆
        shell_obj.shape = src.shape.clone();
        shell_obj.proto = src.proto.clone();

        let shell = Rc::new(RefCell::new(shell_obj));
        let copy = Value::Object(Rc::clone(&shell));
        self.registry.put(original, copy.clone());
        self.stats.shells_allocated += 1;

        let bag = self.copy_bag(&src.props);
        shell.borrow_mut().props = bag;

        if src.is_frozen() {
            shell.borrow_mut().freeze();
        } else if src.is_sealed() {
            shell.borrow_mut().seal();
        }
        copy
    }

    /// 拷贝自有可枚举属性（字符串键与符号键），保留枚举标志
    fn copy_bag(&mut self, src: &PropertyBag) -> PropertyBag {
        let mut dst = PropertyBag::new();
        for (key, prop) in src.string_entries() {
            if !prop.enumerable {
                continue;
            }
            let copied = self.copy_value(&prop.value);
            dst.define(key.clone(), copied, true);
        }
        for (sym, prop) in src.symbol_entries() {
            if !prop.enumerable {
                continue;
            }
            let copied = self.copy_value(&prop.value);
            dst.define_symbol(Rc::clone(sym), copied, true);
        }
        dst
    }

    /// 登记无子值的重建结果并计数
    fn register_shell(&mut self, original: &Value, copy: Value) -> Value {
        self.registry.put(original, copy.clone());
        self.stats.shells_allocated += 1;
        copy
    }

    /// 缺陷处理：Dev 配置致命，Release 配置降级为原子引用拷贝
    fn defect(&mut self, value: &Value, tag: TypeTag) -> Value {
        let err = InternalError::PolicyMismatch { tag: tag.as_str() };
        error!(self.logger, "{err}");
        debug_assert!(false, "{err}");
        if self.config.strict_defects {
            panic!("{err}");
        }
        self.stats.atoms_shared += 1;
        value.clone()
    }
}

impl Default for CopyEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== 测试 ====================
