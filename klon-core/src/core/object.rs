//! 堆对象定义 (Core 层)
//!
//! 纯类型定义，与 Value 形成循环依赖的解决方式：
//! - ObjXxx 中存储 Value 的地方直接使用 Value 类型
//! - 拷贝逻辑在 runtime/copy.rs 中实现，这里只提供结构和基础操作

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

// ==================== 原子对象 ====================

/// 符号对象 - 不透明的唯一令牌，身份即 Rc 指针
#[derive(Debug)]
pub struct ObjSymbol {
    /// 描述文本（仅用于显示，不参与身份）
    pub description: Option<String>,
}

impl ObjSymbol {
    pub fn new(description: Option<String>) -> Self {
        Self { description }
    }
}

/// 原生函数签名
pub type NativeFn = fn(&[Value]) -> Value;

/// 函数对象 - 可调用值，拷贝时按引用共享
#[derive(Debug)]
pub struct ObjFunction {
    pub name: String,
    pub arity: u8,
    pub func: NativeFn,
}

impl ObjFunction {
    pub fn new(name: impl Into<String>, arity: u8, func: NativeFn) -> Self {
        Self {
            name: name.into(),
            arity,
            func,
        }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

/// 挂起的异步句柄 - 表示进行中的操作，无法安全复制
#[derive(Debug)]
pub struct ObjPromise {
    /// 操作描述（仅用于显示）
    pub operation: String,
}

impl ObjPromise {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }
}

/// 外部资源句柄 - 打开的网络请求、宿主 OS 句柄等
#[derive(Debug)]
pub struct ObjResource {
    /// 资源描述符（如 "tcp://127.0.0.1:4000"）
    pub descriptor: String,
}

impl ObjResource {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
        }
    }
}

/// 错误对象 - 栈信息和身份比隔离更重要，按引用共享
#[derive(Debug)]
pub struct ObjError {
    /// 错误种类（如 "TypeError"）
    pub kind: String,
    pub message: String,
}

impl ObjError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

// ==================== 可重建对象 ====================

/// 日期对象 - 包装单个数值时间戳
#[derive(Debug, Clone, PartialEq)]
pub struct ObjDate {
    /// Unix 时间戳（毫秒）
    pub epoch_ms: f64,
}

impl ObjDate {
    pub fn new(epoch_ms: f64) -> Self {
        Self { epoch_ms }
    }

    pub fn time(&self) -> f64 {
        self.epoch_ms
    }

    pub fn set_time(&mut self, epoch_ms: f64) {
        self.epoch_ms = epoch_ms;
    }
}

/// 正则标志集
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegExpFlags {
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
}

impl RegExpFlags {
    /// 格式化为后缀形式（如 "gim"）
    pub fn to_suffix(self) -> String {
        let mut suffix = String::new();
        if self.global {
            suffix.push('g');
        }
        if self.ignore_case {
            suffix.push('i');
        }
        if self.multiline {
            suffix.push('m');
        }
        suffix
    }
}

/// 模式对象 - 源模式 + 标志集
#[derive(Debug, Clone, PartialEq)]
pub struct ObjRegExp {
    pub source: String,
    pub flags: RegExpFlags,
}

impl ObjRegExp {
    pub fn new(source: impl Into<String>, flags: RegExpFlags) -> Self {
        Self {
            source: source.into(),
            flags,
        }
    }
}

// ==================== 二进制缓冲区 ====================

/// 类型化数组的元素种类，决定固定字节宽度
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    I8,
    U8,
    U8Clamped,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ElementKind {
    /// 元素字节宽度
    pub const fn byte_width(self) -> usize {
        match self {
            ElementKind::I8 | ElementKind::U8 | ElementKind::U8Clamped => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 4,
            ElementKind::F64 => 8,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ElementKind::I8 => "i8",
            ElementKind::U8 => "u8",
            ElementKind::U8Clamped => "u8c",
            ElementKind::I16 => "i16",
            ElementKind::U16 => "u16",
            ElementKind::I32 => "i32",
            ElementKind::U32 => "u32",
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }
}

/// 类型化数值缓冲区 - 连续二进制存储，固定元素宽度
#[derive(Debug, Clone, PartialEq)]
pub struct ObjBuffer {
    pub kind: ElementKind,
    /// 原始字节（小端）
    pub data: Vec<u8>,
}

impl ObjBuffer {
    /// 创建零填充缓冲区（按元素个数）
    pub fn new(kind: ElementKind, len: usize) -> Self {
        Self {
            kind,
            data: vec![0; len * kind.byte_width()],
        }
    }

    /// 从已有字节创建（字节数必须是元素宽度的整数倍）
    pub fn from_bytes(kind: ElementKind, data: Vec<u8>) -> Self {
        debug_assert!(data.len() % kind.byte_width() == 0);
        Self { kind, data }
    }

    /// 元素个数
    pub fn len(&self) -> usize {
        self.data.len() / self.kind.byte_width()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// 读取元素（统一以 f64 表示）
    pub fn get(&self, index: usize) -> Option<f64> {
        let width = self.kind.byte_width();
        let start = index.checked_mul(width)?;
        let bytes = self.data.get(start..start + width)?;
        Some(match self.kind {
            ElementKind::I8 => bytes[0] as i8 as f64,
            ElementKind::U8 | ElementKind::U8Clamped => bytes[0] as f64,
            ElementKind::I16 => i16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            ElementKind::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            ElementKind::I32 => {
                i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
            }
            ElementKind::U32 => {
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
            }
            ElementKind::F32 => {
                f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
            }
            ElementKind::F64 => f64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
        })
    }

    /// 写入元素，越界返回 false
    pub fn set(&mut self, index: usize, value: f64) -> bool {
        let width = self.kind.byte_width();
        let start = match index.checked_mul(width) {
            Some(start) => start,
            None => return false,
        };
        if start + width > self.data.len() {
            return false;
        }
        let out = &mut self.data[start..start + width];
        match self.kind {
            ElementKind::I8 => out[0] = value as i8 as u8,
            ElementKind::U8 => out[0] = value as u8,
            ElementKind::U8Clamped => out[0] = value.clamp(0.0, 255.0).round() as u8,
            ElementKind::I16 => out.copy_from_slice(&(value as i16).to_le_bytes()),
            ElementKind::U16 => out.copy_from_slice(&(value as u16).to_le_bytes()),
            ElementKind::I32 => out.copy_from_slice(&(value as i32).to_le_bytes()),
            ElementKind::U32 => out.copy_from_slice(&(value as u32).to_le_bytes()),
            ElementKind::F32 => out.copy_from_slice(&(value as f32).to_le_bytes()),
            ElementKind::F64 => out.copy_from_slice(&value.to_le_bytes()),
        }
        true
    }
}

/// 无类型的可增长字节缓冲区 - 只按字节长度拷贝（切片语义）
#[derive(Debug, Clone, PartialEq)]
pub struct ObjArrayBuffer {
    pub data: Vec<u8>,
}

impl ObjArrayBuffer {
    pub fn new(byte_len: usize) -> Self {
        Self {
            data: vec![0; byte_len],
        }
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

// ==================== 属性表 ====================

/// 属性键 - 字符串键或符号键
#[derive(Debug, Clone)]
pub enum PropKey {
    Str(String),
    Symbol(Rc<ObjSymbol>),
}

/// 单个自有属性
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    /// 不可枚举的属性不参与拷贝
    pub enumerable: bool,
}

impl Property {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            enumerable: true,
        }
    }

    pub fn hidden(value: Value) -> Self {
        Self {
            value,
            enumerable: false,
        }
    }
}

/// 自有属性表：字符串键 + 符号键（符号按指针身份去重）
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    strings: HashMap<String, Property>,
    symbols: Vec<(Rc<ObjSymbol>, Property)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 定义字符串键属性（覆盖同名属性）
    pub fn define(&mut self, key: impl Into<String>, value: Value, enumerable: bool) {
        self.strings.insert(key.into(), Property { value, enumerable });
    }

    /// 定义符号键属性（按符号身份覆盖）
    pub fn define_symbol(&mut self, sym: Rc<ObjSymbol>, value: Value, enumerable: bool) {
        let prop = Property { value, enumerable };
        for entry in &mut self.symbols {
            if Rc::ptr_eq(&entry.0, &sym) {
                entry.1 = prop;
                return;
            }
        }
        self.symbols.push((sym, prop));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.strings.get(key).map(|p| &p.value)
    }

    pub fn get_property(&self, key: &str) -> Option<&Property> {
        self.strings.get(key)
    }

    pub fn get_symbol(&self, sym: &Rc<ObjSymbol>) -> Option<&Value> {
        self.symbols
            .iter()
            .find(|(key, _)| Rc::ptr_eq(key, sym))
            .map(|(_, p)| &p.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.strings.len() + self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.symbols.is_empty()
    }

    pub fn string_entries(&self) -> impl Iterator<Item = (&String, &Property)> {
        self.strings.iter()
    }

    pub fn symbol_entries(&self) -> impl Iterator<Item = &(Rc<ObjSymbol>, Property)> {
        self.symbols.iter()
    }

    /// 全部自有可枚举键（字符串键在前，符号键在后）
    pub fn own_keys(&self) -> Vec<PropKey> {
        let mut keys: Vec<PropKey> = self
            .strings
            .iter()
            .filter(|(_, prop)| prop.enumerable)
            .map(|(key, _)| PropKey::Str(key.clone()))
            .collect();
        keys.extend(
            self.symbols
                .iter()
                .filter(|(_, prop)| prop.enumerable)
                .map(|(sym, _)| PropKey::Symbol(Rc::clone(sym))),
        );
        keys
    }
}

// ==================== 有序序列 ====================

/// 数组对象 - 整数索引元素 + 非索引自有属性
#[derive(Debug, Default)]
pub struct ObjArray {
    pub elements: Vec<Value>,
    /// 非索引自有属性
    pub props: PropertyBag,
    frozen: bool,
    sealed: bool,
}

impl ObjArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn from_vec(elements: Vec<Value>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.elements.get(index).cloned()
    }

    /// 追加元素，冻结或密封后拒绝
    pub fn push(&mut self, value: Value) -> bool {
        if self.frozen || self.sealed {
            return false;
        }
        self.elements.push(value);
        true
    }

    /// 写入已有索引，冻结后拒绝
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        if self.frozen {
            return false;
        }
        match self.elements.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// 冻结蕴含密封
    pub fn is_sealed(&self) -> bool {
        self.sealed || self.frozen
    }
}

// ==================== 关联容器 ====================

/// 键值容器 - 键按 SameValueZero 比较（原始值按值，堆值按身份）
#[derive(Debug, Default)]
pub struct ObjMap {
    entries: Vec<(Value, Value)>,
}

impl ObjMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖
    pub fn set(&mut self, key: Value, value: Value) {
        for entry in &mut self.entries {
            if entry.0.same_value_zero(&key) {
                entry.1 = value;
                return;
            }
        }
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.same_value_zero(key))
            .map(|(_, v)| v)
    }

    pub fn has(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }
}

/// 唯一元素集合 - 成员按 SameValueZero 去重
#[derive(Debug, Default)]
pub struct ObjSet {
    items: Vec<Value>,
}

impl ObjSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入元素，已存在则忽略
    pub fn add(&mut self, value: Value) {
        if !self.has(&value) {
            self.items.push(value);
        }
    }

    pub fn has(&self, value: &Value) -> bool {
        self.items.iter().any(|item| item.same_value_zero(value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

// ==================== 普通/自定义对象 ====================

/// 类型描述符 - 自定义类型的身份，拷贝时共享同一实例
#[derive(Debug, PartialEq, Eq)]
pub struct ObjShape {
    pub name: String,
}

impl ObjShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 普通/自定义对象
///
/// 原型链接指向共享的祖先对象（拷贝时不克隆原型）；
/// `proto` 为 None 表示无原型对象。
#[derive(Debug, Default)]
pub struct ObjObject {
    /// 类型描述符（可选），拷贝共享同一 Rc
    pub shape: Option<Rc<ObjShape>>,
    /// 原型链接，拷贝共享同一实例
    pub proto: Option<Rc<RefCell<ObjObject>>>,
    pub props: PropertyBag,
    frozen: bool,
    sealed: bool,
}

impl ObjObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(shape: Rc<ObjShape>) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn with_proto(proto: Rc<RefCell<ObjObject>>) -> Self {
        Self {
            proto: Some(proto),
            ..Self::default()
        }
    }

    /// 写入字符串键属性，冻结后拒绝所有写入，密封后拒绝新键
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if self.frozen {
            return false;
        }
        if self.sealed && !self.props.contains(&key) {
            return false;
        }
        self.props.define(key, value, true);
        true
    }

    /// 写入符号键属性，冻结/密封规则同 set
    pub fn set_symbol(&mut self, sym: Rc<ObjSymbol>, value: Value) -> bool {
        if self.frozen {
            return false;
        }
        if self.sealed && self.props.get_symbol(&sym).is_none() {
            return false;
        }
        self.props.define_symbol(sym, value, true);
        true
    }

    /// 读取自有属性
    pub fn get(&self, key: &str) -> Option<Value> {
        self.props.get(key).cloned()
    }

    /// 读取属性，自有属性缺失时沿原型链查找
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.props.get(key).cloned().or_else(|| {
            self.proto
                .as_ref()
                .and_then(|proto| proto.borrow().lookup(key))
        })
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// 冻结蕴含密封
    pub fn is_sealed(&self) -> bool {
        self.sealed || self.frozen
    }
}

// ==================== 宿主节点 ====================

/// 外部结构化节点（类 DOM 树节点）
///
/// 宿主提供原生克隆设施时走深克隆，否则按原子值共享。
pub trait HostNode {
    /// 节点类型名（如 "div"）
    fn node_name(&self) -> &str;

    /// 宿主原生深克隆设施；不可用时返回 None
    fn clone_node_deep(&self) -> Option<Rc<dyn HostNode>>;

    /// 供宿主集成向下转型
    fn as_any(&self) -> &dyn std::any::Any;
}

/// 宿主节点集合 - 拷贝产生静态序列，逐节点独立克隆
#[derive(Default)]
pub struct ObjNodeList {
    pub nodes: Vec<Rc<dyn HostNode>>,
}

impl ObjNodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(nodes: Vec<Rc<dyn HostNode>>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rc<dyn HostNode>> {
        self.nodes.get(index).cloned()
    }
}

impl std::fmt::Debug for ObjNodeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjNodeList")
            .field("len", &self.nodes.len())
            .finish()
    }
}

// ==================== 测试 ====================
