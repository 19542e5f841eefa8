//! 内置演示图
//!
//! JSON 输入表达不了的形态在这里演示：环、别名、冻结/密封、
//! 类型化缓冲区、原子句柄与宿主节点。

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use klon_api::{copy_with_config, RunConfig, Value};
use klon_core::{ElementKind, HostNode, ObjShape, RegExpFlags};

/// 演示用宿主节点（带原生克隆设施）
struct CliNode {
    name: String,
    content: RefCell<String>,
}

impl CliNode {
    fn new(name: &str, content: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            content: RefCell::new(content.to_string()),
        })
    }
}

impl HostNode for CliNode {
    fn node_name(&self) -> &str {
        &self.name
    }

    fn clone_node_deep(&self) -> Option<Rc<dyn HostNode>> {
        Some(Rc::new(CliNode {
            name: self.name.clone(),
            content: RefCell::new(self.content.borrow().clone()),
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 运行全部演示
pub fn run(config: &RunConfig) {
    println!("[Klon Showcase]");
    println!("======================");
    nested_object(config);
    cycle(config);
    diamond(config);
    frozen(config);
    typed_buffer(config);
    constructed_kinds(config);
    atomic_handles(config);
    host_node(config);
    println!("======================");
    println!("✅ Showcase finished");
}

fn report(config: &RunConfig, name: &str, line: String, stats: klon_api::CopyStats) {
    if config.show_stats {
        println!("[{name}] {line} ({stats})");
    } else {
        println!("[{name}] {line}");
    }
}

fn nested_object(config: &RunConfig) {
    let input = Value::object();
    let inner = Value::object();
    inner
        .as_object()
        .unwrap()
        .borrow_mut()
        .set("bar", Value::str("baz"));
    input
        .as_object()
        .unwrap()
        .borrow_mut()
        .set("foo", inner.clone());

    let output = copy_with_config(&input, config);
    let copied_inner = output
        .value
        .as_object()
        .unwrap()
        .borrow()
        .get("foo")
        .unwrap();
    report(
        config,
        "nested",
        format!(
            "copy = {}, inner is fresh instance: {}",
            output.value,
            !copied_inner.ptr_eq(&inner)
        ),
        output.stats,
    );
}

fn cycle(config: &RunConfig) {
    let a = Value::object();
    let b = Value::object();
    a.as_object().unwrap().borrow_mut().set("a", b.clone());
    b.as_object().unwrap().borrow_mut().set("a", a.clone());

    let output = copy_with_config(&a, config);
    let through = output
        .value
        .as_object()
        .unwrap()
        .borrow()
        .get("a")
        .and_then(|v| v.as_object().map(|rc| rc.borrow().get("a")))
        .flatten()
        .unwrap();
    report(
        config,
        "cycle",
        format!("copy.a.a converges to copy: {}", through.ptr_eq(&output.value)),
        output.stats,
    );
}

fn diamond(config: &RunConfig) {
    let shared = Value::object();
    shared
        .as_object()
        .unwrap()
        .borrow_mut()
        .set("leaf", Value::str("shared"));
    let root = Value::array(vec![shared.clone(), shared]);

    let output = copy_with_config(&root, config);
    let arr = output.value.as_array().unwrap().borrow();
    report(
        config,
        "alias",
        format!(
            "both paths reach one copy: {}",
            arr.get(0).unwrap().ptr_eq(&arr.get(1).unwrap())
        ),
        output.stats,
    );
}

fn frozen(config: &RunConfig) {
    let input = Value::object();
    input
        .as_object()
        .unwrap()
        .borrow_mut()
        .set("k", Value::str("v"));
    input.as_object().unwrap().borrow_mut().freeze();

    let output = copy_with_config(&input, config);
    let frozen = output.value.as_object().unwrap().borrow().is_frozen();
    report(
        config,
        "frozen",
        format!("copy stays frozen: {frozen}"),
        output.stats,
    );
}

fn typed_buffer(config: &RunConfig) {
    let input = Value::buffer_from_bytes(ElementKind::U8, b"foobarbaz".to_vec());

    let output = copy_with_config(&input, config);
    output.value.as_buffer().unwrap().borrow_mut().set(1, 122.0);
    let original_untouched = input.as_buffer().unwrap().borrow().get(1) == Some(111.0);
    report(
        config,
        "buffer",
        format!(
            "independent storage after mutation: {original_untouched}"
        ),
        output.stats,
    );
}

fn constructed_kinds(config: &RunConfig) {
    let shape = Rc::new(ObjShape::new("Ticket"));
    let input = Value::object_with_shape(Rc::clone(&shape));
    {
        let mut obj = input.as_object().unwrap().borrow_mut();
        obj.set("created", Value::date(1234567890.0));
        obj.set(
            "pattern",
            Value::regexp(
                "^asdf",
                RegExpFlags {
                    global: true,
                    ignore_case: true,
                    multiline: false,
                },
            ),
        );
    }

    let output = copy_with_config(&input, config);
    let copy_obj = output.value.as_object().unwrap().borrow();
    let shape_shared = copy_obj
        .shape
        .as_ref()
        .map(|s| Rc::ptr_eq(s, &shape))
        .unwrap_or(false);
    report(
        config,
        "shape",
        format!("copy = {}, type identity shared: {shape_shared}", output.value),
        output.stats,
    );
}

fn atomic_handles(config: &RunConfig) {
    fn add(args: &[Value]) -> Value {
        let a = args.first().and_then(Value::as_number).unwrap_or(0.0);
        let b = args.get(1).and_then(Value::as_number).unwrap_or(0.0);
        Value::number(a + b)
    }

    let input = Value::array(vec![
        Value::function("add", 2, add),
        Value::promise("pending fetch"),
        Value::resource("tcp://127.0.0.1:4000"),
        Value::error("TypeError", "foo"),
    ]);

    let output = copy_with_config(&input, config);
    let (input_arr, copy_arr) = (
        input.as_array().unwrap().borrow(),
        output.value.as_array().unwrap().borrow(),
    );
    let all_shared = input_arr
        .elements
        .iter()
        .zip(copy_arr.elements.iter())
        .all(|(a, b)| a.ptr_eq(b));
    report(
        config,
        "atomic",
        format!("handles shared by reference: {all_shared}"),
        output.stats,
    );
}

fn host_node(config: &RunConfig) {
    let node = CliNode::new("div", "asdf");
    let input = Value::node(node.clone());

    let output = copy_with_config(&input, config);
    let copy_node = output.value.as_node().unwrap();
    if let Some(cli_node) = copy_node.as_any().downcast_ref::<CliNode>() {
        *cli_node.content.borrow_mut() = "bar".to_string();
    }
    let original_untouched = *node.content.borrow() == "asdf";
    report(
        config,
        "node",
        format!("host clone is independent: {original_untouched}"),
        output.stats,
    );
}
