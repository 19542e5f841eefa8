//! 输入文档转换
//!
//! 把 JSON 文档转换为值图。JSON 表达不了环、别名、日期等形态，
//! 那些场景由 `--showcase` 内置图演示。

use klon_api::{KlonError, Value};

/// JSON 解析错误（结构化，带位置）
#[derive(Debug, Clone)]
pub struct InputParseError {
    /// 1-based 行号
    pub line: usize,
    /// 1-based 列号
    pub column: usize,
    pub message: String,
}

impl From<InputParseError> for KlonError {
    fn from(e: InputParseError) -> Self {
        KlonError::Input(format!("line {} column {}: {}", e.line, e.column, e.message))
    }
}

/// 解析 JSON 文本并转换为值图
pub fn parse_document(text: &str) -> Result<Value, InputParseError> {
    let doc: serde_json::Value = serde_json::from_str(text).map_err(|e| InputParseError {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;
    Ok(from_json(&doc))
}

/// 递归转换 JSON 节点
fn from_json(doc: &serde_json::Value) -> Value {
    match doc {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::bool_from(*b),
        serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::str(s),
        serde_json::Value::Array(items) => Value::array(items.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            let value = Value::object();
            if let Some(rc) = value.as_object() {
                let mut obj = rc.borrow_mut();
                for (key, val) in map {
                    obj.set(key.clone(), from_json(val));
                }
            }
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert!(parse_document("null").unwrap().is_null());
        assert_eq!(parse_document("42").unwrap().as_number(), Some(42.0));
        assert_eq!(parse_document("\"hi\"").unwrap().as_str(), Some("hi"));
        assert_eq!(parse_document("true").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_parse_nested_document() {
        let value = parse_document(r#"{"foo": {"bar": "baz"}, "list": [1, 2]}"#).unwrap();
        let obj = value.as_object().unwrap().borrow();

        let foo = obj.get("foo").unwrap();
        let bar = foo.as_object().unwrap().borrow().get("bar").unwrap();
        assert_eq!(bar.as_str(), Some("baz"));

        let list = obj.get("list").unwrap();
        assert_eq!(list.as_array().unwrap().borrow().len(), 2);
    }

    #[test]
    fn test_parse_error_carries_location() {
        let err = parse_document("{\n  \"broken\": }").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.column > 0);

        let klon_err: KlonError = err.into();
        assert!(klon_err.to_string().contains("line 2"));
    }
}
