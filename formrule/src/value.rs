//! 字段值转换与记录访问
//!
//! 所有字段值在验证前都会被转换为文本形式；缺失值（`None`、JSON `null`、
//! 不存在的键）保留为 `None`，与空字符串区分开。

use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// 可转换为字段文本值的类型
pub trait ToFieldValue {
    /// 返回文本形式，缺失时返回 `None`
    fn to_field_value(&self) -> Option<String>;
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ToFieldValue for char {
    fn to_field_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! impl_integer_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_integer_field_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> Option<String> {
        let text = if self.is_infinite() {
            format_number(f64::from(*self))
        } else {
            self.to_string()
        };
        Some(text)
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> Option<String> {
        Some(format_number(*self))
    }
}

/// 数值的文本形式
///
/// 与 JavaScript 的数字字符串一致：`-0` 写作 `0`，无穷大写作 `Infinity`，
/// 绝对值不小于 1e21 或小于 1e-6 时使用 `1e+21` 这样的指数形式。
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        };
    }

    value.to_string()
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> Option<String> {
        self.as_ref().and_then(ToFieldValue::to_field_value)
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> Option<String> {
        (**self).to_field_value()
    }
}

impl ToFieldValue for Value {
    fn to_field_value(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            Value::Number(n) => n.as_f64().map(format_number),
            // 嵌套结构不做解析，只保留其紧凑 JSON 文本
            other => Some(other.to_string()),
        }
    }
}

/// 按字段名读取值的数据记录
pub trait Record {
    /// 读取字段的文本值；字段不存在或为空值时返回 `None`
    fn field_value(&self, name: &str) -> Option<String>;
}

/// 字段集合在编译期已知的记录（通常由 `#[derive(Record)]` 生成）
pub trait Schema {
    /// 记录的全部字段名，按声明顺序
    fn field_names() -> &'static [&'static str];
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, name: &str) -> Option<String> {
        (**self).field_value(name)
    }
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToFieldValue,
    S: BuildHasher,
{
    fn field_value(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ToFieldValue::to_field_value)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: ToFieldValue,
{
    fn field_value(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ToFieldValue::to_field_value)
    }
}

impl<K, V, S> Record for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToFieldValue,
    S: BuildHasher,
{
    fn field_value(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ToFieldValue::to_field_value)
    }
}

impl Record for serde_json::Map<String, Value> {
    fn field_value(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ToFieldValue::to_field_value)
    }
}

/// 非对象的 JSON 值没有任何字段
impl Record for Value {
    fn field_value(&self, name: &str) -> Option<String> {
        self.as_object().and_then(|object| object.field_value(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(42i32.to_field_value().as_deref(), Some("42"));
        assert_eq!(1.5f64.to_field_value().as_deref(), Some("1.5"));
        assert_eq!(2.0f64.to_field_value().as_deref(), Some("2"));
        assert_eq!(true.to_field_value().as_deref(), Some("true"));
        assert_eq!(f64::INFINITY.to_field_value().as_deref(), Some("Infinity"));
        assert_eq!("".to_field_value().as_deref(), Some(""));
    }

    #[test]
    fn test_absent_is_not_empty() {
        assert_eq!(None::<String>.to_field_value(), None);
        assert_eq!(Some("").to_field_value().as_deref(), Some(""));
        assert_eq!(Value::Null.to_field_value(), None);
    }

    #[test]
    fn test_json_record() {
        let data = json!({ "name": "alice", "age": 30, "admin": false, "nick": null });

        assert_eq!(data.field_value("name").as_deref(), Some("alice"));
        assert_eq!(data.field_value("age").as_deref(), Some("30"));
        assert_eq!(data.field_value("admin").as_deref(), Some("false"));
        assert_eq!(data.field_value("nick"), None);
        assert_eq!(data.field_value("missing"), None);
        assert_eq!(json!([1, 2]).field_value("0"), None);
    }

    #[test]
    fn test_json_float_matches_native_float() {
        let data = json!({ "whole": 2.0, "half": 1.5, "big": 1e21, "id": u64::MAX });

        assert_eq!(data.field_value("whole").as_deref(), Some("2"));
        assert_eq!(data.field_value("whole"), 2.0f64.to_field_value());
        assert_eq!(data.field_value("half").as_deref(), Some("1.5"));
        assert_eq!(data.field_value("big").as_deref(), Some("1e+21"));
        assert_eq!(data.field_value("id"), Some(u64::MAX.to_string()));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e22), "-1.5e+22");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_map_records() {
        let mut hash: HashMap<&str, Option<i64>> = HashMap::new();
        hash.insert("count", Some(3));
        hash.insert("limit", None);
        assert_eq!(hash.field_value("count").as_deref(), Some("3"));
        assert_eq!(hash.field_value("limit"), None);

        let mut tree = BTreeMap::new();
        tree.insert("city".to_string(), "Paris".to_string());
        assert_eq!(tree.field_value("city").as_deref(), Some("Paris"));
    }
}
