//! 单字段验证器
//!
//! `FieldValidator` 持有一个字段的文本值和累积的错误信息。每个检查方法
//! 按值接收验证器并返回新的验证器，可以链式调用，也可以作为规则折叠：
//!
//! ```
//! use formrule::FieldValidator;
//!
//! let field = FieldValidator::new(Some("ab".to_string()))
//!     .is_required(None)
//!     .min_length(3, None);
//!
//! assert_eq!(field.errors(), ["This field min 3 characters"]);
//! ```
//!
//! 除 `is_required` 外，所有检查在字段未标记为必填且值缺失或为空字符串时
//! 直接跳过。

use crate::value::{format_number, ToFieldValue};
use once_cell::sync::Lazy;
use regex::Regex;

/// 宽松的邮箱格式：在值中任意位置查找 `local@domain`，
/// 不追求 RFC 5322 的完整性。带引号的本地部分只接受重复的字面量 `[\t -~]`
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?:[!#-'*+/-9=?A-Z\^-~\-]+(?:.[!#-'*+/-9=?A-Z\^-~\-]+)*",
        r#"|"(?:\[\t -~\])+")"#,
        r"@(?:[!#-'*+/-9=?A-Z\^-~\-]+(?:.[!#-'*+/-9=?A-Z\^-~\-]+)*",
        r"|[\[\t -Z\^-~]*\])",
    ))
    .expect("email pattern must compile")
});

/// 数值前缀：可选符号，后跟 `Infinity` 或带可选小数和指数的十进制数
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("numeric prefix pattern must compile")
});

const REQUIRED_MESSAGE: &str = "This field is Required";
const EMAIL_MESSAGE: &str = "This field must be in Email format";
const NUMERIC_MESSAGE: &str = "This field must be numeric";

/// 单字段验证器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidator {
    value: Option<String>,
    required: bool,
    errors: Vec<String>,
}

impl FieldValidator {
    /// 用已转换的文本值创建验证器，`None` 表示值缺失
    pub fn new(value: Option<String>) -> Self {
        Self {
            value,
            required: false,
            errors: Vec::new(),
        }
    }

    /// 从任意可转换的值创建验证器
    pub fn from_value<V: ToFieldValue + ?Sized>(value: &V) -> Self {
        Self::new(value.to_field_value())
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// 是否已被 `is_required` 标记为必填
    pub fn is_required_marked(&self) -> bool {
        self.required
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// 标记为必填；值缺失或为空字符串时失败
    pub fn is_required(mut self, custom_message: Option<&str>) -> Self {
        self.required = true;
        if self.is_blank() {
            self.fail(custom_message, || REQUIRED_MESSAGE.to_string())
        } else {
            self
        }
    }

    /// 验证最小长度（按字符计数，包含边界）
    pub fn min_length(self, min: usize, custom_message: Option<&str>) -> Self {
        let Some(len) = self.checked_text().map(|v| v.chars().count()) else {
            return self;
        };

        if len < min {
            self.fail(custom_message, || format!("This field min {} characters", min))
        } else {
            self
        }
    }

    /// 验证最大长度（按字符计数，包含边界）
    pub fn max_length(self, max: usize, custom_message: Option<&str>) -> Self {
        let Some(len) = self.checked_text().map(|v| v.chars().count()) else {
            return self;
        };

        if len > max {
            self.fail(custom_message, || format!("This field max {} characters", max))
        } else {
            self
        }
    }

    /// 验证邮箱格式
    pub fn email_only(self, custom_message: Option<&str>) -> Self {
        let Some(matches) = self.checked_text().map(|v| EMAIL_PATTERN.is_match(v)) else {
            return self;
        };

        if matches {
            self
        } else {
            self.fail(custom_message, || EMAIL_MESSAGE.to_string())
        }
    }

    /// 验证数值范围（包含边界）
    ///
    /// 无法解析为数值时总是记录 "This field must be numeric"，忽略自定义消息。
    pub fn range_numeric(self, min: f64, max: f64, custom_message: Option<&str>) -> Self {
        if self.skips() {
            return self;
        }

        let parsed = self.value.as_deref().and_then(parse_float_prefix);
        match parsed {
            None => self.fail(None, || NUMERIC_MESSAGE.to_string()),
            Some(numeric) if numeric < min || numeric > max => self.fail(custom_message, || {
                format!(
                    "This field must be between {} and {}",
                    format_number(min),
                    format_number(max)
                )
            }),
            Some(_) => self,
        }
    }

    /// 验证值属于给定的枚举集合
    pub fn one_of<S: AsRef<str>>(self, allowed: &[S], custom_message: Option<&str>) -> Self {
        if self.skips() {
            return self;
        }

        let found = self
            .value
            .as_deref()
            .is_some_and(|v| allowed.iter().any(|candidate| candidate.as_ref() == v));

        if found {
            self
        } else {
            self.fail(custom_message, || {
                let joined = allowed
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("This field must be one of {}", joined)
            })
        }
    }

    /// 追加一条错误信息，供自定义规则使用
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    fn is_blank(&self) -> bool {
        self.value.as_deref().map_or(true, str::is_empty)
    }

    /// 非必填且为空的字段跳过除 `is_required` 外的所有检查
    fn skips(&self) -> bool {
        !self.required && self.is_blank()
    }

    /// 长度与格式检查只作用于文本值
    fn checked_text(&self) -> Option<&str> {
        if self.skips() {
            return None;
        }
        self.value.as_deref()
    }

    fn fail(mut self, custom_message: Option<&str>, default: impl FnOnce() -> String) -> Self {
        let message = custom_message
            .map(|s| s.to_string())
            .unwrap_or_else(default);
        self.errors.push(message);
        self
    }
}

/// 解析字符串开头的浮点数，忽略前导空白（包括 U+FEFF）和数值后的多余字符
///
/// `"12kg"` 解析为 12，`"kg12"` 和 `""` 无法解析。
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let prefix = NUMERIC_PREFIX.find(trimmed)?.as_str();

    match prefix.trim_start_matches(['+', '-']) {
        "Infinity" if prefix.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => prefix.parse().ok(),
    }
}
