//! 验证规则
//!
//! 规则是 `FieldValidator -> FieldValidator` 的纯函数，参数和自定义消息在
//! 构造时捕获。同一个规则可以在多个字段、多次验证之间复用。

use crate::field::FieldValidator;
use std::fmt;
use std::sync::Arc;

type RuleFn = dyn Fn(FieldValidator) -> FieldValidator + Send + Sync;

/// 可复用的验证规则
#[derive(Clone)]
pub struct Rule {
    name: Arc<str>,
    check: Arc<RuleFn>,
}

impl Rule {
    /// 用自定义函数创建规则
    ///
    /// ```
    /// use formrule::{FieldValidator, Rule};
    ///
    /// let no_spaces = Rule::custom("no_spaces", |field: FieldValidator| {
    ///     if field.value().is_some_and(|v| v.contains(' ')) {
    ///         field.with_error("Spaces are not allowed")
    ///     } else {
    ///         field
    ///     }
    /// });
    ///
    /// let field = no_spaces.apply(FieldValidator::new(Some("a b".to_string())));
    /// assert_eq!(field.errors(), ["Spaces are not allowed"]);
    /// assert_eq!(no_spaces.name(), "no_spaces");
    /// ```
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(FieldValidator) -> FieldValidator + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 对字段执行规则
    pub fn apply(&self, field: FieldValidator) -> FieldValidator {
        (self.check)(field)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

fn owned(message: Option<&str>) -> Option<String> {
    message.map(str::to_string)
}

/// 必填
pub fn is_required(custom_message: Option<&str>) -> Rule {
    let message = owned(custom_message);
    Rule::custom("is_required", move |field: FieldValidator| {
        field.is_required(message.as_deref())
    })
}

/// 最小长度
pub fn min_length(min: usize, custom_message: Option<&str>) -> Rule {
    let message = owned(custom_message);
    Rule::custom("min_length", move |field: FieldValidator| {
        field.min_length(min, message.as_deref())
    })
}

/// 最大长度
pub fn max_length(max: usize, custom_message: Option<&str>) -> Rule {
    let message = owned(custom_message);
    Rule::custom("max_length", move |field: FieldValidator| {
        field.max_length(max, message.as_deref())
    })
}

/// 邮箱格式
pub fn is_email_only(custom_message: Option<&str>) -> Rule {
    let message = owned(custom_message);
    Rule::custom("email_only", move |field: FieldValidator| {
        field.email_only(message.as_deref())
    })
}

/// 数值范围，边界包含在内
pub fn range_numeric(
    min: impl Into<f64>,
    max: impl Into<f64>,
    custom_message: Option<&str>,
) -> Rule {
    let (min, max) = (min.into(), max.into());
    let message = owned(custom_message);
    Rule::custom("range_numeric", move |field: FieldValidator| {
        field.range_numeric(min, max, message.as_deref())
    })
}

/// 枚举值
pub fn enum_value<I, S>(allowed: I, custom_message: Option<&str>) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    let message = owned(custom_message);
    Rule::custom("enum_value", move |field: FieldValidator| {
        field.one_of(&allowed, message.as_deref())
    })
}
