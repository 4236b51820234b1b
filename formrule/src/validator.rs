//! 对象验证
//!
//! `Declarations` 描述每个字段要执行的规则（按声明顺序），
//! `create_validator` 对一条记录执行这些规则并汇总为 `ValidationReport`。

use crate::error::{DeclarationError, Result, ValidationError, ValidationResult};
use crate::field::FieldValidator;
use crate::rule::Rule;
use crate::value::{Record, Schema};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 规则声明：字段名 -> 按顺序执行的规则
///
/// 字段按首次声明的顺序保存；重复声明同一字段会原地替换其规则。
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    fields: IndexMap<String, Vec<Rule>>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明字段的规则（构建器风格）
    pub fn field<I>(mut self, name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.insert(name, rules);
        self
    }

    /// 声明字段的规则
    pub fn insert<I>(&mut self, name: impl Into<String>, rules: I)
    where
        I: IntoIterator<Item = Rule>,
    {
        self.fields.insert(name.into(), rules.into_iter().collect());
    }

    pub fn rules(&self, name: &str) -> Option<&[Rule]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 检查所有声明的字段都在给定的字段列表中
    pub fn ensure_fields<S: AsRef<str>>(&self, known: &[S]) -> Result<()> {
        match self
            .field_names()
            .find(|declared| !known.iter().any(|k| k.as_ref() == *declared))
        {
            Some(unknown) => Err(DeclarationError::unknown_field(unknown)),
            None => Ok(()),
        }
    }

    /// 针对已知结构的记录检查声明
    pub fn for_schema<T: Schema>(self) -> Result<Self> {
        self.ensure_fields(T::field_names())?;
        Ok(self)
    }

    /// 对记录执行验证，等同于 `create_validator(data, self)`
    pub fn validate<R: Record + ?Sized>(&self, data: &R) -> ValidationReport {
        create_validator(data, self)
    }
}

impl<N, I> FromIterator<(N, I)> for Declarations
where
    N: Into<String>,
    I: IntoIterator<Item = Rule>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut declarations = Self::new();
        for (name, rules) in iter {
            declarations.insert(name, rules);
        }
        declarations
    }
}

/// 验证结果
///
/// `errors` 只包含至少有一条错误的字段，顺序与声明顺序一致。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// 转换为 `Result`，失败时携带全部字段错误
    pub fn into_result(self) -> ValidationResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(self.errors))
        }
    }
}

/// 按声明验证记录
///
/// 每个声明字段创建一个新的 `FieldValidator`，依次执行其规则。记录中缺失的
/// 字段视为值缺失；记录中未声明的字段不参与验证。
pub fn create_validator<R: Record + ?Sized>(
    data: &R,
    declarations: &Declarations,
) -> ValidationReport {
    let mut errors = IndexMap::new();

    for (name, rules) in declarations.iter() {
        let field = rules.iter().fold(
            FieldValidator::new(data.field_value(name)),
            |field, rule| {
                let before = field.errors().len();
                let field = rule.apply(field);
                if field.errors().len() > before {
                    tracing::trace!(field = name, rule = rule.name(), "Rule rejected value");
                }
                field
            },
        );

        if !field.is_valid() {
            errors.insert(name.to_string(), field.into_errors());
        }
    }

    tracing::debug!(
        fields = declarations.len(),
        failed = errors.len(),
        "Record validated"
    );

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
