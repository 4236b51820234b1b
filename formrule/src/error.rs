use indexmap::IndexMap;
use thiserror::Error;

/// 规则声明错误
///
/// 只在构建或加载声明时出现，`create_validator` 本身从不失败。
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("Declared field '{field}' is not a field of the record")]
    UnknownField { field: String },

    #[error("Invalid TOML declarations: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON declarations: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeclarationError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }
}

/// 验证错误
///
/// 由 `ValidationReport::into_result` 产生，方便调用方直接使用 `?`。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field validation errors: {}", summary(.0))]
    FieldErrors(IndexMap<String, Vec<String>>),
}

impl ValidationError {
    /// 所有字段的错误信息
    pub fn field_errors(&self) -> &IndexMap<String, Vec<String>> {
        match self {
            Self::FieldErrors(errors) => errors,
        }
    }

    /// 单个字段的错误信息
    pub fn errors_for(&self, field: &str) -> Option<&[String]> {
        self.field_errors().get(field).map(Vec::as_slice)
    }
}

fn summary(errors: &IndexMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = DeclarationError> = std::result::Result<T, E>;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
