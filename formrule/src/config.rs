//! 规则声明文档
//!
//! 规则可以作为数据声明在 TOML 或 JSON 文档中，字段顺序与文档一致：
//!
//! ```toml
//! [fields]
//! name = [{ rule = "required" }, { rule = "min_length", min = 3 }]
//! age = [{ rule = "range_numeric", min = 0, max = 120, message = "bad age" }]
//! role = [{ rule = "enum", values = ["admin", "user"] }]
//! email = [{ rule = "email" }]
//! ```

use crate::error::Result;
use crate::rule::{self, Rule};
use crate::validator::Declarations;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单条规则的数据形式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleSpec {
    Required {
        message: Option<String>,
    },
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Email {
        message: Option<String>,
    },
    RangeNumeric {
        min: f64,
        max: f64,
        message: Option<String>,
    },
    #[serde(rename = "enum")]
    Enum {
        values: Vec<String>,
        message: Option<String>,
    },
}

impl RuleSpec {
    /// 构造对应的规则
    pub fn to_rule(&self) -> Rule {
        match self {
            RuleSpec::Required { message } => rule::is_required(message.as_deref()),
            RuleSpec::MinLength { min, message } => rule::min_length(*min, message.as_deref()),
            RuleSpec::MaxLength { max, message } => rule::max_length(*max, message.as_deref()),
            RuleSpec::Email { message } => rule::is_email_only(message.as_deref()),
            RuleSpec::RangeNumeric { min, max, message } => {
                rule::range_numeric(*min, *max, message.as_deref())
            }
            RuleSpec::Enum { values, message } => {
                rule::enum_value(values.iter().cloned(), message.as_deref())
            }
        }
    }
}

impl From<&RuleSpec> for Rule {
    fn from(spec: &RuleSpec) -> Self {
        spec.to_rule()
    }
}

/// 声明文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationDocument {
    #[serde(default)]
    pub fields: IndexMap<String, Vec<RuleSpec>>,
}

impl DeclarationDocument {
    pub fn to_declarations(&self) -> Declarations {
        self.fields
            .iter()
            .map(|(name, specs)| (name.clone(), specs.iter().map(Rule::from)))
            .collect()
    }
}

impl Declarations {
    /// 从 TOML 文档加载声明
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let document: DeclarationDocument = toml::from_str(content)?;
        tracing::debug!(fields = document.fields.len(), "Loaded TOML declarations");
        Ok(document.to_declarations())
    }

    /// 从 JSON 文档加载声明
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: DeclarationDocument = serde_json::from_str(content)?;
        tracing::debug!(fields = document.fields.len(), "Loaded JSON declarations");
        Ok(document.to_declarations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeclarationError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SIGNUP_TOML: &str = r#"
[fields]
name = [{ rule = "required" }, { rule = "min_length", min = 3 }]
age = [{ rule = "range_numeric", min = 0, max = 120, message = "bad age" }]
role = [{ rule = "enum", values = ["admin", "user"] }]
email = [{ rule = "email" }]
"#;

    #[test]
    fn test_parse_rule_specs() {
        let document: DeclarationDocument = toml::from_str(SIGNUP_TOML).unwrap();

        assert_eq!(
            document.fields.keys().collect::<Vec<_>>(),
            ["name", "age", "role", "email"]
        );
        assert_eq!(
            document.fields["age"],
            [RuleSpec::RangeNumeric {
                min: 0.0,
                max: 120.0,
                message: Some("bad age".to_string()),
            }]
        );
    }

    #[test]
    fn test_toml_declarations_validate() {
        let declarations = Declarations::from_toml_str(SIGNUP_TOML).unwrap();
        let report = declarations.validate(&json!({
            "name": "al",
            "age": 130,
            "role": "guest",
            "email": "",
        }));

        assert_eq!(
            serde_json::to_value(&report.errors).unwrap(),
            json!({
                "name": ["This field min 3 characters"],
                "age": ["bad age"],
                "role": ["This field must be one of admin,user"],
            })
        );
    }

    #[test]
    fn test_json_declarations() {
        let declarations = Declarations::from_json_str(
            r#"{ "fields": { "code": [
                { "rule": "max_length", "max": 4, "message": "too long" }
            ] } }"#,
        )
        .unwrap();

        assert_eq!(declarations.rules("code").map(<[Rule]>::len), Some(1));
        assert_eq!(
            declarations.validate(&json!({ "code": "ABCDE" })).field_errors("code"),
            Some(&["too long".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_rule_fails_to_load() {
        let err = Declarations::from_toml_str(r#"fields = { name = [{ rule = "uppercase" }] }"#)
            .unwrap_err();
        assert!(matches!(err, DeclarationError::Toml(_)));

        let err = Declarations::from_json_str(r#"{ "fields": { "name": [{}] } }"#).unwrap_err();
        assert!(matches!(err, DeclarationError::Json(_)));
    }

    #[test]
    fn test_empty_document() {
        assert!(Declarations::from_toml_str("").unwrap().is_empty());
    }
}
