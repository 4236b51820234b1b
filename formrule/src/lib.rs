//! formrule - 声明式字段验证
//!
//! 为记录的每个字段声明一组有序的规则，验证后得到整体结果以及
//! 字段名到错误信息列表的映射。
//!
//! ```
//! use formrule::prelude::*;
//! use serde_json::json;
//!
//! let declarations = Declarations::new()
//!     .field("name", [is_required(None)])
//!     .field("age", [range_numeric(0, 120, None)]);
//!
//! let report = create_validator(&json!({ "name": "", "age": "200" }), &declarations);
//!
//! assert!(!report.valid);
//! assert_eq!(report.errors["name"], ["This field is Required"]);
//! assert_eq!(report.errors["age"], ["This field must be between 0 and 120"]);
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod rule;
pub mod validator;
pub mod value;

pub use config::{DeclarationDocument, RuleSpec};
pub use error::*;
pub use field::{parse_float_prefix, FieldValidator};
pub use rule::*;
pub use validator::{create_validator, Declarations, ValidationReport};
pub use value::{Record, Schema, ToFieldValue};

// 重新导出宏
#[cfg(feature = "derive")]
pub use formrule_macros::Record;

pub mod prelude {
    pub use crate::field::FieldValidator;
    pub use crate::rule::{
        enum_value, is_email_only, is_required, max_length, min_length, range_numeric, Rule,
    };
    pub use crate::validator::{create_validator, Declarations, ValidationReport};
    pub use crate::value::{Record, Schema};

    #[cfg(feature = "derive")]
    pub use formrule_macros::Record;
}
