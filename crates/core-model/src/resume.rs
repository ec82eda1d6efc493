/// One persisted `(expression_text -> final_value_string)` pair, as stored
/// in the `ResumeStore`. Only ever constructed for a successfully assembled
/// (non-null) value; nulls are never persisted (see `core-retrieve`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeEntry {
    pub expression: String,
    pub value: String,
}

impl ResumeEntry {
    pub fn new(expression: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            value: value.into(),
        }
    }
}
