/// Columns projected by an expression, as derived by the `Agent`/
/// `PayloadBuilder` collaborator. `raw` is the substring of the original
/// expression spanning all projected columns (used for whole-span
/// substitution); `fields` is the same columns split into an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedFields {
    pub raw: String,
    pub fields: Vec<String>,
}

impl ProjectedFields {
    pub fn new(raw: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            raw: raw.into(),
            fields,
        }
    }

    /// True when any field is the literal dialect marker used by DBMS that
    /// embed row selection directly in the projection (e.g. Oracle's
    /// `ROWNUM`) rather than via a rewritable `LIMIT`/`TOP` clause.
    pub fn has_rownum_marker(&self) -> bool {
        self.fields.iter().any(|f| f == "ROWNUM")
    }
}
