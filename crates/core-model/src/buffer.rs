use std::sync::Mutex;

/// One row's worth of retrieved values, after the scalar-flattening rule
/// has been applied: a one-element row collapses to `Scalar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValue {
    Scalar(Option<String>),
    Row(Vec<Option<String>>),
}

impl RowValue {
    /// Applies the flattening rule (§4.4/§5): a single-field row is stored
    /// as its bare scalar rather than a one-element list.
    pub fn from_row(mut fields: Vec<Option<String>>) -> Self {
        if fields.len() == 1 {
            RowValue::Scalar(fields.pop().unwrap())
        } else {
            RowValue::Row(fields)
        }
    }
}

/// Append-only ordered container of per-row results. Order is *arrival*
/// order, not row order — callers needing row order must carry the row
/// index themselves and sort externally. Survives worker panics up to the
/// most recently committed element because each append is a single short
/// lock acquisition independent of any other worker's progress.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    items: Mutex<Vec<RowValue>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, row: Vec<Option<String>>) {
        let value = RowValue::from_row(row);
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(value);
    }

    pub fn snapshot(&self) -> Vec<RowValue> {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_row_flattens_to_scalar() {
        let buffer = OutputBuffer::new();
        buffer.push(vec![Some("x".into())]);
        assert_eq!(buffer.snapshot(), vec![RowValue::Scalar(Some("x".into()))]);
    }

    #[test]
    fn multi_field_row_stays_a_row() {
        let buffer = OutputBuffer::new();
        buffer.push(vec![Some("a".into()), Some("b".into())]);
        assert_eq!(
            buffer.snapshot(),
            vec![RowValue::Row(vec![Some("a".into()), Some("b".into())])]
        );
    }

    #[test]
    fn arrival_order_is_preserved_per_push() {
        let buffer = OutputBuffer::new();
        buffer.push(vec![Some("first".into())]);
        buffer.push(vec![Some("second".into())]);
        assert_eq!(buffer.len(), 2);
    }
}
