//! C4: expanding a tuple-returning expression into one retrieval per field.

use crate::error::RetrieveError;
use crate::single_shot;
use core_contracts::{PayloadBuilder, Requester};
use core_dialect::DialectSpec;
use core_events::TARGET_RETRIEVE_ROW;
use core_extract::Extractor;
use core_model::{Expression, ProjectedFields};
use core_session::Session;

/// `expandRow(expression, fields, row_index?)` per §4.4. Returns `None` when
/// the cancel flag is observed cleared mid-row; the caller (the worker pool
/// or the orchestrator for a non-indexed call) must not commit a partial
/// row in that case.
#[allow(clippy::too_many_arguments)]
pub fn expand_row(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
    fields: &ProjectedFields,
    row_index: Option<usize>,
) -> Result<Option<Vec<Option<String>>>, RetrieveError> {
    let rownum_embedded = fields.has_rownum_marker();
    let mut results = Vec::with_capacity(fields.fields.len());

    for field in &fields.fields {
        if field.starts_with("ROWNUM ") {
            continue;
        }

        let mut per_field_expression = expression.clone();
        if let Some(index) = row_index {
            per_field_expression =
                agent.limit_query(index, &per_field_expression, field, &fields.fields[0]);
        }
        let effective_expression = if rownum_embedded {
            per_field_expression
        } else {
            per_field_expression.replace_first(&fields.raw, field)
        };

        let outcome = single_shot::retrieve(
            session,
            dialect,
            extractor,
            requester,
            agent,
            &effective_expression,
            field,
        )?;

        if let Some(display_value) = outcome.value.as_deref() {
            session
                .operator_ui
                .emit_retrieval(outcome.resumed, display_value);
        }
        tracing::debug!(
            target: TARGET_RETRIEVE_ROW,
            row = ?row_index,
            field = %field,
            resumed = outcome.resumed,
            "field retrieved"
        );

        results.push(outcome.value);

        if !session.cancel_flag.is_continue() {
            return Ok(None);
        }
    }

    Ok(Some(results))
}
