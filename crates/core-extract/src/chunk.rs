//! C2: per-DBMS chunked reassembly of one scalar.

use crate::error::ExtractError;
use crate::marker::Extractor;
use core_contracts::{PayloadBuilder, Requester};
use core_dialect::DialectSpec;
use core_events::TARGET_EXTRACT_CHUNK;
use core_model::{ChunkState, Expression, RetrievalResult};
use core_session::Session;

/// Retrieves one scalar value end to end: builds the per-chunk payload,
/// issues the request, extracts the marker-wrapped result, folds it into the
/// running accumulator, and repeats until `ChunkState` says to stop. Once
/// assembled, hex-decodes (if configured), HTML-unescapes, and restores the
/// safe-character placeholders.
///
/// `field` is the single raw column occurring in `expression` that this call
/// narrows down to — the caller (`core-retrieve`) has already rewritten
/// `expression` to project just this one field.
#[allow(clippy::too_many_arguments)]
pub fn retrieve_scalar(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
    field: &str,
) -> Result<RetrievalResult, ExtractError> {
    let vector = agent.injection_vector();
    let mut state = ChunkState::new(dialect.chunk_length);

    loop {
        let casted = agent.null_and_cast_field(field);
        let wrapped = match dialect.chunk_length {
            Some(length) => dialect
                .format_substring(&casted, state.offset, length)
                .unwrap_or_else(|| casted.clone()),
            None => casted,
        };

        let injected = expression.replace_first(field, &wrapped);
        let marked = format!(
            "{}{}{}",
            session.markers.start,
            injected.as_str(),
            session.markers.stop
        );
        let query = agent.suffix_query(format!("{}{marked}", agent.prefix_query(&vector)));
        let unescaped = agent.unescape(&query);
        let payload = agent.payload(unescaped);

        let page = requester.query_page(&payload, true)?;
        session.counters.increment_error();

        let output = extractor.extract(&page);
        tracing::trace!(
            target: TARGET_EXTRACT_CHUNK,
            offset = state.offset,
            found = output.is_some(),
            "chunk request completed"
        );

        if state.fold(output) {
            break;
        }
    }

    Ok(state.accumulator.map(|raw| finish(&raw, session)))
}

fn finish(raw: &str, session: &Session) -> String {
    let decoded = if session.config.hex_convert {
        hex::decode(raw)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_else(|| raw.to_string())
    } else {
        raw.to_string()
    };
    let unescaped = html_escape::decode_html_entities(&decoded).replace("<br>", "\n");
    crate::restore::restore_chars(&unescaped, &session.safe_chars)
}
