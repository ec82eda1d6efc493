/// Transient per-scalar-retrieval state threaded through `ChunkReassembler`.
///
/// `offset` is 1-based, per the DBMS `SUBSTRING(col, offset, length)`
/// convention. `accumulator` is `None` until the first chunk response
/// arrives, so a chunking DBMS that returns no data on the first request is
/// distinguishable from one that returns an empty string.
#[derive(Debug, Clone, Default)]
pub struct ChunkState {
    pub offset: usize,
    pub chunk_length: Option<usize>,
    pub accumulator: Option<String>,
}

impl ChunkState {
    pub fn new(chunk_length: Option<usize>) -> Self {
        Self {
            offset: 1,
            chunk_length,
            accumulator: None,
        }
    }

    /// Folds one chunk response into the accumulator and reports whether
    /// the reassembly loop should terminate.
    ///
    /// On the first chunk the accumulator is *assigned* `output` (so a null
    /// first chunk stays null); on later chunks a null output is folded in
    /// as an empty string, since by then a non-null prefix has already been
    /// observed and the distinct-null case no longer applies.
    pub fn fold(&mut self, output: Option<String>) -> bool {
        let Some(chunk_length) = self.chunk_length else {
            self.accumulator = output;
            return true;
        };

        let done = match &output {
            None => true,
            Some(s) => s.chars().count() < chunk_length,
        };

        if self.offset == 1 {
            self.accumulator = output;
        } else {
            let mut acc = self.accumulator.take().unwrap_or_default();
            acc.push_str(output.as_deref().unwrap_or(""));
            self.accumulator = Some(acc);
        }

        if !done {
            self.offset += chunk_length;
        }
        done
    }
}
