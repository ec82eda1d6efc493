/// The operator-facing console (§6). Out of scope here: CLI argument
/// parsing and the actual logging sink destination; this trait names only
/// the two shapes of interaction the engine itself drives — a yes/no style
/// prompt, and the per-row resume/retrieved info line.
pub trait OperatorUi: Send + Sync {
    /// Prompts the operator with `prompt`, returning their answer or
    /// `default` verbatim if they enter nothing.
    fn read_input(&self, prompt: &str, default: &str) -> String;

    /// Emits `[HH:MM:SS] [INFO] (resumed|retrieved): <display_value>\r\n`
    /// for one successfully retrieved field.
    fn emit_retrieval(&self, resumed: bool, display_value: &str);
}
