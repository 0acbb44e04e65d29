use super::{Prompter, RecoveryChoice, RecoveryPrompt};
use crate::error::{EtlError, Result};
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// dialoguer によるターミナル対話
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    /// フォルダパスを入力（空入力は未選択）
    fn ask_directory(&self, prompt: &str) -> Result<Option<PathBuf>> {
        loop {
            let input: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| EtlError::Prompt(e.to_string()))?;

            let trimmed = input.trim().trim_matches('"');
            if trimmed.is_empty() {
                return Ok(None);
            }

            let path = PathBuf::from(trimmed);
            if path.is_dir() {
                return Ok(Some(path));
            }

            eprintln!("⚠ フォルダが見つかりません: {}", path.display());
        }
    }

    fn ask_yes_no(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| EtlError::Prompt(e.to_string()))
    }
}

impl Prompter for TerminalPrompter {
    fn select_root_directory(&mut self) -> Result<Option<PathBuf>> {
        self.ask_directory("ルートフォルダ（空欄でスキップ）")
    }

    fn confirm_continue(&mut self) -> Result<bool> {
        self.ask_yes_no("他のフォルダも処理しますか？")
    }

    fn confirm_recovery(&mut self, prompt: &RecoveryPrompt) -> Result<RecoveryChoice> {
        println!("\n[{}]\n{}", prompt.title(), prompt.message());
        if self.ask_yes_no("OK")? {
            Ok(prompt.accept_choice())
        } else {
            Ok(RecoveryChoice::Abort)
        }
    }

    fn select_output_directory(&mut self) -> Result<Option<PathBuf>> {
        self.ask_directory("CSVの出力先フォルダ（空欄でキャンセル）")
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}
