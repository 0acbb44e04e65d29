use super::{Prompter, RecoveryChoice, RecoveryPrompt};
use crate::error::Result;
use std::collections::VecDeque;
use std::path::PathBuf;

/// 事前に決めた回答を返す Prompter
///
/// - フォルダ選択: 登録順に返す（`declined_directory` は未選択）
/// - 継続確認: 未使用のフォルダ回答が残っていれば「はい」
/// - 再試行/中止: 登録した OK(true) / キャンセル(false) を順に使い、
///   尽きたら `recovery_fallback`（デフォルトは中止）
/// - メッセージと再試行/中止の問い合わせは記録する
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    directories: VecDeque<Option<PathBuf>>,
    recovery_answers: VecDeque<bool>,
    recovery_fallback: RecoveryChoice,
    output_directory: Option<PathBuf>,
    messages: Vec<String>,
    recovery_prompts: Vec<RecoveryPrompt>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.push_back(Some(path.into()));
        self
    }

    pub fn declined_directory(mut self) -> Self {
        self.directories.push_back(None);
        self
    }

    pub fn recovery_answer(mut self, keep_going: bool) -> Self {
        self.recovery_answers.push_back(keep_going);
        self
    }

    pub fn recovery_fallback(mut self, choice: RecoveryChoice) -> Self {
        self.recovery_fallback = choice;
        self
    }

    pub fn output_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(path.into());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn recovery_prompts(&self) -> &[RecoveryPrompt] {
        &self.recovery_prompts
    }

    /// 指定文字列を含むメッセージがあるか
    pub fn has_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl Prompter for ScriptedPrompter {
    fn select_root_directory(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.directories.pop_front().flatten())
    }

    fn confirm_continue(&mut self) -> Result<bool> {
        Ok(!self.directories.is_empty())
    }

    fn confirm_recovery(&mut self, prompt: &RecoveryPrompt) -> Result<RecoveryChoice> {
        self.recovery_prompts.push(prompt.clone());
        let choice = match self.recovery_answers.pop_front() {
            Some(true) => prompt.accept_choice(),
            Some(false) => RecoveryChoice::Abort,
            None => self.recovery_fallback,
        };
        Ok(choice)
    }

    fn select_output_directory(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.output_directory.clone())
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
        self.messages.push(message.to_string());
    }
}
