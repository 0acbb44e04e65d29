use crate::error::{EtlError, Result};
use crate::reader::XlsxSheetReader;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use worklist_common::{Normalizer, DEFAULT_CUSTOMER_NAME};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `Customer` 列に書き込む顧客名
    pub customer_name: String,
    /// ヘッダー行の直後で読み飛ばす行数（単位行などがある場合）
    pub skip_rows_after_header: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            customer_name: DEFAULT_CUSTOMER_NAME.into(),
            skip_rows_after_header: 0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルが無ければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EtlError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home
            .join(".config")
            .join("worklist-combine")
            .join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(EtlError::Config("顧客名が空です".into()));
        }
        Ok(())
    }

    /// 設定に従ったシートリーダー（シート名は常に `Work List`）
    pub fn sheet_reader(&self) -> XlsxSheetReader {
        XlsxSheetReader::default().with_skip_rows_after_header(self.skip_rows_after_header)
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.customer_name.clone())
    }
}
