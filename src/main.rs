use clap::Parser;
use std::path::{Path, PathBuf};
use worklist_combine::{cli, config, error, prompt, reader, scanner, session};
use cli::{Cli, Commands, OnError};
use config::Config;
use error::Result;
use prompt::{Prompter, RecoveryChoice, ScriptedPrompter, TerminalPrompter};
use reader::{SheetReader, DEFAULT_SHEET_NAME};
use scanner::Aggregator;
use session::{Session, SessionOutcome};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let command = cli.command.unwrap_or(Commands::Combine {
        dirs: Vec::new(),
        output: None,
        on_error: OnError::default(),
        customer: None,
    });

    match command {
        Commands::Combine { dirs, output, on_error, customer } => {
            let mut config = config;
            if let Some(customer) = customer {
                config.customer_name = customer;
            }

            println!("📊 worklist-combine - Work List集約\n");
            if cli.verbose {
                println!("  シート: {}", DEFAULT_SHEET_NAME);
                println!("  顧客名: {}", config.customer_name);
                println!("  ヘッダー後の読み飛ばし: {}行\n", config.skip_rows_after_header);
            }

            let outcome = if dirs.is_empty() {
                let mut prompter = TerminalPrompter::new();
                run_session(&config, &mut prompter, cli.verbose)?
            } else {
                let mut prompter = batch_prompter(&dirs, output.as_deref(), on_error);
                run_session(&config, &mut prompter, cli.verbose)?
            };

            if let SessionOutcome::Exported { rows, .. } = outcome {
                println!("\n✅ 完了（{}行）", rows);
            }
        }

        Commands::Config { set_customer, set_skip_rows, show } => {
            let mut config = config;
            let changed = set_customer.is_some() || set_skip_rows.is_some();

            if let Some(customer) = set_customer {
                config.customer_name = customer;
            }
            if let Some(rows) = set_skip_rows {
                config.skip_rows_after_header = rows;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  シート名: {}", DEFAULT_SHEET_NAME);
                println!("  顧客名: {}", config.customer_name);
                println!("  ヘッダー後の読み飛ばし: {}行", config.skip_rows_after_header);
            }
        }

        Commands::Inspect { file } => {
            inspect_file(&config, &file)?;
        }
    }

    Ok(())
}

fn run_session(config: &Config, prompter: &mut dyn Prompter, verbose: bool) -> Result<SessionOutcome> {
    let sheet_reader = config.sheet_reader();
    let normalizer = config.normalizer();
    let aggregator = Aggregator::new(&sheet_reader, &normalizer).verbose(verbose);

    let mut session = Session::new(aggregator, prompter);
    session.run()
}

/// 非対話モード: 指定フォルダを順に処理して出力先へ書き出す
fn batch_prompter(dirs: &[PathBuf], output: Option<&Path>, on_error: OnError) -> ScriptedPrompter {
    let fallback = match on_error {
        OnError::Skip => RecoveryChoice::Skip,
        OnError::Abort => RecoveryChoice::Abort,
    };

    dirs.iter()
        .fold(ScriptedPrompter::new(), |prompter, dir| prompter.directory(dir))
        .recovery_fallback(fallback)
        .output_directory(output.unwrap_or_else(|| Path::new(".")))
}

fn inspect_file(config: &Config, file: &Path) -> Result<()> {
    let sheet_reader = config.sheet_reader();
    let raw = sheet_reader.read(file)?;

    println!("📄 {} [{}]", file.display(), sheet_reader.sheet_name());
    println!("  列数: {}", raw.width());
    for (index, column) in raw.columns().iter().enumerate() {
        println!("  {:>3}: {}", index, column);
    }
    println!("  データ行: {}", raw.len());

    match config.normalizer().normalize(raw) {
        Ok(cleaned) => {
            println!("  有効行: {}", cleaned.len());
            println!("  出力列: {}", cleaned.columns().join(", "));
        }
        Err(err) => println!("⚠ {}", err),
    }

    Ok(())
}
