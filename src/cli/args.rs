//! CLI argument definitions using Clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "a2conv")]
#[command(about = "AviUtl1 腳本轉換工具 - Convert AviUtl1 Lua scripts for AviUtl2")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// 輸入檔案 (Input script files: .anm/.obj/.cam/.scn/.tra)
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// 輸出目錄 (Output root directory, default from config)
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// 指定設定檔路徑 (Specify configuration file path)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 輸出 TOML 報告 (Write conversion reports as TOML)
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// 僅轉換不寫入 (Dry run - convert and summarize without writing)
    #[arg(long)]
    pub dry_run: bool,

    /// 詳細日誌 (Increase log verbosity, repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// 不顯示摘要 (Suppress the summary)
    #[arg(short, long)]
    pub quiet: bool,

    /// 停用顏色 (Disable colored output)
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Maximum log level for the requested verbosity
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
