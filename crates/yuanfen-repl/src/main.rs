use anyhow::Result;
use clap::Parser;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};

use yuanfen_core::ai::{Assistant, GeminiClient};
use yuanfen_core::config::CoreConfig;
use yuanfen_core::tracing_setup::init_tracing;
use yuanfen_core::Session;

mod commands;
mod format;
mod seed;
mod state;

use commands::{handle_line, CommandResult};
use state::ReplState;

// ANSI color codes
pub(crate) const CYAN: &str = "\x1b[36m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const WHITE_BOLD: &str = "\x1b[1;37m";
pub(crate) const DIM: &str = "\x1b[2m";
pub(crate) const RESET: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(name = "yuanfen-repl")]
#[command(about = "銀髮緣 line-mode matchmaking client")]
struct Args {
    /// Gemini API key (prefer GEMINI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = CoreConfig::new(CoreConfig::resolve_api_key(args.api_key));
    if config.api_key.is_none() {
        eprintln!(
            "{}",
            format::system("未設定 GEMINI_API_KEY，客服與語音功能將以預設訊息回覆。")
        );
    }
    let client = GeminiClient::new(
        config.api_key.clone().unwrap_or_default(),
        config.request_timeout,
    );
    let assistant = Assistant::new(client);

    let session = Session::new(seed::demo_candidates(), seed::demo_clubs());
    let mut state = ReplState::new(session, assistant);

    for line in format::splash() {
        println!("{line}");
    }
    state.session.finish_splash();
    println!("{}", format::heading("建立個人檔案"));
    println!(
        "{}",
        format::system("讓我們更認識您，才能幫您找到好朋友！輸入 help 查看填寫指令。")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", state.prompt());
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match handle_line(line.trim(), &mut state).await {
            CommandResult::Lines(output) => {
                for line in output {
                    println!("{line}");
                }
            }
            CommandResult::Quit => break,
        }
    }
    println!("{}", format::system("期待您再次回來，祝您有美好的一天！"));
    Ok(())
}
