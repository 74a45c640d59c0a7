//! Azami CLI - コマンドラインインターフェース
//!
//! 停止中のプロセスにアタッチして値を検査するREPLインターフェース

mod bridge;
mod command;

use std::rc::Rc;

use anyhow::Result;
use azami_format::{register_defaults, FormatterRegistry};
use azami_target::{LayoutTable, LiveValue, Memory, Process};
use bridge::CommandBridge;
use clap::Parser;
use command::Command;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

/// Azami - Value Inspector
#[derive(Parser)]
#[command(name = "azami")]
#[command(version = "0.1.0")]
#[command(about = "Value inspector for stopped processes", long_about = None)]
struct Cli {
    /// Process ID to attach to
    #[arg(short, long)]
    pid: i32,

    /// External build tool invoked by the 'build' command
    #[arg(long, default_value = "make")]
    tool: String,
}

/// 1回のインスペクションセッション
struct Session {
    // アタッチ状態を保持する（ドロップ時にデタッチ）
    _process: Process,
    memory: Rc<Memory>,
    table: LayoutTable,
    registry: FormatterRegistry,
    bridge: CommandBridge,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Azami - Value Inspector");
    println!("Version 0.1.0");
    println!();

    let cli = Cli::parse();
    let mut session = init_session(&cli)?;
    run_repl(&mut session)?;

    Ok(())
}

/// プロセスにアタッチしてセッションを初期化する
fn init_session(cli: &Cli) -> Result<Session> {
    println!("Attaching to process: {}", cli.pid);

    let process = Process::attach(cli.pid)?;
    tracing::debug!("attached to pid {}", process.pid());
    println!("Attached, process is stopped");
    println!();

    let memory = Rc::new(Memory::new(cli.pid));
    let table = LayoutTable::builtin();

    // パターンレジストリは起動時に一度だけ構築する
    let mut registry = FormatterRegistry::new();
    register_defaults(&mut registry, memory.clone())?;

    let bridge = CommandBridge::new("build", cli.tool.clone());

    Ok(Session {
        _process: process,
        memory,
        table,
        registry,
        bridge,
    })
}

/// REPLループを実行する
fn run_repl(session: &mut Session) -> Result<()> {
    println!("Type 'help' for available commands, 'quit' to exit.");
    println!();

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("(azami) ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                if handle_command(session, line)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// コマンドを処理する（trueを返すと終了）
fn handle_command(session: &mut Session, line: &str) -> Result<bool> {
    match Command::parse(line) {
        Some(Command::Render { type_name, addr }) => handle_render(session, &type_name, addr),
        Some(Command::Read { addr, len }) => handle_read(session, addr, len),
        Some(Command::Build(args)) => session.bridge.execute(&args),
        Some(Command::Help) => print_help(),
        Some(Command::Quit) => {
            println!("Goodbye!");
            return Ok(true);
        }
        None => {
            println!("Unknown command: {}", line);
            println!("Type 'help' for available commands.");
        }
    }

    Ok(false)
}

/// Renderコマンドを処理する
fn handle_render(session: &Session, type_name: &str, addr: u64) {
    let value = match LiveValue::at(&*session.memory, &session.table, type_name, addr) {
        Some(value) => value,
        None => {
            println!("Unknown type: {}", type_name);
            println!(
                "Known types: {}",
                session.table.type_names().collect::<Vec<_>>().join(", ")
            );
            return;
        }
    };

    match session.registry.render(type_name, &value) {
        Some(rendered) => println!("{}", rendered),
        None => println!("No formatter registered for '{}'", type_name),
    }
}

/// Readコマンドを処理する
fn handle_read(session: &Session, addr: u64, len: usize) {
    match session.memory.read_bytes(addr, len) {
        Ok(bytes) => print_hex_dump(addr, &bytes),
        Err(e) => println!("Error: {}", e),
    }
}

/// バイト列を16進ダンプとして表示する
fn print_hex_dump(addr: u64, bytes: &[u8]) {
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let line_addr = addr + (i * 16) as u64;
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { '.' })
            .collect();
        println!("  0x{:012x}  {:<47}  {}", line_addr, hex.join(" "), ascii);
    }
}

fn print_help() {
    println!("Available commands:");
    println!();
    println!("  help                 - Show this help message");
    println!("  quit/exit/q          - Detach and exit");
    println!();
    println!("Inspection commands:");
    println!("  render <type> <addr> - Render the value at <addr> as <type>");
    println!("  read <addr> <len>    - Hex dump <len> bytes at <addr>");
    println!();
    println!("Build commands:");
    println!("  build <args...>      - Forward <args...> to the external build tool");
    println!();
    println!("Examples:");
    println!("  render utf8::str 0x7fffffffd000");
    println!("  render vec2<float> 0x7fffffffd020");
    println!("  read 0x7fffffffd000 64");
    println!("  build release");
}
