//! Bitable - CLI Entry Point
//!
//! Commands:
//! - `bitable eval <expr>` - Evaluate an expression and show it in every base
//! - `bitable repl` - Line-oriented session on stdin
//! - `bitable tui` - Interactive terminal inspector (default)
//! - `bitable selftest` - Run the built-in self-test

use std::io::{self, BufRead, Write};
use clap::{Parser, Subcommand};
use bitable::{evaluate, evaluate_full, Outcome, Register, Session, Snapshot};

#[derive(Parser)]
#[command(name = "bitable")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An interactive 64-bit register inspector and bitwise calculator")]
struct Cli {
    /// Initial register value (any expression, e.g. 0xFF00)
    #[arg(short, long, global = true)]
    value: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result in every base
    Eval {
        /// The expression, e.g. "0x10 + 2*3"
        expr: String,
        /// Print the result as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Read commands and expressions from stdin, one per line
    Repl,
    /// Interactive terminal inspector
    Tui,
    /// Run the built-in self-test
    Selftest,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let initial = match cli.value.as_deref().map(evaluate).transpose() {
        Ok(v) => v.unwrap_or(0),
        Err(e) => {
            eprintln!("❌ Invalid --value: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Eval { expr, json }) => eval_expression(&expr, json),
        Some(Commands::Repl) => run_repl(initial),
        Some(Commands::Tui) | None => run_tui(initial),
        Some(Commands::Selftest) => run_self_test(),
    }
}

fn eval_expression(expr: &str, json: bool) {
    let result = match evaluate_full(expr) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("❌ {}: {}", expr, e);
            std::process::exit(1);
        }
    };

    let snapshot = Snapshot::of(&Register::with_value(result.value()));
    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to encode JSON: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("raw: {}", result);
    print_snapshot(&snapshot);
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("hex: {}", snapshot.hex);
    println!("dec: {}", snapshot.dec);
    println!("oct: {}", snapshot.oct);
    println!("bin: {}", snapshot.bin);
}

fn run_repl(initial: u64) {
    let mut session = Session::with_value(initial);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Bitable v0.1.0 - type an expression or a command, Ctrl-D to quit");
    print_state(&session);

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("❌ Failed to read input: {}", e);
                std::process::exit(1);
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.execute(&line) {
            Ok(Outcome::Calculated(result)) => {
                println!(">>> {}", result);
                print_state(&session);
            }
            Ok(Outcome::Value(_)) => print_state(&session),
            Ok(Outcome::TranscriptCleared) => println!("(transcript cleared)"),
            Err(e) => println!(">>> error: {}", e),
        }
    }
}

fn print_state(session: &Session) {
    let reg = session.register();
    println!("  {}", reg.to_bit_grid());
    println!("  hex {}  dec {}  oct {}", reg.to_hex(), reg.to_dec(), reg.to_oct());
}

#[cfg(feature = "tui")]
fn run_tui(initial: u64) {
    if let Err(e) = bitable::run_inspector(Session::with_value(initial)) {
        eprintln!("❌ Inspector error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(initial: u64) {
    log::warn!("built without the tui feature, falling back to the repl");
    run_repl(initial);
}

fn run_self_test() {
    use bitable::EvalError;

    println!("━━━ Bitable Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;
    let mut check = |name: &str, ok: bool| {
        if ok {
            println!("{}... ✓", name);
            passed += 1;
        } else {
            println!("{}... ✗", name);
            failed += 1;
        }
    };

    let mut reg = Register::new();
    let ok = reg.set_bit(0, true).is_ok() && reg.get() == 1 && reg.to_hex() == "1";
    check("Set bit 0", ok);

    let mut reg = Register::with_value(0xFF);
    let ok = reg.zero_range(4, 7).is_ok() && reg.get() == 0x0F;
    check("Zero range 4..7", ok);

    let mut reg = Register::new();
    let ok = reg.one_range(0, 63).is_ok() && reg.get() == 0xFFFF_FFFF_FFFF_FFFF;
    check("One range 0..63", ok);

    let mut reg = Register::with_value(0x0F);
    reg.shift_left(4);
    check("Shift left by 4", reg.get() == 0xF0);

    check("Evaluate 0x10 + 2*3", evaluate("0x10 + 2*3") == Ok(22));

    let mut session = Session::with_value(7);
    let ok = session.calculate("5/0") == Err(EvalError::DivideByZero)
        && session.register().get() == 7;
    check("Divide by zero leaves register", ok);

    let mut reg = Register::with_value(0x1234_5678_9ABC_DEF0);
    let ok = reg.toggle_range(3, 50).is_ok()
        && reg.toggle_range(50, 3).is_ok()
        && reg.get() == 0x1234_5678_9ABC_DEF0;
    check("Toggle involution", ok);

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
