use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollcast", version)]
struct Cli {
    /// Log verbosity on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input trace against a page and print every trigger transition.
    Replay(ReplayArgs),
    /// Parse and validate a page description.
    Validate(ValidateArgs),
    /// Split heading markup into per-character reveal spans.
    Split(SplitArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Page JSON.
    #[arg(long)]
    page: PathBuf,

    /// Trace JSON (`{"steps": [...]}` or a bare array of steps).
    #[arg(long)]
    trace: PathBuf,

    /// Print the final document state after the last frame.
    #[arg(long, default_value_t = false)]
    snapshot: bool,

    /// Also print pin events.
    #[arg(long, default_value_t = false)]
    pins: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Page JSON.
    #[arg(long)]
    page: PathBuf,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Heading markup, e.g. `Hello<br>world`.
    text: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Split(args) => cmd_split(args),
    }
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let page = scrollcast::PageConfig::from_path(&args.page)
        .with_context(|| format!("load page '{}'", args.page.display()))?;
    let trace = scrollcast::ReplayTrace::from_path(&args.trace)
        .with_context(|| format!("load trace '{}'", args.trace.display()))?;

    let mut session = scrollcast::HeadlessSession::new(&page).context("bootstrap page")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut transitions = 0usize;

    for step in &trace.steps {
        let frame = session.step(step);
        let Some(progress) = frame.tick.progress else {
            continue;
        };
        for t in &progress.transitions {
            serde_json::to_writer(&mut out, t).context("write transition")?;
            writeln!(out)?;
            transitions += 1;
        }
        if args.pins {
            for p in &progress.pins {
                serde_json::to_writer(&mut out, p).context("write pin event")?;
                writeln!(out)?;
            }
        }
    }

    if args.snapshot {
        serde_json::to_writer_pretty(&mut out, &session.document().snapshot())
            .context("write snapshot")?;
        writeln!(out)?;
    }
    out.flush()?;

    eprintln!(
        "replayed {} frames, {transitions} transitions",
        trace.steps.len()
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let page = scrollcast::PageConfig::from_path(&args.page)
        .with_context(|| format!("load page '{}'", args.page.display()))?;
    page.validate()
        .with_context(|| format!("validate page '{}'", args.page.display()))?;
    eprintln!(
        "ok: {} triggers, {:?} policy",
        page.triggers.len(),
        page.policy().class()
    );
    Ok(())
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let split = scrollcast::split_chars(&args.text);
    println!("{}", split.to_markup());
    eprintln!(
        "{} lines, {} chars, stagger {}s",
        split.lines.len(),
        split.char_count(),
        scrollcast::CHAR_STAGGER
    );
    Ok(())
}
