use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{warn, LevelFilter};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use simple_logger::SimpleLogger;

use connect_four_sim::ai::AgentKind;
use connect_four_sim::config::AppConfig;
use connect_four_sim::simulation::GameStatistics;
use connect_four_sim::ui::TerminalViewer;

/// Simulate Connect Four matches between automated agents.
#[derive(Parser)]
#[command(
    name = "connect-four-sim",
    about = "Simulate Connect Four matches between automated agents"
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "simulation.toml")]
    config: PathBuf,

    /// Override number of matches
    #[arg(long)]
    matches: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (ignored with --watch)
    #[arg(long)]
    threads: Option<usize>,

    /// Override the greedy agents' random move probability
    #[arg(long)]
    random_move_probability: Option<f64>,

    /// Strategy for the first mover: greedy or random
    #[arg(long)]
    first: Option<AgentKind>,

    /// Strategy for the second mover: greedy or random
    #[arg(long)]
    second: Option<AgentKind>,

    /// Watch the matches in a terminal view
    #[arg(long)]
    watch: bool,

    /// Print the final statistics as JSON
    #[arg(long)]
    json: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Print a config file with every default value and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // The terminal view owns the screen, so keep log output off it
    let level = if cli.watch { LevelFilter::Off } else { cli.log_level };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("initializing logger")?;

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(matches) = cli.matches {
        app_config.simulation.num_matches = matches;
    }
    if let Some(seed) = cli.seed {
        app_config.simulation.seed = Some(seed);
    }
    if let Some(threads) = cli.threads {
        app_config.simulation.threads = threads;
    }
    if let Some(p) = cli.random_move_probability {
        app_config.agent.random_move_probability = p;
    }
    if let Some(kind) = cli.first {
        app_config.simulation.first_agent = kind;
    }
    if let Some(kind) = cli.second {
        app_config.simulation.second_agent = kind;
    }
    app_config
        .validate()
        .context("validating configuration with command line overrides")?;

    let stats = if cli.watch {
        if app_config.simulation.threads > 1 {
            warn!("--watch runs matches sequentially; ignoring threads");
        }
        run_watch(&app_config)?
    } else {
        app_config
            .simulation()
            .run()
            .context("running simulation")?
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&stats.summary())
            .context("serializing statistics")?;
        println!("{json}");
    } else {
        println!("{stats}");
    }
    Ok(())
}

fn run_watch(app_config: &AppConfig) -> Result<GameStatistics> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("creating terminal")?;

    let mut viewer = TerminalViewer::new(terminal, app_config.board, &app_config.simulation);
    let result = app_config.simulation().run_observed(&mut viewer);
    let shown = match &result {
        Ok(stats) => viewer.show_final(stats),
        Err(_) => Ok(()),
    };
    let draw_error = viewer.take_error();

    // Terminal cleanup always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(viewer.terminal_mut().backend_mut(), LeaveAlternateScreen);
    let _ = viewer.terminal_mut().show_cursor();

    if let Some(e) = draw_error {
        return Err(e).context("drawing simulation view");
    }
    shown.context("showing final statistics")?;
    result.context("running simulation")
}
