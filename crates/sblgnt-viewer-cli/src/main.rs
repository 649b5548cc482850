use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use sblgnt_viewer_cli::{
    build_data, inspect,
    cli::{Cli, Command, ReadArgs},
    reader::{App, ui},
};
use sblgnt_viewer_config::Config;
use sblgnt_viewer_engine::{ConfigPatch, FileFetcher, StatusMessagesPatch};
use std::{
    env,
    io::{Stdout, stdout},
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Read(args) => {
            // The alternate screen owns stderr output unless logging was asked for
            if env::var_os("RUST_LOG").is_some() {
                env_logger::Builder::from_default_env().init();
            }
            read(args)
        }
        Command::BuildData(args) => {
            env_logger::Builder::from_default_env()
                .filter_level(log::LevelFilter::Info)
                .init();
            let verses = build_data::run(&args)?;
            println!("Wrote {verses} verses to {}", args.output.display());
            Ok(())
        }
        Command::Inspect(args) => {
            env_logger::Builder::from_default_env().init();
            inspect::run(&args, &mut stdout().lock())
        }
    }
}

fn read(args: ReadArgs) -> Result<()> {
    let config_path = Config::config_path();
    let config = Config::load()
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;

    let data_root = match (&args.data_root, &config) {
        (Some(path), _) => path.clone(),
        (None, Some(config)) => config.data_root.clone(),
        (None, None) => {
            eprintln!("Usage: sblgnt-viewer-cli read <data-root>");
            eprintln!("Or create a config file at {}", config_path.display());
            bail!("No data root provided and no config file found");
        }
    };
    if !data_root.is_dir() {
        bail!("Data root '{}' is not a directory", data_root.display());
    }
    log::info!("Reading from {}", data_root.display());

    let patch = config_patch(config.as_ref()).merged_with(ConfigPatch {
        data_url: args.data_url.clone(),
        manifest_url: args.manifest_url.clone(),
        status_messages: StatusMessagesPatch::default(),
    });
    let mut app = App::new(FileFetcher::new(data_root), &patch);
    if let Some(book) = &args.book {
        app.viewer_mut().on_selector_change(book);
    }
    if args.no_clauses {
        app.viewer_mut().set_clause_overlay(false);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn config_patch(config: Option<&Config>) -> ConfigPatch {
    let Some(config) = config else {
        return ConfigPatch::default();
    };
    ConfigPatch {
        data_url: config.data_url.clone(),
        manifest_url: config.manifest_url.clone(),
        status_messages: StatusMessagesPatch {
            loading: config.status_messages.loading.clone(),
            error: config.status_messages.error.clone(),
            empty: config.status_messages.empty.clone(),
        },
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}
