use dioxus::prelude::*;
use sblgnt_viewer_config::Config;
use sblgnt_viewer_engine::{ConfigPatch, StatusMessagesPatch};
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use ui::App;

/// Data root from the command line, else from the config file
fn resolve_data_root() -> Result<(PathBuf, Option<Config>), String> {
    let config_path = Config::config_path();
    let config = Config::load().map_err(|e| format!("Failed to load config file: {e}"))?;

    let args: Vec<String> = env::args().collect();
    match (args.len(), config) {
        (2, config) => Ok((PathBuf::from(&args[1]), config)),
        (1, Some(config)) => Ok((config.data_root.clone(), Some(config))),
        (1, None) => Err(format!(
            "No data root provided and no config file found\n\
             Usage: {} <data-root>\n\
             Or create a config file at {}",
            args[0],
            config_path.display()
        )),
        _ => Err(format!("Usage: {} [data-root]", args[0])),
    }
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

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("sblgnt-viewer starting up");

    let (data_root, config) = match resolve_data_root() {
        Ok(resolved) => resolved,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };
    if !data_root.is_dir() {
        eprintln!("Error: Data root '{}' is not a directory", data_root.display());
        process::exit(1);
    }
    log::info!("Using data root {}", data_root.display());

    let patch = config_patch(config.as_ref());
    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .with_context(Launch { data_root, patch })
        .launch(app_root);
}

#[derive(Clone)]
struct Launch {
    data_root: PathBuf,
    patch: ConfigPatch,
}

fn app_root() -> Element {
    let launch = use_context::<Launch>();

    rsx! {
        App { data_root: launch.data_root, patch: launch.patch }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("SBLGNT Viewer")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
