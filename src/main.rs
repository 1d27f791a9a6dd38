use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use zipwx_core::{AppError, Config, ConfigError};
use zipwx_panel::error_mapping::IntoAppError;
use zipwx_panel::settings::client_settings;
use zipwx_panel::view::remove_key;
use zipwx_panel::{PanelHost, PanelSettings, TreeSurface, WeatherPanel};
use zipwx_weather::{FileBlobStore, PersistedStore, WeatherClient, ZipCode};

const HELP: &str = "\
Commands:
  type <text>   set the postal code input
  add [zip]     add the typed (or given) postal code
  rm <zip>      remove a location
  refresh       re-fetch all locations
  show          print the panel
  help          show this help
  quit          exit";

enum Command<'a> {
    Type(&'a str),
    Add(Option<&'a str>),
    Remove(&'a str),
    Refresh,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    match verb {
        "type" => Some(Command::Type(rest)),
        "add" => Some(Command::Add(arg)),
        "rm" | "remove" => arg.map(Command::Remove),
        "refresh" => Some(Command::Refresh),
        "show" | "" => Some(Command::Show),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    zipwx_core::init()?;

    let (config, _) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            let err = AppError::Config(ConfigError::Invalid(format!("{:#}", e)));
            tracing::error!("{}", err);
            eprintln!("{}", err.user_message());
            return Err(e);
        }
    };
    if config.api.effective_api_key().is_none() {
        let err = AppError::Config(ConfigError::MissingApiKey);
        tracing::warn!("{}", err);
        eprintln!("{}", err.user_message());
    }

    let store = PersistedStore::new(FileBlobStore::new(config.storage_dir()));
    tracing::info!("Storing locations in {}", config.storage_dir().display());

    let panel = WeatherPanel::open(store, PanelSettings::from_config(&config));
    let client = WeatherClient::new(client_settings(&config))
        .map_err(|e| anyhow::anyhow!("Failed to create weather client: {}", e))?;
    let mut host = PanelHost::new(panel, TreeSurface::new(), client);

    println!("zipwx - weather by postal code (type `help` for commands)\n");
    print!("{}", host.surface().render_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            println!("Unknown command: {}\n{}", line.trim(), HELP);
            continue;
        };

        let result = match command {
            Command::Type(text) => {
                host.type_input(text);
                Ok(())
            }
            Command::Add(zip) => {
                if let Some(zip) = zip {
                    host.type_input(zip);
                }
                host.submit().await.map(|outcome| {
                    tracing::debug!("Add finished: {:?}", outcome);
                })
            }
            Command::Remove(zip) => match ZipCode::parse(zip) {
                Ok(zip) => host.click(&remove_key(&zip)).await.map(|found| {
                    if !found {
                        println!("{} is not on the panel", zip);
                    }
                }),
                Err(e) => {
                    println!("{}", e);
                    Ok(())
                }
            },
            Command::Refresh => host.click(zipwx_panel::renderer::REFRESH_KEY).await.map(|_| ()),
            Command::Show => Ok(()),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            let err = e.into_app_error();
            tracing::error!("{}", err);
            println!("{}", err.user_message());
        }

        print!("{}", host.surface().render_text());
    }

    tracing::info!("zipwx shutting down");
    Ok(())
}
