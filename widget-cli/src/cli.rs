use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use widget_core::{
    Config, ExcuseWidget, ProviderId, StatusReporter, View, WeatherWidget,
    excuse_source_from_config, geolocator_for, input::category_label,
    provider::default_provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "widgets", version, about = "Excuse and weather widgets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose the weather provider and store its credentials.
    Configure {
        /// Provider short name, "demo" or "openweather".
        provider: String,
    },

    /// Show the weather widget.
    Weather {
        /// City name; the configured default city when omitted.
        #[arg(conflicts_with = "here")]
        city: Option<String>,

        /// Use the configured device location instead of a city.
        #[arg(long)]
        here: bool,

        /// Print the view as HTML.
        #[arg(long)]
        html: bool,
    },

    /// Use the excuse widget.
    Excuse {
        #[command(subcommand)]
        action: ExcuseCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExcuseCommand {
    /// List excuse categories.
    Categories {
        #[arg(long)]
        html: bool,
    },

    /// Show a random excuse.
    Random {
        #[arg(long)]
        html: bool,
    },

    /// Show an excuse from one category, by key or label.
    Pick {
        category: String,

        #[arg(long)]
        html: bool,
    },

    /// Add a new excuse.
    Add {
        #[arg(long)]
        category: String,

        #[arg(long)]
        excuse: String,
    },

    /// Menu-driven session with a live status line.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure { provider } => configure(config, &provider)?,
            Command::Weather { city, here, html } => {
                let widget = WeatherWidget::new(
                    default_provider_from_config(&config)?,
                    geolocator_for(config.weather.location),
                );

                if here {
                    widget.locate().await;
                } else {
                    match city {
                        Some(city) => widget.search(&city).await,
                        None => widget.open(&config.weather.default_city).await,
                    };
                }
                print_view(&widget.view(), html);
            }
            Command::Excuse { action } => {
                let widget = ExcuseWidget::new(
                    excuse_source_from_config(&config),
                    StatusReporter::new(config.excuses.status_delay()),
                );
                run_excuse(&widget, action).await?;
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config, provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;

    if id.needs_api_key() {
        let api_key = Password::new(&format!("API key for {id}:"))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        config.upsert_provider_api_key(id, api_key.trim().to_string());
    }
    config.set_default_provider(id);

    let path = config.save()?;
    println!("Saved provider '{id}' to {}", path.display());
    Ok(())
}

async fn run_excuse(widget: &ExcuseWidget, action: ExcuseCommand) -> anyhow::Result<()> {
    match action {
        ExcuseCommand::Categories { html } => {
            widget.load_categories().await;
            print_view(&widget.categories_view(), html);
        }
        ExcuseCommand::Random { html } => {
            widget.random().await;
            print_view(&widget.view(), html);
        }
        ExcuseCommand::Pick { category, html } => {
            widget.pick(&category).await;
            print_view(&widget.view(), html);
        }
        ExcuseCommand::Add { category, excuse } => {
            // Outcome is reported on the status line either way.
            let _ = widget.add(&category, &excuse).await;
            print_view(&widget.status_view(), false);
        }
        ExcuseCommand::Interactive => interactive(widget).await?,
    }
    Ok(())
}

const RANDOM: &str = "Random excuse";
const PICK: &str = "Pick a category";
const ADD: &str = "Add an excuse";
const QUIT: &str = "Quit";

async fn interactive(widget: &ExcuseWidget) -> anyhow::Result<()> {
    widget.load_categories().await;

    loop {
        let status = widget.status_view();
        if !status.is_empty() {
            println!("[{status}]");
        }

        let choice = match Select::new("What now?", vec![RANDOM, PICK, ADD, QUIT]).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read menu choice"),
        };
        debug!(choice, "menu selection");

        match choice {
            RANDOM => {
                widget.random().await;
                println!("{}\n", widget.view());
            }
            PICK => {
                let labels: Vec<String> = widget
                    .categories()
                    .iter()
                    .map(|key| category_label(key))
                    .collect();
                if labels.is_empty() {
                    println!("No categories available.\n");
                    continue;
                }
                let label = Select::new("Category:", labels)
                    .prompt()
                    .context("Failed to read category")?;
                widget.pick(&label).await;
                println!("{}\n", widget.view());
            }
            ADD => {
                let category = Text::new("Category:")
                    .prompt()
                    .context("Failed to read category")?;
                let excuse = Text::new("Excuse:")
                    .prompt()
                    .context("Failed to read excuse")?;
                // Outcome is reported on the status line either way.
                let _ = widget.add(&category, &excuse).await;
            }
            _ => break,
        }
    }

    Ok(())
}

fn print_view(view: &View, html: bool) {
    if html {
        println!("{}", view.to_html());
    } else {
        println!("{view}");
    }
}
