use dice_chain::stringify::{MarkdownStringifier, SimpleStringifier, Stringify};
use dice_chain::{Roll, RollConfig, RollContext};
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
enum Format {
    #[default]
    Simple,
    Markdown,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ReplConfig {
    roll: RollConfig,
    format: Format,
}

impl ReplConfig {
    /// Environment variables:
    /// - `DICE_MAX_ROLLS` - dice allowed per line, `0` for no limit (default: 1000)
    /// - `DICE_FORMAT` - `simple` or `markdown` (default: simple)
    fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from a variable lookup, ignoring values that do not
    /// parse.
    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(max) = read_var::<usize>(&get, "DICE_MAX_ROLLS") {
            config.roll.max_rolls = (max != 0).then_some(max);
        }
        if let Some(format) = read_var::<Format>(&get, "DICE_FORMAT") {
            config.format = format;
        }

        config
    }

    fn render(&self, rolls: &[Roll]) -> String {
        match self.format {
            Format::Simple => SimpleStringifier::new().str_rolls(rolls),
            Format::Markdown => MarkdownStringifier::new().str_rolls(rolls),
        }
    }
}

fn read_var<T>(get: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    get(key)?.trim().parse().ok()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = ReplConfig::from_env();
    tracing::debug!(?config, "starting repl");

    let mut ctx = RollContext::from_config(&config.roll, rand::thread_rng());
    print!("> ");
    io::stdout().flush()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            ctx.reset();
            match dice_chain::roll_line(&mut ctx, &line) {
                Ok(rolls) => println!("{}", config.render(&rolls)),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
