use std::{env, path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use tracing::{info, warn};

use spendwise_config::{Config, ConfigManager};
use spendwise_core::Clock;
use spendwise_domain::serde_date::parse_calendar_date;

use crate::{
    cli::{
        commands,
        error::{CliError, CommandError},
        output::{self, OutputPreferences},
        registry::CommandRegistry,
    },
    currency::LocaleFormatter,
    session::{Session, User},
    store::{load_snapshot_from_path, save_snapshot_to_path, InMemoryStore, RecordStore},
    utils::clock::{FixedClock, SystemClock},
};

pub const SCRIPT_ENV: &str = "SPENDWISE_CLI_SCRIPT";
pub const TODAY_ENV: &str = "SPENDWISE_TODAY";
pub const SNAPSHOT_ENV: &str = "SPENDWISE_SNAPSHOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: InMemoryStore,
    pub session: Session,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub formatter: LocaleFormatter,
    pub pinned_today: Option<NaiveDate>,
    pub snapshot_path: Option<PathBuf>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Context built from the process environment and the user's config file.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        let pinned_today = match env::var(TODAY_ENV) {
            Ok(raw) => Some(
                parse_calendar_date(&raw)
                    .ok_or_else(|| CliError::InvalidEnv(format!("{TODAY_ENV}={raw}")))?,
            ),
            Err(_) => None,
        };
        let mut context = Self::with_parts(mode, config_manager, pinned_today)?;

        if let Some(path) = env::var_os(SNAPSHOT_ENV).map(PathBuf::from) {
            context.load_snapshot(path)?;
        } else if let Some(path) = context.config.last_snapshot.clone() {
            if path.exists() {
                if let Err(err) = context.load_snapshot(path.clone()) {
                    warn!(path = %path.display(), error = %err, "could not reopen last snapshot");
                }
            }
        }
        Ok(context)
    }

    /// Context over an explicit config location and optional pinned date.
    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        pinned_today: Option<NaiveDate>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let store = InMemoryStore::new();
        let clock = clock_for(pinned_today);
        let session = Session::connect(
            User::local(),
            &store,
            clock,
            config.aggregation_settings(),
        );

        let context = Self {
            mode,
            registry,
            store,
            session,
            formatter: LocaleFormatter::from_config(&config),
            config_manager,
            config,
            pinned_today,
            snapshot_path: None,
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match self.pinned_today {
            Some(date) => format!("spendwise [{date}]> "),
            None => "spendwise> ".to_string(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.session.today()
    }

    pub fn pin_today(&mut self, date: Option<NaiveDate>) {
        self.pinned_today = date;
        self.session.set_clock(clock_for(date));
    }

    /// Loads a snapshot file and pushes it through the store to the session.
    pub fn load_snapshot(&mut self, path: PathBuf) -> Result<usize, CommandError> {
        let snapshot = load_snapshot_from_path(&path)?;
        let count = snapshot.record_count();
        self.store.publish(snapshot);
        info!(path = %path.display(), records = count, "snapshot loaded into session");
        self.snapshot_path = Some(path);
        Ok(count)
    }

    /// Writes the store to the open snapshot file. Without one, changes stay in
    /// memory and the user is told how to keep them.
    pub fn persist_records(&self) -> Result<(), CommandError> {
        match &self.snapshot_path {
            Some(path) => {
                save_snapshot_to_path(&self.store.snapshot(), path)?;
                info!(path = %path.display(), revision = self.store.revision(), "snapshot saved");
            }
            None => output::hint("No snapshot file is open; use `save <path>` to keep changes."),
        }
        Ok(())
    }

    /// Re-derives session settings, formatter and colours after a config change.
    pub fn apply_config(&mut self, config: Config) {
        self.session.set_settings(config.aggregation_settings());
        self.formatter = LocaleFormatter::from_config(&config);
        self.config = config;
        self.apply_output_preferences();
    }

    pub fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled && self.mode == CliMode::Interactive,
        });
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match self.registry.handler(command) {
            Some(handler) => match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            },
            None => {
                self.suggest_command(raw);
                Ok(LoopControl::Continue)
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::hint(format!("Did you mean `{best}`?"));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

fn clock_for(pinned: Option<NaiveDate>) -> Arc<dyn Clock> {
    match pinned {
        Some(date) => Arc::new(FixedClock::new(date)),
        None => Arc::new(SystemClock),
    }
}
