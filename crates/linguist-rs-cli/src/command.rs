//! The command framework behind the `linguist-rs` binary.
//!
//! A [`ManagementCommand`] contributes one subcommand: its name, a line of
//! help, its clap arguments, and an async handler. [`CommandRegistry`] owns
//! the commands, assembles the clap tree, and dispatches parsed arguments.
//!
//! ## Adding a Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use linguist_rs_cli::command::ManagementCommand;
//! use linguist_rs_core::{LinguistResult, Settings};
//!
//! struct LanguagesCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for LanguagesCommand {
//!     fn name(&self) -> &'static str { "languages" }
//!     fn about(&self) -> &'static str { "List installed catalogues" }
//!
//!     async fn handle(&self, _matches: &clap::ArgMatches, _settings: &Settings) -> LinguistResult<()> {
//!         for language in linguist_rs_core::i18n::catalog::installed_languages() {
//!             println!("{language}");
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use linguist_rs_core::{LinguistError, LinguistResult, Settings};

/// Name of the binary, used as the clap program name.
pub const PROGRAM_NAME: &str = "linguist-rs";

/// One subcommand of the `linguist-rs` binary.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name.
    fn name(&self) -> &'static str;

    /// One line of help shown in `--help`.
    fn about(&self) -> &'static str;

    /// Declares the subcommand's arguments. No arguments by default.
    fn arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the subcommand.
    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> LinguistResult<()>;
}

/// The set of available subcommands, ordered by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command, returning the one it replaced under the same name.
    pub fn register(
        &mut self,
        command: Box<dyn ManagementCommand>,
    ) -> Option<Box<dyn ManagementCommand>> {
        self.commands.insert(command.name(), command)
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Registered command names in alphabetical order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the clap tree: one subcommand per registered command plus the
    /// global `--settings FILE` option.
    pub fn build_cli(&self) -> clap::Command {
        let root = clap::Command::new(PROGRAM_NAME)
            .about("Qt Linguist catalogue tooling")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("FILE")
                    .help("Settings file (.toml or .json); LINGUIST_* variables override it"),
            );

        self.commands.values().fold(root, |root, command| {
            let sub = clap::Command::new(command.name()).about(command.about());
            root.subcommand(command.arguments(sub))
        })
    }

    /// Dispatches parsed arguments to the selected command.
    pub async fn execute(&self, matches: &clap::ArgMatches, settings: &Settings) -> LinguistResult<()> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(LinguistError::CommandError("no command given".to_string()));
        };
        let command = self
            .get(name)
            .ok_or_else(|| LinguistError::CommandError(format!("unknown command '{name}'")))?;

        tracing::debug!(command = name, "running command");
        command.handle(sub_matches, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Succeeds only when called with `--dry-run`.
    struct DryRunCommand {
        name: &'static str,
    }

    #[async_trait]
    impl ManagementCommand for DryRunCommand {
        fn name(&self) -> &'static str {
            self.name
        }

        fn about(&self) -> &'static str {
            "dry run"
        }

        fn arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("dry-run")
                    .long("dry-run")
                    .action(clap::ArgAction::SetTrue),
            )
        }

        async fn handle(&self, matches: &clap::ArgMatches, _settings: &Settings) -> LinguistResult<()> {
            if matches.get_flag("dry-run") {
                Ok(())
            } else {
                Err(LinguistError::CommandError(format!("{} ran for real", self.name)))
            }
        }
    }

    fn registry(names: &[&'static str]) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for &name in names {
            registry.register(Box::new(DryRunCommand { name }));
        }
        registry
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
        assert!(registry.get("check").is_none());
    }

    #[test]
    fn test_names_are_sorted_and_unique() {
        let mut registry = registry(&["stats", "check", "lookup"]);
        let replaced = registry.register(Box::new(DryRunCommand { name: "check" }));
        assert!(replaced.is_some());
        assert_eq!(registry.names(), vec!["check", "lookup", "stats"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("lookup").map(|c| c.about()), Some("dry run"));
    }

    #[test]
    fn test_global_settings_option() {
        let matches = registry(&["check"])
            .build_cli()
            .try_get_matches_from([PROGRAM_NAME, "check", "--dry-run", "--settings", "linguist.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("settings").map(String::as_str),
            Some("linguist.toml")
        );
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert!(sub.get_flag("dry-run"));
    }

    #[test]
    fn test_subcommand_required() {
        let cli = registry(&["check"]).build_cli();
        assert!(cli.clone().try_get_matches_from([PROGRAM_NAME]).is_err());
        assert!(cli.try_get_matches_from([PROGRAM_NAME, "merge"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_dispatches_to_command() {
        let registry = registry(&["check", "stats"]);
        let settings = Settings::default();

        let dry = registry
            .build_cli()
            .try_get_matches_from([PROGRAM_NAME, "stats", "--dry-run"])
            .unwrap();
        assert!(registry.execute(&dry, &settings).await.is_ok());

        let real = registry
            .build_cli()
            .try_get_matches_from([PROGRAM_NAME, "stats"])
            .unwrap();
        let err = registry.execute(&real, &settings).await.unwrap_err();
        assert_eq!(err.to_string(), "Command error: stats ran for real");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_execute_without_subcommand() {
        let registry = registry(&["check"]);
        let matches = clap::Command::new(PROGRAM_NAME).get_matches_from([PROGRAM_NAME]);
        let err = registry
            .execute(&matches, &Settings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LinguistError::CommandError(_)));
    }
}
