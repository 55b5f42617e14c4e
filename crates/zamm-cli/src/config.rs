//! Configuration bootstrap for the CLI.
//!
//! Leading configuration flags are peeled off the argument list and handed
//! to `ortho_config`; everything from the first other token onwards belongs
//! to `clap`. Keeping the two apart means a JSON argument that happens to
//! look like a flag is never read as configuration.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use zamm_config::Config;

use crate::CONFIG_CLI_FLAGS;
use crate::errors::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from the filtered argument list.
    ///
    /// Configuration flags are only recognised before the method name.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Take { with_value: bool },
    Stop,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Stop;
    }
    let (flag, inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*text, false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Take {
            with_value: !inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

/// Arguments partitioned between the configuration loader and `clap`.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SplitArguments {
    /// Program name followed by the recognised configuration flags.
    pub(crate) config: Vec<OsString>,
    /// Program name followed by everything else.
    pub(crate) command: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> SplitArguments {
    let Some((program, rest)) = args.split_first() else {
        return SplitArguments::default();
    };

    let mut config = vec![program.clone()];
    let mut index = 0;
    while let Some(argument) = rest.get(index) {
        match classify(argument) {
            FlagAction::Take { with_value } => {
                config.push(argument.clone());
                index += 1;
                if with_value && let Some(value) = rest.get(index) {
                    config.push(value.clone());
                    index += 1;
                }
            }
            FlagAction::Stop => break,
        }
    }

    let mut command = vec![program.clone()];
    command.extend(rest[index..].iter().cloned());
    SplitArguments { config, command }
}
