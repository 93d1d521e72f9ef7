//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "runprov";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("#   {hint}");
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(
            "runprov completions bash > ~/.local/share/bash-completion/completions/runprov",
        ),
        Shell::Zsh => Some("runprov completions zsh > ~/.zsh/completions/_runprov"),
        Shell::Fish => Some("runprov completions fish > ~/.config/fish/completions/runprov.fish"),
        Shell::PowerShell => Some("runprov completions powershell | Out-String | Invoke-Expression"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_hint_per_shell() {
        assert!(install_hint(Shell::Zsh).unwrap().contains("_runprov"));
        assert!(install_hint(Shell::Elvish).is_none());
    }
}
