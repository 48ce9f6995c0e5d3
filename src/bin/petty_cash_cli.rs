use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use chrono::Local;
use petty_cash_ledger::{
    cli::{self, output, ScriptedPrompts, TerminalPrompts},
    config::ConfigManager,
    errors::LedgerResult,
    report::LedgerReport,
};

const SCRIPT_ENV: &str = "PETTY_CASH_CLI_SCRIPT";

fn main() -> ExitCode {
    petty_cash_ledger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "petty cash session failed");
            output::error(err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> LedgerResult<()> {
    let config = ConfigManager::new().load()?.with_env_overrides();
    output::set_preferences(output::OutputPreferences {
        color: config.color && io::stdout().is_terminal(),
    });

    let today = Local::now().date_naive();
    let scripted = env::var_os(SCRIPT_ENV).is_some() || !io::stdin().is_terminal();
    let report = if scripted {
        let mut prompts = ScriptedPrompts::new(io::stdin().lock()).echo(!config.json_output);
        cli::run(&mut prompts, config.clone(), today)?
    } else {
        let mut prompts = TerminalPrompts::new();
        cli::run(&mut prompts, config.clone(), today)?
    };

    if config.json_output {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &LedgerReport) {
    output::blank_line();
    print!("{report}");
}
