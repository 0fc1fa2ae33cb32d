pub mod answers;
pub mod prompt;

use crate::config::{FormConfig, Preset, SubmissionMode};
use crate::error::SubmitError;
use crate::runtime::{
    Intent, LeadPayload, LeadSink, Reducer, SubmissionStatus, SubmitReceipt, sink_for,
};
use crate::state::{FormStore, Tags};
use anyhow::{Context, Result, bail};
use answers::AnswerSheet;
use clap::{Parser, Subcommand};
use prompt::Prompt;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "bukutamu", version, about = "QR guest-book lead capture form")]
pub struct Cli {
    /// YAML form configuration; missing keys fall back to the preset
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Built-in configuration: `unpas` or `compact`
    #[arg(long, global = true, default_value = "unpas")]
    pub preset: String,

    /// Log the payload instead of sending it
    #[arg(long, global = true)]
    pub mock: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the tags a QR link query would produce
    Tags {
        /// Query string, with or without the leading `?`
        query: String,
    },
    /// Fill the form interactively
    Fill {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Replay an answer sheet through the form and submit it
    Submit {
        #[arg(long)]
        answers: PathBuf,
        #[arg(long, default_value = "")]
        query: String,
        /// Validate and print the payload without sending
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<FormConfig> {
        let mut config = match &self.config {
            Some(path) => FormConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => FormConfig::preset(self.preset.parse::<Preset>()?),
        }
        .with_env_overrides();

        if self.mock {
            config.submission.mode = SubmissionMode::Mock;
        }
        Ok(config)
    }
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        CliCommand::Tags { query } => {
            let tags = Tags::extract(query);
            println!("{}", serde_json::to_string_pretty(&tags)?);
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Fill { query } => {
            let config = Arc::new(cli.load_config()?);
            let sink = sink_for(&config.submission).context("configuring lead sink")?;
            let store = FormStore::from_query(config, query);

            let mut prompt = Prompt::new(store, sink.as_ref());
            prompt.run(io::stdin().lock(), &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Submit {
            answers,
            query,
            dry_run,
        } => {
            let raw = std::fs::read_to_string(answers)
                .with_context(|| format!("reading answers {}", answers.display()))?;
            let sheet = AnswerSheet::from_yaml(&raw)
                .with_context(|| format!("parsing answers {}", answers.display()))?;
            let config = Arc::new(cli.load_config()?);
            submit_sheet(config, query, &sheet, *dry_run)
        }
    }
}

fn submit_sheet(
    config: Arc<FormConfig>,
    query: &str,
    sheet: &AnswerSheet,
    dry_run: bool,
) -> Result<ExitCode> {
    let mut store = FormStore::from_query(config.clone(), query);

    if dry_run {
        let dry = |payload: &LeadPayload| -> Result<SubmitReceipt, SubmitError> {
            let body = serde_json::to_string_pretty(payload)
                .map_err(|err| SubmitError::Decode(err.to_string()))?;
            println!("{body}");
            Ok(SubmitReceipt::default())
        };
        return drive(&mut store, sheet, &dry).map(|_| ExitCode::SUCCESS);
    }

    let sink = sink_for(&config.submission).context("configuring lead sink")?;
    let status = drive(&mut store, sheet, sink.as_ref())?;
    if let Some(notice) = store.notice() {
        println!("{}", notice.message);
    }

    match status {
        SubmissionStatus::Succeeded => {
            println!("{}", serde_json::to_string_pretty(&store.summary())?);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn drive(
    store: &mut FormStore,
    sheet: &AnswerSheet,
    sink: &dyn LeadSink,
) -> Result<SubmissionStatus> {
    let mut intents = sheet.intents(store.sekolah_locked());
    intents.push(Intent::Submit);

    for intent in intents {
        Reducer::reduce(store, intent, sink)?;
    }

    if !store.errors().is_empty() {
        let details: Vec<String> = store
            .errors()
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        bail!("answer sheet is incomplete: {}", details.join("; "));
    }
    Ok(store.status())
}

#[cfg(test)]
mod tests {
    use super::{Cli, CliCommand, drive};
    use crate::cli::answers::AnswerSheet;
    use crate::config::{FormConfig, SubmissionMode};
    use crate::error::SubmitError;
    use crate::runtime::{LeadPayload, SubmissionStatus, SubmitReceipt};
    use crate::state::FormStore;
    use clap::Parser;
    use std::sync::Arc;

    fn accept(_: &LeadPayload) -> Result<SubmitReceipt, SubmitError> {
        Ok(SubmitReceipt::default())
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bukutamu", "submit", "--answers", "a.yaml", "--dry-run", "--mock", "-vv",
        ])
        .expect("args parse");

        assert!(cli.mock);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, CliCommand::Submit { dry_run: true, .. }));
        let config = cli.load_config().expect("config");
        assert_eq!(config.submission.mode, SubmissionMode::Mock);
    }

    #[test]
    fn unknown_preset_fails() {
        let cli = Cli::try_parse_from(["bukutamu", "--preset", "other", "tags", "x=1"])
            .expect("args parse");
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn drive_reports_missing_answers() {
        let mut store = FormStore::from_query(Arc::new(FormConfig::default()), "");
        let sheet = AnswerSheet {
            nama: Some("Aulia".into()),
            ..AnswerSheet::default()
        };

        let err = drive(&mut store, &sheet, &accept).expect_err("incomplete");
        assert!(err.to_string().contains("sekolah"));
        assert_eq!(store.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn drive_submits_a_complete_sheet() {
        let mut store = FormStore::from_query(Arc::new(FormConfig::default()), "school=SMA+1");
        let sheet = AnswerSheet::from_yaml(
            "nama: Aulia\nwa: '081234567890'\nminatBidang: FT\nketertarikan: [beasiswa]\n",
        )
        .expect("sheet");

        let status = drive(&mut store, &sheet, &accept).expect("drive");
        assert_eq!(status, SubmissionStatus::Succeeded);
    }

    #[test]
    fn duplicated_interest_in_sheet_still_submits() {
        let mut store = FormStore::from_query(Arc::new(FormConfig::default()), "school=SMA+1");
        let sheet = AnswerSheet::from_yaml(
            "nama: Aulia\nwa: '081234567890'\nminatBidang: FT\nketertarikan: [beasiswa, beasiswa]\n",
        )
        .expect("sheet");

        let status = drive(&mut store, &sheet, &accept).expect("drive");
        assert_eq!(status, SubmissionStatus::Succeeded);
        assert_eq!(store.form().ketertarikan.len(), 1);
    }
}
