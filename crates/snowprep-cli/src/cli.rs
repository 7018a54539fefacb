//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use snowprep_airtable::AirtableConfig;
use snowprep_model::MAPPING_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "snowprep",
    version,
    about = "Translate complaint exports for Snowflake import",
    long_about = "Translate the coded columns of an Airtable complaint export.\n\n\
                  `translate` finds airtable_export_final.csv, maps Codes through\n\
                  code_mapping.json, flattens Product Type Sub Category, and writes\n\
                  data/snowflake_import.csv. `export` refreshes both inputs from Airtable.\n\n\
                  Without a subcommand, `translate` runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments for the default `translate` run.
    #[command(flatten)]
    pub translate: TranslateArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow complaint values (e.g. duplicate complaint numbers) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate the latest export into the Snowflake import file.
    Translate(TranslateArgs),

    /// Refresh the export and code mapping from Airtable.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Path to the code → label mapping.
    #[arg(
        long = "mapping",
        value_name = "PATH",
        env = "SNOWPREP_MAPPING",
        default_value = MAPPING_FILE_NAME
    )]
    pub mapping: PathBuf,

    /// Application directory holding data/ (default: $SNOWPREP_APP_DIR or the
    /// current directory).
    #[arg(long = "app-dir", value_name = "DIR")]
    pub app_dir: Option<PathBuf>,

    /// Root scanned for exports when data/ has none (default: system temp dir).
    #[arg(long = "temp-root", value_name = "DIR", env = "SNOWPREP_TEMP_ROOT")]
    pub temp_root: Option<PathBuf>,

    /// Output CSV (default: <APP_DIR>/data/snowflake_import.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Rows shown in the verification sample.
    #[arg(long = "sample-rows", value_name = "N", default_value_t = 5)]
    pub sample_rows: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Airtable personal access token.
    #[arg(
        long = "api-key",
        value_name = "TOKEN",
        env = "AIRTABLE_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,

    /// Airtable base id.
    #[arg(long = "base-id", default_value = AirtableConfig::DEFAULT_BASE_ID)]
    pub base_id: String,

    /// Complaints table id.
    #[arg(
        long = "complaints-table",
        default_value = AirtableConfig::DEFAULT_COMPLAINTS_TABLE_ID
    )]
    pub complaints_table: String,

    /// Product type subcategories table id.
    #[arg(
        long = "subcategories-table",
        default_value = AirtableConfig::DEFAULT_SUBCATEGORIES_TABLE_ID
    )]
    pub subcategories_table: String,

    /// Codes table id.
    #[arg(long = "codes-table", default_value = AirtableConfig::DEFAULT_CODES_TABLE_ID)]
    pub codes_table: String,

    /// Application directory holding data/ (default: $SNOWPREP_APP_DIR or the
    /// current directory).
    #[arg(long = "app-dir", value_name = "DIR")]
    pub app_dir: Option<PathBuf>,

    /// Directory receiving code_mapping.json and subcategory_mapping.json.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = ".")]
    pub mapping_dir: PathBuf,
}

impl Cli {
    /// The requested subcommand, or `translate` with the top-level arguments.
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or(Command::Translate(self.translate))
    }
}

impl ExportArgs {
    pub fn airtable_config(&self) -> AirtableConfig {
        AirtableConfig {
            base_id: self.base_id.clone(),
            complaints_table_id: self.complaints_table.clone(),
            subcategories_table_id: self.subcategories_table.clone(),
            codes_table_id: self.codes_table.clone(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn translate_defaults() {
        let cli = Cli::try_parse_from(["snowprep", "translate"]).unwrap();
        let Command::Translate(args) = cli.into_command() else {
            panic!("expected translate");
        };
        assert_eq!(args.sample_rows, 5);
        assert!(args.output.is_none());
    }

    #[test]
    fn export_table_ids_default_to_complaints_base() {
        let cli =
            Cli::try_parse_from(["snowprep", "export", "--api-key", "pat-test"]).unwrap();
        let Command::Export(args) = cli.into_command() else {
            panic!("expected export");
        };
        assert_eq!(args.airtable_config(), AirtableConfig::default());
    }

    #[test]
    fn bare_invocation_runs_translate() {
        let cli = Cli::try_parse_from(["snowprep"]).unwrap();
        assert!(cli.command.is_none());
        let Command::Translate(args) = cli.into_command() else {
            panic!("expected translate");
        };
        assert_eq!(args.sample_rows, 5);
    }

    #[test]
    fn top_level_translate_flags_are_accepted() {
        let cli = Cli::try_parse_from(["snowprep", "--sample-rows", "3"]).unwrap();
        let Command::Translate(args) = cli.into_command() else {
            panic!("expected translate");
        };
        assert_eq!(args.sample_rows, 3);
    }
}
