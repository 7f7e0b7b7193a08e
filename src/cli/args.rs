// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for formbind

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formbind")]
#[command(about = "Resolve widget property templates and fire event-bound commands")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Strip comments and expand includes, printing the result
    Preprocess {
        #[arg(help = "Path to the document to preprocess")]
        file: PathBuf,
    },

    /// Resolve `{widget.property}` commands in a template against a fixture
    Resolve {
        #[arg(help = "Path to the widget fixture (YAML or JSON)")]
        fixture: PathBuf,

        #[arg(help = "Template text to resolve")]
        template: String,
    },

    /// Fire one trigger from a fixture and wait for it to finish
    Fire {
        #[arg(help = "Path to the widget fixture (YAML or JSON)")]
        fixture: PathBuf,

        #[arg(short, long, help = "Name of the object that emits the event")]
        object: String,

        #[arg(short, long, help = "Event name, e.g. 'clicked()'")]
        event: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fire() {
        let args = Args::try_parse_from([
            "formbind",
            "-v",
            "fire",
            "form.yaml",
            "--object",
            "btn",
            "--event",
            "clicked()",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Commands::Fire {
                fixture,
                object,
                event,
            } => {
                assert_eq!(fixture, PathBuf::from("form.yaml"));
                assert_eq!(object, "btn");
                assert_eq!(event, "clicked()");
            }
            _ => panic!("expected fire"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["formbind", "preprocess", "main.ui", "--no-color", "-c", "x.yaml"])
                .unwrap();
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("x.yaml")));
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Args::try_parse_from(["formbind"]).is_err());
    }
}
