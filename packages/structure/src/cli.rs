//! Command-line interface for structure extraction.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::extractors::extractor_for;
use crate::line::{LineWithMeta, UnstructuredDocument};
use crate::list_features::ListFeaturesExtractor;
use crate::patterns::{patterns_from_str, PatternComposition};
use crate::reader::read_txt_file;
use crate::tree::{TreeConstructor, TreeNode};

/// Width used to wrap line text in listings.
const WRAP_WIDTH: usize = 100;

/// RegelRecht Structure - Reconstruct the logical structure of documents.
#[derive(Parser)]
#[command(name = "regelrecht-structure")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the document tree of a text file.
    Extract {
        /// UTF-8 text file
        file: PathBuf,

        /// Document kind: law, foiv, auto-law, tz, diploma or default
        #[arg(short, long, default_value = "default")]
        kind: String,

        /// Pattern configuration (JSON or YAML) for the default kind
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print every line with its hierarchy level.
    Levels {
        /// UTF-8 text file
        file: PathBuf,

        /// Document kind: law, foiv, auto-law, tz, diploma or default
        #[arg(short, long, default_value = "default")]
        kind: String,

        /// Pattern configuration (JSON or YAML) for the default kind
        #[arg(short, long)]
        patterns: Option<PathBuf>,
    },

    /// Print list prefixes and list features of every line.
    Features {
        /// UTF-8 text file
        file: PathBuf,

        /// Half-width of the feature window (default: from environment or 25)
        #[arg(short, long)]
        window: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ExtractorConfig::from_env();

    match cli.command {
        Commands::Extract {
            file,
            kind,
            patterns,
            format,
            output,
        } => extract_command(&file, &kind, patterns.as_deref(), format, output.as_deref(), config),
        Commands::Levels {
            file,
            kind,
            patterns,
        } => levels_command(&file, &kind, patterns.as_deref(), config),
        Commands::Features { file, window } => {
            features_command(&file, window.unwrap_or(config.window_size))
        }
    }
}

fn load_patterns(path: Option<&Path>) -> Result<Option<PatternComposition>> {
    path.map(|path| patterns_from_str(&std::fs::read_to_string(path)?))
        .transpose()
}

/// Read a file and run the extractor for `kind` over it.
fn process(
    file: &Path,
    kind: &str,
    patterns: Option<&Path>,
    config: ExtractorConfig,
) -> Result<UnstructuredDocument> {
    let patterns = load_patterns(patterns)?;
    let extractor = extractor_for(kind, patterns, config)?;

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    pb.set_message("Reading text...");
    let document = match read_txt_file(file) {
        Ok(document) => document,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message(format!("Extracting {} structure...", extractor.name()));
    let result = extractor.extract(document);
    pb.finish_and_clear();
    result
}

/// Execute the extract command.
fn extract_command(
    file: &Path,
    kind: &str,
    patterns: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
    config: ExtractorConfig,
) -> Result<()> {
    let document = process(file, kind, patterns, config)?;
    let tree = TreeConstructor::new().structure(&document);
    let rendered = render_tree(&tree, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!(
                "{} {} ({} nodes)",
                style("Saved to:").green().bold(),
                path.display(),
                tree.node_count()
            );
        }
        None => print!("{rendered}"),
    }
    for warning in &document.warnings {
        eprintln!("{} {warning}", style("Warning:").yellow().bold());
    }
    Ok(())
}

/// Serialize a tree as JSON or YAML.
pub fn render_tree(tree: &TreeNode, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(tree)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml_ng::to_string(tree)?,
    })
}

/// Execute the levels command.
fn levels_command(file: &Path, kind: &str, patterns: Option<&Path>, config: ExtractorConfig) -> Result<()> {
    let document = process(file, kind, patterns, config)?;
    for line in &document.lines {
        println!("{}", format_level_line(line));
    }
    Ok(())
}

/// One listing entry: level, type and wrapped text.
pub fn format_level_line(line: &LineWithMeta) -> String {
    let level = line.level_or_raw();
    let header = format!("({}, {})", level.level_1, level.level_2);
    let mut entry = format!(
        "{:<12} {:<14}",
        style(header).cyan(),
        style(&level.line_type).bold()
    );

    let text = line.line().trim_end_matches(['\n', '\r']);
    let options = textwrap::Options::new(WRAP_WIDTH).subsequent_indent("                            ");
    let _ = write!(entry, " {}", textwrap::fill(text, options));
    entry
}

/// Execute the features command.
fn features_command(file: &Path, window: usize) -> Result<()> {
    let document = read_txt_file(file)?;
    let extractor = ListFeaturesExtractor::new(window);
    let (prefixes, features) = extractor.one_document(&document.lines);

    println!("{}", style(extractor.feature_names().join("  ")).bold());
    for ((line, prefix), features) in document.lines.iter().zip(&prefixes).zip(&features) {
        if prefix.is_empty() {
            continue;
        }
        let text = line.line().trim();
        println!(
            "{:<10} {:>8} {:.3} {:.3} {:.3}  {}",
            style(prefix.name()).cyan(),
            prefix.prefix(),
            features.same_indent,
            features.predecessor_num_same_indent,
            features.predecessor_num,
            textwrap::fill(text, WRAP_WIDTH)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineMetadata;
    use crate::types::HierarchyLevel;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from(["regelrecht-structure", "extract", "law.txt", "--kind", "law"]);

        let Commands::Extract {
            file,
            kind,
            patterns,
            format,
            output,
        } = cli.command
        else {
            unreachable!("expected extract command");
        };
        assert_eq!(file, PathBuf::from("law.txt"));
        assert_eq!(kind, "law");
        assert!(patterns.is_none());
        assert_eq!(format, OutputFormat::Json);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_levels_with_patterns() {
        let cli = Cli::parse_from([
            "regelrecht-structure",
            "levels",
            "doc.txt",
            "--patterns",
            "patterns.yaml",
        ]);

        let Commands::Levels { kind, patterns, .. } = cli.command else {
            unreachable!("expected levels command");
        };
        assert_eq!(kind, "default");
        assert_eq!(patterns, Some(PathBuf::from("patterns.yaml")));
    }

    #[test]
    fn test_cli_parse_yaml_format() {
        let cli = Cli::parse_from(["regelrecht-structure", "extract", "a.txt", "-f", "yaml"]);
        let Commands::Extract { format, .. } = cli.command else {
            unreachable!("expected extract command");
        };
        assert_eq!(format, OutputFormat::Yaml);
    }

    #[test]
    fn test_format_level_line() {
        console::set_colors_enabled(false);
        let level = HierarchyLevel::new(Some(2), Some(1), false, "list_item");
        let line = LineWithMeta::new("1. Пункт\n", LineMetadata::default().with_hierarchy_level(level), Vec::new());
        let entry = format_level_line(&line);
        assert!(entry.starts_with("(2, 1)"));
        assert!(entry.contains("list_item"));
        assert!(entry.ends_with("1. Пункт"));
    }

    #[test]
    fn test_render_tree_yaml() {
        let tree = TreeConstructor::new().structure(&UnstructuredDocument::default());
        let yaml = render_tree(&tree, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("node_id: '0'"));
    }
}
