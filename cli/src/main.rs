//! unlayout CLI - document hierarchy reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unlayout::{
    detect, document_name, render, AnalyzeResult, ClassifierKind, Document, HierarchyOptions,
    HierarchyStats, JsonFormat, OrderingScheme, RenderOptions, Unlayout,
};

#[derive(Parser)]
#[command(name = "unlayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Rebuild section, paragraph and sentence hierarchies from layout analysis results",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a hierarchy JSON from an analysis result
    Build {
        /// Analysis result JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document name (defaults to the input file name)
        #[arg(long)]
        name: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        hierarchy: HierarchyArgs,
    },

    /// Render the hierarchy of an analysis result as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Analysis result JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Put each sentence on its own line
        #[arg(long)]
        sentences: bool,

        /// Leave out sections without paragraphs
        #[arg(long)]
        skip_empty: bool,

        #[command(flatten)]
        hierarchy: HierarchyArgs,
    },

    /// Render the hierarchy of an analysis result as plain text
    Text {
        /// Analysis result JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Put each sentence on its own line
        #[arg(long)]
        sentences: bool,

        #[command(flatten)]
        hierarchy: HierarchyArgs,
    },

    /// Show hierarchy statistics
    Info {
        /// Analysis result JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        hierarchy: HierarchyArgs,
    },

    /// Build hierarchies for many analysis results
    Batch {
        /// Analysis result JSON files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        hierarchy: HierarchyArgs,
    },

    /// Detect the format of a source document
    Detect {
        /// Source document (PDF or image)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that builds a hierarchy.
#[derive(Args)]
struct HierarchyArgs {
    /// Heading detection strategy (required; no strategy is assumed)
    #[arg(long, value_enum, env = "UNLAYOUT_CLASSIFIER")]
    classifier: ClassifierArg,

    /// Extra role treated as a heading by the role classifier (repeatable)
    #[arg(long = "heading-role", value_name = "ROLE")]
    heading_roles: Vec<String>,

    /// Reading-order scheme
    #[arg(long, value_enum, env = "UNLAYOUT_ORDER", default_value = "span")]
    order: OrderArg,

    /// Fail on out-of-order input instead of sorting it
    #[arg(long)]
    presorted: bool,

    /// Normalize text to Unicode NFC
    #[arg(long)]
    nfc: bool,

    /// Length bound for colon-terminated headings (shape classifier)
    #[arg(long, default_value = "100")]
    heading_max_chars: usize,
}

impl HierarchyArgs {
    fn to_options(&self) -> HierarchyOptions {
        let mut options = HierarchyOptions::new()
            .with_classifier(self.classifier.into())
            .with_extra_heading_roles(self.heading_roles.iter().cloned())
            .with_ordering(self.order.into())
            .with_heading_max_chars(self.heading_max_chars)
            .with_unicode_normalization(self.nfc);
        if self.presorted {
            options = options.presorted();
        }
        options
    }

    fn unlayout(&self) -> Unlayout {
        Unlayout::with_options(self.to_options())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ClassifierArg {
    /// Headings are paragraphs labelled title, subtitle, heading or header
    Role,
    /// Headings are titles, or short paragraphs ending in a colon
    Shape,
}

impl From<ClassifierArg> for ClassifierKind {
    fn from(arg: ClassifierArg) -> Self {
        match arg {
            ClassifierArg::Role => ClassifierKind::Role,
            ClassifierArg::Shape => ClassifierKind::Shape,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    /// Ascending offset of the first span
    Span,
    /// Page, then top-left vertical position
    Spatial,
}

impl From<OrderArg> for OrderingScheme {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Span => OrderingScheme::SpanOffset,
            OrderArg::Spatial => OrderingScheme::Spatial,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            name,
            compact,
            hierarchy,
        } => cmd_build(
            &input,
            output.as_deref(),
            name.as_deref(),
            compact,
            &hierarchy,
        ),
        Commands::Markdown {
            input,
            output,
            sentences,
            skip_empty,
            hierarchy,
        } => cmd_markdown(&input, output.as_deref(), sentences, skip_empty, &hierarchy),
        Commands::Text {
            input,
            output,
            sentences,
            hierarchy,
        } => cmd_text(&input, output.as_deref(), sentences, &hierarchy),
        Commands::Info {
            input,
            json,
            hierarchy,
        } => cmd_info(&input, json, &hierarchy),
        Commands::Batch {
            inputs,
            output,
            compact,
            hierarchy,
        } => cmd_batch(&inputs, &output, compact, &hierarchy),
        Commands::Detect { input } => cmd_detect(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_document(
    input: &Path,
    name: Option<&str>,
    hierarchy: &HierarchyArgs,
) -> Result<Document, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let result = AnalyzeResult::from_json(&json)?;
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| document_name(input));

    log::info!(
        "Building {} from {} paragraphs",
        name,
        result.paragraph_count()
    );
    Ok(hierarchy.unlayout().build_analysis(&name, &result)?)
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

/// Output path for a batch input: `<stem>.hierarchy.json` in `output_dir`.
fn hierarchy_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.hierarchy.json", stem))
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    name: Option<&str>,
    compact: bool,
    hierarchy: &HierarchyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input, name, hierarchy)?;
    let format = json_format(compact);

    if let Some(path) = output {
        render::write_json(&doc, path, format)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", render::to_json(&doc, format)?);
    }

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    sentences: bool,
    skip_empty: bool,
    hierarchy: &HierarchyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input, None, hierarchy)?;

    let render_options = RenderOptions::new()
        .with_sentence_per_line(sentences)
        .with_empty_sections(!skip_empty);
    let markdown = render::to_markdown(&doc, &render_options)?;

    emit(&markdown, output)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    sentences: bool,
    hierarchy: &HierarchyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input, None, hierarchy)?;

    let render_options = RenderOptions::new().with_sentence_per_line(sentences);
    let text = render::to_text(&doc, &render_options)?;

    emit(&text, output)
}

fn cmd_info(
    input: &Path,
    json: bool,
    hierarchy: &HierarchyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input, None, hierarchy)?;
    let stats = HierarchyStats::collect(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Document".bold(), doc.name);
    println!(
        "{}: {}",
        "Classifier".bold(),
        ClassifierKind::from(hierarchy.classifier)
    );
    println!("{}: {}", "Order".bold(), OrderingScheme::from(hierarchy.order));

    println!();
    println!("{}", "Hierarchy Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Empty sections".bold(), stats.empty_section_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Sentences".bold(), stats.sentence_count);
    println!(
        "{}: {:.2}",
        "Sentences/paragraph".bold(),
        stats.sentences_per_paragraph()
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if !doc.is_empty() {
        println!();
        println!("{}", "Sections".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, section) in doc.sections.iter().enumerate() {
            let branch = if i + 1 == doc.sections.len() {
                "└─"
            } else {
                "├─"
            };
            println!(
                "  {} {} ({} paragraphs)",
                branch.dimmed(),
                section.title,
                section.paragraphs.len()
            );
        }
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    compact: bool,
    hierarchy: &HierarchyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Build in parallel, then write in input order
    pb.set_message("Building hierarchies...");
    let results = hierarchy.unlayout().build_files(inputs);

    let format = json_format(compact);
    let mut total = HierarchyStats::new();
    let mut failures = Vec::new();

    for (input, result) in inputs.iter().zip(results) {
        pb.set_message(document_name(input));
        let written = result.and_then(|doc| {
            render::write_json(&doc, hierarchy_path(input, output_dir), format)?;
            Ok(doc)
        });
        match written {
            Ok(doc) => total.merge(&HierarchyStats::collect(&doc)),
            Err(e) => {
                log::warn!("Failed to process {}: {}", input.display(), e);
                failures.push((input, e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} documents, {} sections, {} paragraphs",
        "Built".green().bold(),
        total.document_count,
        total.section_count,
        total.paragraph_count
    );

    if failures.is_empty() {
        return Ok(());
    }

    println!("\n{}", "Failed:".red().bold());
    for (i, (input, e)) in failures.iter().enumerate() {
        let branch = if i + 1 == failures.len() {
            "└─"
        } else {
            "├─"
        };
        println!("  {} {}: {}", branch.dimmed(), input.display(), e);
    }

    Err(format!("{} of {} inputs failed", failures.len(), inputs.len()).into())
}

fn cmd_detect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = unlayout::detect_format_from_path(input)?;

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "MIME type".bold(), format.mime_type());

    if format == unlayout::SourceFormat::Pdf {
        let data = fs::read(input)?;
        if let Some(version) = detect::pdf_version(&data) {
            println!("{}: {}", "PDF version".bold(), version);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unlayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document hierarchy reconstruction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unlayout".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(classifier: ClassifierArg, order: OrderArg) -> HierarchyArgs {
        HierarchyArgs {
            classifier,
            heading_roles: Vec::new(),
            order,
            presorted: false,
            nfc: false,
            heading_max_chars: 100,
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "unlayout",
            "build",
            "in.json",
            "--classifier",
            "shape",
            "--order",
            "spatial",
            "--nfc",
            "-o",
            "out.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Build {
                input,
                output,
                hierarchy,
                ..
            } => {
                assert_eq!(input, PathBuf::from("in.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                let options = hierarchy.to_options();
                assert_eq!(options.classifier, ClassifierKind::Shape);
                assert_eq!(options.ordering, OrderingScheme::Spatial);
                assert!(options.normalize_unicode);
                assert!(options.sort);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_classifier_must_be_chosen() {
        if std::env::var_os("UNLAYOUT_CLASSIFIER").is_some() {
            return;
        }
        assert!(Cli::try_parse_from(["unlayout", "build", "in.json"]).is_err());
        assert!(
            Cli::try_parse_from(["unlayout", "build", "in.json", "--classifier", "role"]).is_ok()
        );
    }

    #[test]
    fn test_heading_role_flag() {
        let cli = Cli::try_parse_from([
            "unlayout",
            "info",
            "in.json",
            "--classifier",
            "role",
            "--heading-role",
            "sectionHeading",
        ])
        .unwrap();

        match cli.command {
            Commands::Info { hierarchy, .. } => {
                let options = hierarchy.to_options();
                assert_eq!(options.extra_heading_roles, vec!["sectionHeading"]);
            }
            _ => panic!("expected info command"),
        }
    }

    #[test]
    fn test_hierarchy_path() {
        assert_eq!(
            hierarchy_path(Path::new("scans/report.json"), Path::new("out")),
            PathBuf::from("out/report.hierarchy.json")
        );
    }

    #[test]
    fn test_load_document_names_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("memo.json");
        fs::write(
            &input,
            r#"{"paragraphs": [
                {"content": "Agenda:", "spans": [{"offset": 0, "length": 7}]},
                {"content": "Budget review.", "spans": [{"offset": 8, "length": 14}]}
            ]}"#,
        )
        .unwrap();

        let doc = load_document(&input, None, &args(ClassifierArg::Shape, OrderArg::Span)).unwrap();
        assert_eq!(doc.name, "memo.json");
        assert_eq!(doc.titles(), vec!["Agenda:"]);

        let renamed =
            load_document(&input, Some("memo.pdf"), &args(ClassifierArg::Role, OrderArg::Span))
                .unwrap();
        assert_eq!(renamed.name, "memo.pdf");
        assert_eq!(renamed.titles(), vec![unlayout::UNTITLED_SECTION]);
    }

    #[test]
    fn test_batch_writes_outputs_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, r#"{"paragraphs": []}"#).unwrap();
        fs::write(&bad, r#"{"status": "failed"}"#).unwrap();
        let out = dir.path().join("out");

        let result = cmd_batch(
            &[good, bad],
            &out,
            true,
            &args(ClassifierArg::Role, OrderArg::Span),
        );

        assert!(result.is_err());
        let written = fs::read_to_string(out.join("good.hierarchy.json")).unwrap();
        assert_eq!(written, "{\"Document\":\"good.json\",\"Sections\":[]}\n");
        assert!(!out.join("bad.hierarchy.json").exists());
    }
}
