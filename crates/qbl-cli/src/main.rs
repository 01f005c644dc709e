//! qbl — the user-facing command-line interface.
//!
//! Batch pipeline: load question files, validate, optionally generate a
//! tag-constrained subset, reorder, then render to the chosen format.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qbl_core::bank::{self, QuestionBank};
use qbl_core::model::Question;
use qbl_core::order::{self, OrderPolicy};
use qbl_core::select::GenerateOptions;

mod config;

use config::{infer_format, Format, OutputTarget};

/// One `--sample TAG[=COUNT]` argument.
#[derive(Debug, Clone)]
struct SampleSpec {
    tag: String,
    count: usize,
}

fn parse_sample(s: &str) -> Result<SampleSpec, String> {
    match s.split_once('=') {
        Some((tag, count)) => {
            let count: usize = count
                .parse()
                .map_err(|_| format!("invalid sample count '{count}'"))?;
            if count == 0 {
                return Err("sample count must be at least 1".to_string());
            }
            Ok(SampleSpec {
                tag: tag.to_string(),
                count,
            })
        }
        None => Ok(SampleSpec {
            tag: s.to_string(),
            count: 1,
        }),
    }
}

fn parse_order(s: &str) -> Result<OrderPolicy, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "qbl", version, about = "Question Bank Language quiz generator")]
struct Cli {
    /// Question files in QBL format
    #[arg(value_name = "FILE", required = true)]
    question_files: Vec<PathBuf>,

    /// Randomly generate this many questions
    #[arg(short = 'g', long, value_name = "COUNT")]
    generate: Option<usize>,

    /// Output file name; web output derives .js/.css siblings from its stem
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Random number seed (unseeded runs draw from OS entropy)
    #[arg(short = 'S', long, value_name = "SEED")]
    seed: Option<u64>,

    /// Quiz/exam title to use in generated files
    #[arg(short = 't', long, default_value = "Multiple Choice Quiz")]
    title: String,

    /// Output in D2L / Brightspace csv quiz upload format
    #[arg(short = 'd', long, group = "format")]
    d2l: bool,

    /// Output in LaTeX format suitable for GradeScope
    #[arg(short = 'G', long, group = "format")]
    gradescope: bool,

    /// Output in LaTeX format
    #[arg(short = 'l', long, group = "format")]
    latex: bool,

    /// Output in QBL format
    #[arg(short = 'q', long, group = "format")]
    qbl: bool,

    /// Output in HTML/CSS/JS format
    #[arg(short = 'w', long, group = "format")]
    web: bool,

    /// Print extra debug information
    #[arg(short = 'D', long, group = "format")]
    debug: bool,

    /// Question order: "random", "id", or "alpha"
    #[arg(short = 'O', long, value_name = "ORDER", value_parser = parse_order)]
    order: Option<OrderPolicy>,

    /// Make questions take less space (GradeScope output only)
    #[arg(short = 'c', long)]
    compressed: bool,

    /// Include ALL questions with this tag, unless otherwise excluded
    #[arg(short = 'i', long = "include", value_name = "TAG")]
    include: Vec<String>,

    /// Exclude ALL questions with this tag (overrides includes)
    #[arg(short = 'x', long = "exclude", value_name = "TAG")]
    exclude: Vec<String>,

    /// Only questions with this tag can be included
    #[arg(short = 'r', long = "require", value_name = "TAG")]
    require: Vec<String>,

    /// Guarantee COUNT (default 1) distinct questions with TAG
    #[arg(short = 's', long = "sample", value_name = "TAG[=COUNT]", value_parser = parse_sample)]
    sample: Vec<SampleSpec>,

    /// File of question ids to avoid; a previous run's --log output works here
    #[arg(short = 'a', long = "avoid", value_name = "FILE")]
    avoid: Vec<PathBuf>,

    /// Log the ids of the chosen questions to FILE
    #[arg(short = 'L', long = "log", value_name = "FILE")]
    log: Option<PathBuf>,
}

impl Cli {
    fn explicit_format(&self) -> Option<Format> {
        if self.d2l {
            Some(Format::D2l)
        } else if self.gradescope {
            Some(Format::GradeScope)
        } else if self.latex {
            Some(Format::Latex)
        } else if self.qbl {
            Some(Format::Qbl)
        } else if self.web {
            Some(Format::Web)
        } else if self.debug {
            Some(Format::Debug)
        } else {
            None
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qbl=info".parse().unwrap())
                .add_directive("qbl_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let target = cli
        .output
        .as_deref()
        .map(OutputTarget::resolve)
        .transpose()?;

    // Precedence: explicit flag > output extension > canonical default.
    let format = cli
        .explicit_format()
        .or_else(|| target.as_ref().and_then(|t| infer_format(&t.extension)))
        .unwrap_or(Format::Qbl);

    let mut bank = QuestionBank::new();
    for file in &cli.question_files {
        bank.load_file(file)?;
    }

    let diagnostics = bank.validate();
    if !diagnostics.is_empty() {
        for d in &diagnostics {
            eprintln!("{d}");
        }
        bail!("{} validation error(s) in question bank", diagnostics.len());
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let generate_count = cli.generate.unwrap_or(0);
    let mut questions: Vec<Question> = if generate_count > 0 {
        let avoid_ids: Vec<HashSet<String>> = cli
            .avoid
            .iter()
            .map(|path| bank::load_avoid_file(path))
            .collect::<Result<_>>()?;
        let opts = GenerateOptions {
            count: generate_count,
            include_tags: cli.include.clone(),
            exclude_tags: cli.exclude.clone(),
            require_tags: cli.require.clone(),
            sample_tags: cli
                .sample
                .iter()
                .flat_map(|s| std::iter::repeat(s.tag.clone()).take(s.count))
                .collect(),
            avoid_ids,
        };
        let selection = bank.generate(&opts, &mut rng)?;
        if selection.shortfall > 0 {
            tracing::warn!(
                "only {} of {} requested questions were available",
                selection.questions.len(),
                generate_count
            );
        }
        selection.questions
    } else {
        bank.questions().to_vec()
    };

    // Generation implies random order unless the user chose one.
    let policy = cli.order.unwrap_or(if generate_count > 0 {
        OrderPolicy::Random
    } else {
        OrderPolicy::Default
    });
    order::apply(policy, &mut questions, &mut rng);

    if let Some(log_path) = &cli.log {
        bank::write_selection_log(log_path, &questions)?;
    }

    if format == Format::Web {
        let Some(target) = &target else {
            bail!("web output must go to files; provide --output FILE");
        };
        // Render all three artifacts before writing any of them, so a
        // rendering failure never leaves markup without its script.
        let artifacts = qbl_render::web::render(&questions, &cli.title, &target.stem);
        let html_path = if target.extension.is_empty() {
            target.sibling("html")
        } else {
            target.main_path()
        };
        write_output(&html_path, &artifacts.html)?;
        write_output(&target.sibling("js"), &artifacts.js)?;
        write_output(&target.sibling("css"), &artifacts.css)?;
        return Ok(());
    }

    let body = match format {
        Format::Qbl => qbl_render::qbl::render(&questions),
        Format::D2l => qbl_render::d2l::render(&questions),
        Format::GradeScope => {
            qbl_render::gradescope::render(&questions, &cli.title, cli.compressed)
        }
        Format::Latex => qbl_render::latex::render(&questions, &cli.title),
        Format::Debug => debug_report(&cli, format, &questions),
        Format::Web => unreachable!("web output handled above"),
    };

    match &target {
        Some(target) => write_output(&target.main_path(), &body)?,
        None => print!("{body}"),
    }

    Ok(())
}

fn write_output(path: &std::path::Path, body: &str) -> Result<()> {
    std::fs::write(path, body)
        .with_context(|| format!("failed to write output file: {}", path.display()))
}

/// The `--debug` format: echo the effective configuration, then dump the
/// working question sequence.
fn debug_report(cli: &Cli, format: Format, questions: &[Question]) -> String {
    let samples: Vec<String> = cli
        .sample
        .iter()
        .map(|s| format!("{}x{}", s.tag, s.count))
        .collect();
    let mut out = String::new();
    out.push_str(&format!("Question files: {:?}\n", cli.question_files));
    out.push_str(&format!("Output format: {format}\n"));
    out.push_str(&format!("Generate count: {}\n", cli.generate.unwrap_or(0)));
    out.push_str(&format!("Include tags: {:?}\n", cli.include));
    out.push_str(&format!("Exclude tags: {:?}\n", cli.exclude));
    out.push_str(&format!("Required tags: {:?}\n", cli.require));
    out.push_str(&format!("Sampled tags: {samples:?}\n"));
    out.push_str(&format!("Avoid files: {:?}\n", cli.avoid));
    out.push_str("----------\n");
    out.push_str(&qbl_render::debug::render(questions));
    out
}
