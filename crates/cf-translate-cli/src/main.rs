//! cf-translate CLI - translate Codeforces problems into a docs tree

use cf_translate::fetchers::CODEFORCES_URL;
use cf_translate::translate::{LIBRETRANSLATE_URL, MYMEMORY_URL};
use cf_translate::{
    load_batch, normalize_index, CodeforcesFetcher, Error, LibreTranslate, MyMemory, Pipeline,
    ProblemId, TranslatorChain, DEFAULT_AUTHOR,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "cf_translate=info,cf_translate_cli=info";
const VERBOSE_FILTER: &str = "cf_translate=debug,cf_translate_cli=debug";

/// Translate a Codeforces problem statement into Chinese and English docs
#[derive(Parser, Debug)]
#[command(name = "cf-translate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Contest id, e.g. 1850
    #[arg(required_unless_present = "config")]
    contest_id: Option<u32>,

    /// Problem index, e.g. A or B1
    #[arg(required_unless_present = "config", value_parser = parse_problem_index)]
    problem_index: Option<String>,

    /// Repository root containing docs/
    #[arg(long, default_value = ".")]
    repo_root: PathBuf,

    /// Author written into the translated front matter
    #[arg(long, default_value = DEFAULT_AUTHOR)]
    author: String,

    /// JSON batch list of problems
    #[arg(long, conflicts_with_all = ["contest_id", "problem_index"])]
    config: Option<PathBuf>,

    /// Overwrite documents that already exist
    #[arg(long)]
    force: bool,

    /// Problem site root
    #[arg(long, env = "CF_TRANSLATE_SITE_URL", default_value = CODEFORCES_URL)]
    site_url: String,

    /// LibreTranslate instance
    #[arg(long, env = "CF_TRANSLATE_LIBRE_URL", default_value = LIBRETRANSLATE_URL)]
    libretranslate_url: String,

    /// MyMemory API root
    #[arg(long, env = "CF_TRANSLATE_MYMEMORY_URL", default_value = MYMEMORY_URL)]
    mymemory_url: String,

    /// Custom User-Agent for problem pages
    #[arg(long)]
    user_agent: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_problem_index(s: &str) -> Result<String, String> {
    normalize_index(s).map_err(|e| format!("{} (expected e.g. A, B1 or AA)", e))
}

impl Cli {
    fn build_pipeline(&self) -> Pipeline {
        let mut fetcher = CodeforcesFetcher::with_base_url(&self.site_url);
        if let Some(ref ua) = self.user_agent {
            fetcher = fetcher.user_agent(ua);
        }

        let translator = TranslatorChain::new()
            .with_backend(Box::new(LibreTranslate::with_base_url(
                &self.libretranslate_url,
            )))
            .with_backend(Box::new(MyMemory::with_base_url(&self.mymemory_url)));

        Pipeline::builder()
            .repo_root(&self.repo_root)
            .author(&self.author)
            .force(self.force)
            .fetcher(Box::new(fetcher))
            .translator(translator)
            .build()
    }

    /// The single problem named on the command line, if any
    fn single_problem(&self) -> Option<ProblemId> {
        match (self.contest_id, self.problem_index.as_deref()) {
            (Some(contest_id), Some(index)) => Some(ProblemId::new(contest_id, index)),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        error!(error = %e, "Aborted");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let pipeline = cli.build_pipeline();

    if let Some(ref path) = cli.config {
        let problems = load_batch(path).await?;
        info!(path = %path.display(), count = problems.len(), "Loaded batch list");
        pipeline.run_batch(&problems).await;
        return Ok(());
    }

    match cli.single_problem() {
        // Failures are logged by the pipeline; the run itself completed
        Some(id) => {
            let _ = pipeline.run(&id).await;
            Ok(())
        }
        None => Err(Error::BatchConfig(
            "no problem given and no --config".to_string(),
        )),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cf-translate").chain(args.iter().copied()))
    }

    #[test]
    fn test_single_problem_defaults() {
        let cli = parse(&["1850", "a"]).unwrap();
        assert_eq!(cli.single_problem(), Some(ProblemId::new(1850, "A")));
        assert_eq!(cli.repo_root, PathBuf::from("."));
        assert_eq!(cli.author, "github-actions");
        assert!(!cli.force);
        assert!(cli.config.is_none());
        assert!(cli.user_agent.is_none());
    }

    #[test]
    fn test_batch_mode() {
        let cli = parse(&["--config", "problems.json", "--force"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("problems.json")));
        assert!(cli.force);
        assert_eq!(cli.single_problem(), None);
    }

    #[test]
    fn test_missing_problem_is_usage_error() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["1850"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_config_conflicts_with_positionals() {
        let err = parse(&["1850", "A", "--config", "problems.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_invalid_contest_id() {
        let err = parse(&["abc", "A"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_invalid_problem_index() {
        for index in ["../../outside", "a) |x", "ABC", "7"] {
            let err = parse(&["4", index]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{:?}", index);
        }
        let cli = parse(&["4", "b1"]).unwrap();
        assert_eq!(cli.problem_index.as_deref(), Some("B1"));
    }

    #[test]
    fn test_service_overrides() {
        let cli = parse(&[
            "4",
            "A",
            "--site-url",
            "http://localhost:1",
            "--libretranslate-url",
            "http://localhost:2",
            "--mymemory-url",
            "http://localhost:3",
            "--user-agent",
            "test-agent",
            "--repo-root",
            "/tmp/repo",
            "--author",
            "someone",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.site_url, "http://localhost:1");
        assert_eq!(cli.libretranslate_url, "http://localhost:2");
        assert_eq!(cli.mymemory_url, "http://localhost:3");
        assert_eq!(cli.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(cli.author, "someone");
        assert!(cli.verbose);

        let pipeline = cli.build_pipeline();
        assert_eq!(pipeline.layout().root(), std::path::Path::new("/tmp/repo"));
    }
}
