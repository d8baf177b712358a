//! Command-line interface for the contrib-grid binary.
//!
//! Lists a repository's contributors, renders their avatars into a grid and
//! saves the result as an SVG file.

use std::{path::PathBuf, process, time::Duration};

use clap::{ArgAction, CommandFactory, Parser};
use contrib_grid::{
    AvatarUrl, DEFAULT_AVATAR_SIZE, DEFAULT_COLUMNS, DEFAULT_LIMIT, Error, GenerateOutcome,
    GenerateRequest, GridOptions, HttpAvatarFetcher, ListOptions, OUTPUT_FILE, generate,
};
use indicatif::{ProgressBar, ProgressStyle};
use octocrab::Octocrab;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Printed when the owner or repository name is missing.
const MISSING_REPO_MESSAGE: &str = "Please provide a repo owner and repo name";

/// Command line interface for rendering contributor avatars.
#[derive(Debug, Parser,)]
#[command(name = "contrib-grid", version, about = "Render repository contributors as an SVG grid")]
struct Cli
{
    /// Account that owns the repository.
    #[arg(short = 'o', long = "owner", value_name = "OWNER")]
    owner: Option<String,>,

    /// Repository name.
    #[arg(short = 'n', long = "name", value_name = "REPO")]
    name: Option<String,>,

    /// Avatar edge length in pixels (clamped to 460).
    #[arg(short = 's', long = "size", default_value_t = DEFAULT_AVATAR_SIZE)]
    size: u32,

    /// Maximum number of contributors to include.
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_LIMIT)]
    limit: u32,

    /// Number of avatars per row.
    #[arg(short = 'c', long = "columns", default_value_t = DEFAULT_COLUMNS)]
    columns: u32,

    /// API token used to authenticate requests.
    #[arg(short = 't', long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Keep accounts whose handle ends in `[bot]` or `-bot`.
    #[arg(long = "include-bots", action = ArgAction::SetTrue)]
    include_bots: bool,

    /// Build avatar URLs from a template; `{id}` is replaced by the account id.
    #[arg(long = "avatar-template", value_name = "TEMPLATE")]
    avatar_template: Option<String,>,

    /// Destination of the rendered SVG.
    #[arg(long = "output", value_name = "PATH", default_value = OUTPUT_FILE)]
    output: PathBuf,
}

impl Cli
{
    /// Converts parsed flags into a run request.
    ///
    /// Returns `Ok(None)` when the owner or repository name is missing.
    fn into_request(self,) -> Result<Option<GenerateRequest,>, Error,>
    {
        let (Some(owner,), Some(repo,),) = (non_empty(self.owner,), non_empty(self.name,),) else {
            return Ok(None,);
        };

        let avatar_url = match self.avatar_template {
            Some(template,) => AvatarUrl::UserIdTemplate(template,),
            None => AvatarUrl::AsReturned,
        };

        Ok(Some(GenerateRequest {
            owner,
            repo,
            list: ListOptions::new(self.limit, self.include_bots, avatar_url,)?,
            grid: GridOptions::new(self.size, self.columns,)?,
            output: self.output,
        },),)
    }
}

fn non_empty(value: Option<String,>,) -> Option<String,>
{
    value.map(|value| value.trim().to_owned(),).filter(|value| !value.is_empty(),)
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(std::io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates client construction, validation and write failures.
async fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();
    let token = cli.token.clone();

    let Some(request,) = cli.into_request()? else {
        println!("{MISSING_REPO_MESSAGE}");
        println!("{}", Cli::command().render_usage());
        return Ok((),);
    };

    let source = build_client(token.as_deref(),)?;
    let fetcher = HttpAvatarFetcher::new()?;

    let spinner = spinner(format!("Rendering contributors of {}/{}", request.owner, request.repo),);
    let outcome = generate(&source, &fetcher, &request,).await;
    spinner.finish_and_clear();

    report(outcome?,);
    Ok((),)
}

fn build_client(token: Option<&str,>,) -> Result<Octocrab, Error,>
{
    let mut builder = Octocrab::builder();
    if let Some(token,) = token.filter(|value| !value.is_empty(),) {
        builder = builder.personal_token(token,);
    }

    builder.build().map_err(|e| Error::service(format!("failed to initialize GitHub client: {e}"),),)
}

fn spinner(message: String,) -> ProgressBar
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style,) =
        ProgressStyle::default_spinner().template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
    {
        spinner.set_style(style,);
    }
    spinner.set_message(message,);
    spinner.enable_steady_tick(Duration::from_millis(100,),);
    spinner
}

/// User-facing summary line for a finished run.
fn outcome_message(outcome: &GenerateOutcome,) -> &'static str
{
    match outcome {
        GenerateOutcome::NoContributors {
            ..
        } => "No contributors found",
        GenerateOutcome::Written {
            ..
        } => "The file has been saved!",
    }
}

fn report(outcome: GenerateOutcome,)
{
    let message = outcome_message(&outcome,);
    match outcome {
        GenerateOutcome::NoContributors {
            ..
        } => println!("{message}"),
        GenerateOutcome::Written {
            path,
            contributors,
            placeholders,
            failed_pages,
        } => {
            info!(
                "Rendered {} contributor(s), {} placeholder(s), {} failed page(s)",
                contributors, placeholders, failed_pages
            );
            println!("{message} ({})", path.display());
        }
    }
}
