//! create command - Create a new Goth Stack project

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::identity;
use crate::scaffold::{
    self, Context, CreateError, CreateRequest, CreatedProject, GitCliFetcher, TemplateSource,
    TreeFetcher,
};
use crate::ui::{output, prompts};

/// Prompt shown when asking for the account name.
pub const ACCOUNT_PROMPT: &str = "Enter your GitHub username: ";

/// Commands suggested after a successful create, minus the leading `cd`.
pub const NEXT_STEPS: &[&str] = &["make setup", "make dev"];

/// Create a new project in `ctx.cwd`, prompting on the terminal.
pub fn create(ctx: &Context, project_name: &str) -> Result<()> {
    // Reject a bad name before touching config, stdin, or the disk.
    identity::project_dir_name(project_name).map_err(CreateError::from)?;

    let config = Config::load().context("Failed to load config")?;
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("Loaded config from {}", path.display()), ctx.verbosity);
    }
    let source = TemplateSource::from_config(&config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let project = create_with(
        ctx,
        project_name,
        source,
        &mut input,
        &mut stdout,
        &GitCliFetcher::new(),
    )?;

    report_success(ctx, &project);
    Ok(())
}

/// Create a new project with injected input, output, and fetcher.
///
/// Reads the account name from `input` after writing the prompt to
/// `output`.
pub fn create_with(
    ctx: &Context,
    project_name: &str,
    source: TemplateSource,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    fetcher: &dyn TreeFetcher,
) -> Result<CreatedProject> {
    let project_name = identity::project_dir_name(project_name).map_err(CreateError::from)?;

    let account = prompts::input_line(ACCOUNT_PROMPT, input, output)
        .context("Error reading GitHub username")?;

    let request = CreateRequest {
        project_name: project_name.to_string(),
        account,
        source,
    };

    Ok(scaffold::create_project(ctx, &request, fetcher)?)
}

fn report_success(ctx: &Context, project: &CreatedProject) {
    let v = ctx.verbosity;

    output::success(
        format!(
            "Successfully created new Goth Stack project '{}'!",
            project.name
        ),
        v,
    );
    output::debug(format!("Module path: {}", project.module), v);

    let cd = format!("cd {}", project.name);
    let steps: Vec<&str> = std::iter::once(cd.as_str())
        .chain(NEXT_STEPS.iter().copied())
        .collect();
    output::print("Next steps:", v);
    output::print(output::format_steps(&steps), v);
}
