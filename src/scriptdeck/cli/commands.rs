//! Dispatch from parsed arguments to `ScriptApi` calls.
//!
//! - `run()`: entry point called by `main.rs`
//! - `init_context()`: resolves the project directory and opens the API
//! - `handle_*()`: one per subcommand, call the API and render the result

use super::clipboard::{copy_to_clipboard, format_for_clipboard};
use super::editor::edit_card;
use super::render::{print_card_list, print_full_cards, print_messages, print_projects};
use super::setup::{Cli, Commands, ProjectsAction};
use clap::Parser;
use scriptdeck::api::{CmdMessage, ScriptApi};
use scriptdeck::config::CONFIG_FILENAME;
use scriptdeck::error::{Result, ScriptError};
use scriptdeck::export::ExportFormat;
use scriptdeck::registry::{self, project_id, ProjectRegistry};
use scriptdeck::store::fs::{FileRepository, CARDS_DIR};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Overrides the registry location, mostly for tests and sandboxes.
pub const CONFIG_DIR_ENV: &str = "SCRIPTDECK_CONFIG_DIR";

struct AppContext {
    api: ScriptApi<FileRepository>,
    root: PathBuf,
    registry_dir: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    scriptdeck::logging::init(cli.verbose);

    let registry_dir = registry_dir();

    // Registry commands don't need an open project
    if let Some(Commands::Projects { action }) = &cli.command {
        return handle_projects(registry_dir.as_deref(), action);
    }

    let mut ctx = init_context(&cli, registry_dir)?;

    match cli.command {
        Some(Commands::Init { title, author }) => handle_init(&mut ctx, title, author),
        Some(Commands::List { authored }) => handle_list(&ctx, authored),
        Some(Commands::View { positions }) => handle_view(&ctx, &positions),
        Some(Commands::Rename { position, title }) => {
            handle_rename(&mut ctx, position, &title.join(" "))
        }
        Some(Commands::Swap { a, b }) => handle_swap(&mut ctx, a, b),
        Some(Commands::Edit { position }) => handle_edit(&mut ctx, position),
        Some(Commands::Write {
            position,
            text,
            stdin,
        }) => handle_write(&mut ctx, position, text, stdin),
        Some(Commands::Outline { plain }) => handle_outline(&ctx, plain),
        Some(Commands::Export { format }) => handle_export(&ctx, &format),
        Some(Commands::Copy { target }) => handle_copy(&ctx, &target),
        Some(Commands::Path { position }) => handle_path(&ctx, position),
        Some(Commands::Projects { .. }) => Ok(()),
        None => handle_list(&ctx, false),
    }
}

fn registry_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => registry::default_dir(),
    }
}

/// A directory already holding cards or a project config.
fn looks_like_project(dir: &Path) -> bool {
    dir.join(CARDS_DIR).is_dir() || dir.join(CONFIG_FILENAME).is_file()
}

/// `--project`, else the current directory when it is a project, else the
/// last opened project, else the current directory.
fn resolve_root(cli: &Cli, registry: Option<&ProjectRegistry>) -> PathBuf {
    if let Some(project) = &cli.project {
        return project.clone();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if looks_like_project(&cwd) {
        return cwd;
    }

    registry
        .and_then(|r| r.last())
        .map(|entry| entry.path.clone())
        .unwrap_or(cwd)
}

/// Absolute form of `root`, resolved through symlinks when it already
/// exists. `init` may name a directory that doesn't exist yet.
fn absolute_root(root: PathBuf) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(&root) {
        return canonical;
    }
    std::path::absolute(&root).unwrap_or(root)
}

fn init_context(cli: &Cli, registry_dir: Option<PathBuf>) -> Result<AppContext> {
    let registry = registry_dir
        .as_deref()
        .and_then(|dir| match ProjectRegistry::load(dir) {
            Ok(registry) => Some(registry),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable project registry");
                None
            }
        });

    let root = absolute_root(resolve_root(cli, registry.as_ref()));
    tracing::debug!(root = %root.display(), "resolved project root");

    let api = ScriptApi::open(FileRepository::new(&root))?;

    if let (Some(dir), Some(mut registry)) = (registry_dir.as_deref(), registry) {
        if registry.touch_path(&root) {
            save_registry(&registry, dir);
        }
    }

    Ok(AppContext {
        api,
        root,
        registry_dir,
    })
}

/// Registry problems never fail a command.
fn save_registry(registry: &ProjectRegistry, dir: &Path) {
    if let Err(e) = registry.save(dir) {
        tracing::warn!(error = %e, "could not update project registry");
    }
}

fn handle_init(ctx: &mut AppContext, title: Option<String>, author: Option<String>) -> Result<()> {
    let result = ctx.api.init(title, author)?;
    print_messages(&result.messages);

    if let Some(dir) = ctx.registry_dir.as_deref() {
        let mut registry = ProjectRegistry::load(dir).unwrap_or_default();
        // The directory exists now, so symlinks resolve the same way later opens see them
        let root = absolute_root(ctx.root.clone());
        let name = ctx
            .api
            .project_title()
            .unwrap_or_else(|| root.display().to_string());
        registry.register(&name, &root);
        save_registry(&registry, dir);
    }
    Ok(())
}

fn handle_list(ctx: &AppContext, authored: bool) -> Result<()> {
    let result = ctx.api.list(authored)?;
    print_card_list(&result.listed_cards);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, positions: &[usize]) -> Result<()> {
    let result = ctx.api.view(positions)?;
    print_full_cards(&result.listed_cards);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, position: usize, title: &str) -> Result<()> {
    let result = ctx.api.rename(position, title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_swap(ctx: &mut AppContext, a: usize, b: usize) -> Result<()> {
    let result = ctx.api.swap(a, b)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, position: usize) -> Result<()> {
    let card = ctx
        .api
        .view(&[position])?
        .listed_cards
        .into_iter()
        .next()
        .ok_or(ScriptError::OutOfRange { position })?;

    let edited = edit_card(&card)?;
    let result = ctx.api.update_card(position, &edited.title, &edited.body)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_write(
    ctx: &mut AppContext,
    position: usize,
    text: Option<String>,
    stdin: bool,
) -> Result<()> {
    let body = if stdin {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| ScriptError::Api(format!("Failed to read stdin: {}", e)))?;
        buffer
    } else {
        text.ok_or_else(|| {
            ScriptError::Api("Provide the body text or pass --stdin".to_string())
        })?
    };

    let result = ctx.api.set_body(position, &body)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_outline(ctx: &AppContext, plain: bool) -> Result<()> {
    let result = ctx.api.outline(!plain)?;
    if let Some(text) = &result.text {
        print!("{}", text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, format: &str) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let result = ctx.api.export(format)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &AppContext, target: &str) -> Result<()> {
    let (text, what) = if target.eq_ignore_ascii_case("outline") {
        (ctx.api.get_outline(), "Outline".to_string())
    } else {
        let position: usize = target.parse().map_err(|_| {
            ScriptError::Api(format!(
                "Expected a card position or \"outline\", got '{}'",
                target
            ))
        })?;
        let card = ctx
            .api
            .view(&[position])?
            .listed_cards
            .into_iter()
            .next()
            .ok_or(ScriptError::OutOfRange { position })?;
        (format_for_clipboard(&card.body), format!("Card {}", position))
    };

    if text.is_empty() {
        print_messages(&[CmdMessage::warning(format!("{} is empty", what))]);
        return Ok(());
    }

    copy_to_clipboard(&text)?;
    print_messages(&[CmdMessage::success(format!("{} copied to clipboard", what))]);
    Ok(())
}

fn handle_path(ctx: &AppContext, position: usize) -> Result<()> {
    println!("{}", ctx.api.card_path(position)?.display());
    Ok(())
}

fn handle_projects(registry_dir: Option<&Path>, action: &Option<ProjectsAction>) -> Result<()> {
    let dir = registry_dir.ok_or_else(|| {
        ScriptError::Api(format!(
            "No config directory available; set {}",
            CONFIG_DIR_ENV
        ))
    })?;
    let mut registry = ProjectRegistry::load(dir)?;

    match action {
        None | Some(ProjectsAction::List) => {
            print_projects(&registry.entries(), registry.last_project.as_deref());
        }
        Some(ProjectsAction::Forget { name }) => {
            let entry = registry.forget(&project_id(name))?;
            registry.save(dir)?;
            print_messages(&[CmdMessage::success(format!(
                "Forgot project '{}' ({} was left untouched)",
                entry.name,
                entry.path.display()
            ))]);
        }
        Some(ProjectsAction::Delete { name, yes }) => {
            let id = project_id(name);
            if !*yes {
                let path = registry
                    .projects
                    .get(&id)
                    .map(|entry| entry.path.display().to_string())
                    .ok_or_else(|| ScriptError::Api(format!("Project '{}' not found", id)))?;
                return Err(ScriptError::Api(format!(
                    "Deleting '{}' removes {} and every card in it; pass --yes to confirm",
                    name, path
                )));
            }
            let entry = registry.delete_permanently(&id)?;
            registry.save(dir)?;
            print_messages(&[CmdMessage::success(format!(
                "Deleted project '{}' and {}",
                entry.name,
                entry.path.display()
            ))]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_looks_like_project() {
        let dir = TempDir::new().unwrap();
        assert!(!looks_like_project(dir.path()));

        std::fs::create_dir(dir.path().join(CARDS_DIR)).unwrap();
        assert!(looks_like_project(dir.path()));
    }

    #[test]
    fn test_absolute_root_for_missing_relative_dir() {
        let root = absolute_root(PathBuf::from("not-created-yet"));
        assert!(root.is_absolute());
        assert!(root.ends_with("not-created-yet"));
    }

    #[test]
    fn test_resolve_root_prefers_flag() {
        let cli = Cli::parse_from(["scriptdeck", "-p", "/scripts/night", "list"]);
        let mut registry = ProjectRegistry::default();
        registry.register("Other", Path::new("/scripts/other"));

        assert_eq!(
            resolve_root(&cli, Some(&registry)),
            PathBuf::from("/scripts/night")
        );
    }
}
