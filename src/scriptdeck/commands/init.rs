use crate::commands::{CmdMessage, CmdResult};
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::store::CardRepository;

/// Creates the project layout and records title/author. Values left as
/// `None` keep whatever the project already had.
pub fn run<R: CardRepository>(
    repo: &mut R,
    config: &mut ProjectConfig,
    title: Option<String>,
    author: Option<String>,
) -> Result<CmdResult> {
    repo.ensure_layout()?;

    if let Some(title) = title {
        config.title = Some(title);
    }
    if let Some(author) = author {
        config.author = Some(author);
    }
    repo.save_config(config)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized project at {}",
        repo.root().display()
    )));
    Ok(result.with_config(config.clone()))
}
