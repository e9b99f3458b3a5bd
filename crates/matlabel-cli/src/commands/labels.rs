//! Handlers for `labels` subcommands.

use std::fs;
use std::io;
use std::path::Path;

use matlabel_data::{LabelRecord, LabelStore};
use tracing::{info, warn};

use crate::cli::{AddArgs, DeleteArgs, EditArgs, ImportArgs, ListArgs, ShowArgs};
use crate::context::{AppContext, CliError, CliResult, require_label};
use crate::output;

const STDIN_MARKER: &str = "-";

pub(crate) async fn handle_list(ctx: &AppContext, args: ListArgs) -> CliResult<()> {
    let store = ctx.store().await?;
    let labels = match args.filter.as_deref() {
        Some(query) => store.filter(query).await?,
        None => store.list_all().await?,
    };
    println!("{}", output::label_list(&labels, ctx.output)?);
    Ok(())
}

pub(crate) async fn handle_show(ctx: &AppContext, args: ShowArgs) -> CliResult<()> {
    let store = ctx.store().await?;
    let label = require_label(&store, &args.code).await?;
    println!("{}", output::label_detail(&label, ctx.output)?);
    Ok(())
}

pub(crate) async fn handle_add(ctx: &AppContext, args: AddArgs) -> CliResult<()> {
    let description = match (args.description, args.description_file.as_deref()) {
        (Some(text), _) => text,
        (None, Some(path)) => read_text(path)?,
        (None, None) => {
            return Err(CliError::validation(
                "pass --description or --description-file",
            ));
        }
    };

    let store = ctx.store().await?;
    let id = store.add(&args.code, &description).await?;
    let label = fetch(&store, id).await?;
    info!(id, code = %label.name, "label added");
    println!("{}", output::label_saved("Added", &label, ctx.output)?);
    Ok(())
}

pub(crate) async fn handle_edit(ctx: &AppContext, args: EditArgs) -> CliResult<()> {
    if args.code.is_none() && args.description.is_none() {
        return Err(CliError::validation(
            "nothing to change; pass --code or --description",
        ));
    }

    let store = ctx.store().await?;
    let current = fetch(&store, args.id).await?;
    let name = args.code.unwrap_or(current.name);
    let description = args.description.unwrap_or(current.description);
    store.update(args.id, &name, &description).await?;

    let label = fetch(&store, args.id).await?;
    info!(id = label.id, code = %label.name, "label updated");
    println!("{}", output::label_saved("Updated", &label, ctx.output)?);
    Ok(())
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    if !args.yes {
        return Err(CliError::validation(format!(
            "refusing to delete {} label(s) without --yes",
            args.ids.len()
        )));
    }

    let store = ctx.store().await?;
    let deleted = store.delete_by_ids(&args.ids).await?;
    if deleted < u64::try_from(args.ids.len()).unwrap_or(u64::MAX) {
        warn!(
            requested = args.ids.len(),
            deleted, "some requested ids did not exist"
        );
    }
    println!("{}", output::deleted(deleted, ctx.output)?);
    Ok(())
}

pub(crate) async fn handle_import(ctx: &AppContext, args: ImportArgs) -> CliResult<()> {
    let text = match (args.file.as_deref(), args.source.as_deref()) {
        (Some(path), _) => read_text(path)?,
        (None, Some(STDIN_MARKER)) => io::read_to_string(io::stdin())
            .map_err(|err| CliError::failure(anyhow::anyhow!("failed to read stdin: {err}")))?,
        (None, Some(other)) => {
            return Err(CliError::validation(format!(
                "unexpected argument '{other}'; pass --file FILE or - to read standard input"
            )));
        }
        (None, None) => {
            return Err(CliError::validation(
                "pass --file FILE or - to read standard input",
            ));
        }
    };

    let store = ctx.store().await?;
    let report = store.import_bulk(&text).await?;
    println!("{}", output::import_report(&report, ctx.output)?);
    Ok(())
}

async fn fetch(store: &LabelStore, id: i64) -> CliResult<LabelRecord> {
    store.get_by_id(id).await?.ok_or_else(|| not_found(id))
}

fn not_found(id: i64) -> CliError {
    CliError::validation(format!("label {id} not found"))
}

fn read_text(path: &Path) -> CliResult<String> {
    fs::read_to_string(path)
        .map_err(|err| CliError::validation(format!("failed to read {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use matlabel_config::AppConfig;
    use matlabel_test_support::sqlite::file_database_url;
    use std::error::Error;

    fn context_for(dir: &Path) -> AppContext {
        let mut config = AppConfig::default();
        config.database.url = file_database_url(dir);
        AppContext {
            config,
            output: OutputFormat::Table,
        }
    }

    fn message(err: CliError) -> String {
        err.display_message()
    }

    #[tokio::test]
    async fn edit_keeps_fields_that_were_not_passed() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context_for(dir.path());
        let store = ctx.store().await.map_err(message)?;
        let id = store.add("VG0100", "Polypropylene\nNatural").await?;

        handle_edit(
            &ctx,
            EditArgs {
                id,
                code: Some("VG0101".to_string()),
                description: None,
            },
        )
        .await
        .map_err(message)?;

        let label = store.get_by_id(id).await?.ok_or("label vanished")?;
        assert_eq!(label.name, "VG0101");
        assert_eq!(label.description, "Polypropylene\nNatural");
        Ok(())
    }

    #[tokio::test]
    async fn edit_without_changes_or_target_is_a_validation_error() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context_for(dir.path());

        let empty = handle_edit(
            &ctx,
            EditArgs {
                id: 1,
                code: None,
                description: None,
            },
        )
        .await
        .expect_err("no changes");
        assert_eq!(empty.exit_code(), 2);

        let missing = handle_edit(
            &ctx,
            EditArgs {
                id: 99,
                code: None,
                description: Some("x".to_string()),
            },
        )
        .await
        .expect_err("missing id");
        assert_eq!(missing.display_message(), "label 99 not found");
        Ok(())
    }

    #[tokio::test]
    async fn delete_requires_confirmation() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context_for(dir.path());
        let store = ctx.store().await.map_err(message)?;
        let id = store.add("PC15", "Polycarbonate clear").await?;

        let err = handle_delete(
            &ctx,
            DeleteArgs {
                ids: vec![id],
                yes: false,
            },
        )
        .await
        .expect_err("unconfirmed delete");
        assert!(err.display_message().contains("--yes"));
        assert_eq!(store.list_all().await?.len(), 1);

        handle_delete(
            &ctx,
            DeleteArgs {
                ids: vec![id, id + 100],
                yes: true,
            },
        )
        .await
        .map_err(message)?;
        assert!(store.list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn add_reads_multiline_description_files() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context_for(dir.path());
        let file = dir.path().join("description.txt");
        fs::write(&file, "Nylon 6\n30% glass filled")?;

        handle_add(
            &ctx,
            AddArgs {
                code: "NY6".to_string(),
                description: None,
                description_file: Some(file),
            },
        )
        .await
        .map_err(message)?;

        let store = ctx.store().await.map_err(message)?;
        let label = store.get_by_name("ny6").await?.ok_or("label missing")?;
        assert_eq!(label.description, "Nylon 6\n30% glass filled");

        let missing = handle_add(
            &ctx,
            AddArgs {
                code: "NY66".to_string(),
                description: None,
                description_file: Some(dir.path().join("absent.txt")),
            },
        )
        .await
        .expect_err("missing file");
        assert_eq!(missing.exit_code(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn import_rejects_stray_positional_arguments() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let ctx = context_for(dir.path());
        let err = handle_import(
            &ctx,
            ImportArgs {
                file: None,
                source: Some("labels.txt".to_string()),
            },
        )
        .await
        .expect_err("positional path");
        assert!(err.display_message().contains("--file"));
        Ok(())
    }
}
