use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romdb_import::MatchClass;
use romdb_rdb::{Dialect, parse_codes, read_text};

use super::{DETAILS_DB, SUMMARY_FILE, backup_path, path_or_default};
use crate::CliError;
use crate::settings::ResolvedPaths;
use crate::summary::render_summary;

/// Options for `update-product-ids`.
#[derive(Debug)]
pub(crate) struct UpdateOptions {
    pub database_file: Option<PathBuf>,
    pub codes: PathBuf,
    pub summary: Option<PathBuf>,
    pub dialect: Dialect,
    pub dry_run: bool,
}

/// Entry point for `update-product-ids`.
pub(crate) fn run_update_product_ids(
    paths: &ResolvedPaths,
    options: UpdateOptions,
) -> Result<(), CliError> {
    let target = path_or_default(options.database_file, &paths.data_dir, DETAILS_DB);
    let summary_path = path_or_default(options.summary, &paths.data_dir, SUMMARY_FILE);

    let text = read_text(&target)?;
    let codes = parse_codes(&read_text(&options.codes)?);
    if codes.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "No product codes found in {}",
            options.codes.display()
        )));
    }

    log::info!("Found {} entries in {}", codes.len(), options.codes.display());

    let result = romdb_import::reconcile(&text, options.dialect, &codes);

    log::info!("Found {} games in {}", result.primary_total(), target.display());
    log::info!(
        "  {} to update, {} unchanged, {} not in code list, {} codes unmatched",
        result.applied.len().if_supports_color(Stdout, |t| t.green()),
        result.count(MatchClass::Unchanged),
        result.count(MatchClass::PrimaryOnly),
        result.count(MatchClass::SecondaryOnly),
    );
    for skipped in &result.skipped {
        log::warn!("{}", skipped.warning());
    }

    if options.dry_run {
        for update in &result.applied {
            log::info!(
                "  {} {} -> {}",
                update.title,
                update.old_product_id.as_deref().unwrap_or("(none)"),
                update.new_product_id.if_supports_color(Stdout, |t| t.green()),
            );
        }
        log::info!(
            "{}",
            "Dry run: no files written".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    let backup = backup_path(&target);
    std::fs::copy(&target, &backup)?;
    log::info!("Created backup at {}", backup.display());

    if result.output != text {
        std::fs::write(&target, &result.output)?;
        log::info!("Updated {} games in {}", result.applied.len(), target.display());
    } else {
        log::info!("No changes to write");
    }

    std::fs::write(&summary_path, render_summary(&result))?;
    log::info!("Summary written to {}", summary_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RDX: &str = "[8F1B2A5A-FC3E9E0E-C:45]\r\nGood Name=Mystical Ninja (U)\r\nProductID=NUS-NMN-USA\r\n\r\n";

    fn setup() -> (tempfile::TempDir, ResolvedPaths, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DETAILS_DB), RDX).unwrap();
        let codes = dir.path().join("CODES.md");
        std::fs::write(&codes, "Mystical Ninja\tNUS-NMN-USA-1\n").unwrap();
        let paths = ResolvedPaths {
            data_dir: dir.path().to_path_buf(),
            database: dir.path().join("unused.sqlite"),
        };
        (dir, paths, codes)
    }

    fn options(codes: PathBuf, dry_run: bool) -> UpdateOptions {
        UpdateOptions {
            database_file: None,
            codes,
            summary: None,
            dialect: Dialect::Block,
            dry_run,
        }
    }

    #[test]
    fn writes_backup_update_and_summary() {
        let (dir, paths, codes) = setup();
        run_update_product_ids(&paths, options(codes, false)).unwrap();

        let target = dir.path().join(DETAILS_DB);
        assert_eq!(std::fs::read_to_string(backup_path(&target)).unwrap(), RDX);
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            RDX.replace("NUS-NMN-USA\r\n", "NUS-NMN-USA-1\r\n")
        );
        let summary = std::fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        assert!(summary.contains("- Games updated: 1"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (dir, paths, codes) = setup();
        run_update_product_ids(&paths, options(codes, true)).unwrap();

        let target = dir.path().join(DETAILS_DB);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), RDX);
        assert!(!backup_path(&target).exists());
        assert!(!dir.path().join(SUMMARY_FILE).exists());
    }

    #[test]
    fn empty_code_list_is_rejected() {
        let (dir, paths, _) = setup();
        let codes = dir.path().join("empty.md");
        std::fs::write(&codes, "<!-- nothing -->\n").unwrap();
        let err = run_update_product_ids(&paths, options(codes, false)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
