//! # Persistence Bridge
//!
//! Loading and saving a whole table file.
//!
//! Saving never writes the destination in place. The table is encoded into
//! a temporary file created in the destination's directory, flushed, and
//! renamed over the destination:
//!
//! ```text
//!   people.csv            (untouched until rename)
//!   .tmpXXXXXX            <── encode + sync
//!        │
//!        └── persist ──>  people.csv
//! ```
//!
//! Because the temporary file lives in the same directory, the rename stays
//! on one filesystem. If encoding fails, the temporary file is removed on
//! drop and the original is left as it was.
//!
//! An existing destination is resolved through symlinks first, so the data
//! file behind a link is the one replaced, and its permissions are copied
//! onto the temporary file before the rename.

use crate::storage::codec;
use crate::types::Table;
use eyre::{Result, WrapErr};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

#[instrument(name = "storage::load", level = "debug", skip(path), fields(path = %path.display()))]
pub fn load_table(path: &Path, delimiter: u8) -> Result<Table> {
    let file = File::open(path)
        .wrap_err_with(|| format!("failed to open CSV file '{}'", path.display()))?;
    let table = codec::decode(BufReader::new(file), delimiter)
        .wrap_err_with(|| format!("failed to load '{}'", path.display()))?;

    tracing::debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        "table loaded"
    );
    Ok(table)
}

#[instrument(name = "storage::save", level = "debug", skip(path, table), fields(path = %path.display(), rows = table.row_count()))]
pub fn save_table(path: &Path, table: &Table, include_header: bool, delimiter: u8) -> Result<()> {
    let (target, permissions) = match fs::metadata(path) {
        Ok(meta) => {
            let target = fs::canonicalize(path)
                .wrap_err_with(|| format!("failed to resolve '{}'", path.display()))?;
            (target, Some(meta.permissions()))
        }
        Err(_) => (PathBuf::from(path), None),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .wrap_err_with(|| format!("failed to create temporary file in '{}'", dir.display()))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        codec::encode(table, &mut writer, include_header, delimiter)?;
        writer
            .flush()
            .wrap_err("failed to flush temporary file")?;
    }
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .wrap_err("failed to copy permissions onto temporary file")?;
    }
    temp.as_file()
        .sync_all()
        .wrap_err("failed to sync temporary file")?;

    temp.persist(&target)
        .map_err(|e| e.error)
        .wrap_err_with(|| format!("failed to write '{}'", target.display()))?;

    tracing::debug!("table saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DELIMITER;
    use crate::types::Row;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_preserves_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");

        let table = Table::from_rows(
            vec!["id".into(), "name".into()],
            vec![Row::from(vec!["1", "A"]), Row::from(vec!["2", ""])],
        )
        .unwrap();

        save_table(&path, &table, true, DEFAULT_DELIMITER).unwrap();
        let loaded = load_table(&path, DEFAULT_DELIMITER).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "a\nold\n").unwrap();

        let table = Table::from_rows(vec!["a".into()], vec![Row::from(vec!["new"])]).unwrap();
        save_table(&path, &table, true, DEFAULT_DELIMITER).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nnew\n");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary file SHOULD be renamed away");
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_destination_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "a\nold\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let table = Table::from_rows(vec!["a".into()], vec![Row::from(vec!["new"])]).unwrap();
        save_table(&path, &table, true, DEFAULT_DELIMITER).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644, "save SHOULD keep the file's mode");
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_rewrites_target() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.csv");
        let link = dir.path().join("link.csv");
        fs::write(&real, "id\n1\n2\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let table = Table::from_rows(vec!["id".into()], vec![Row::from(vec!["2"])]).unwrap();
        save_table(&link, &table, true, DEFAULT_DELIMITER).unwrap();

        assert!(
            fs::symlink_metadata(&link).unwrap().file_type().is_symlink(),
            "link SHOULD survive the save"
        );
        assert_eq!(fs::read_to_string(&real).unwrap(), "id\n2\n");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = load_table(&path, DEFAULT_DELIMITER).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
    }
}
