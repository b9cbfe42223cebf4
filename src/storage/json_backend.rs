use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::errors::{ExpenseError, Result};

const TMP_SUFFIX: &str = "tmp";
const INDENT: &[u8] = b"    ";

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Reads and decodes a JSON document.
///
/// A missing file is reported as [`ExpenseError::FileNotFound`] so callers can treat it as
/// "no prior data"; undecodable content becomes [`ExpenseError::Parse`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExpenseError::FileNotFound(path.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&data).map_err(|err| ExpenseError::parse(path, err))
}

/// Encodes `value` with 4-space indentation and replaces `path` atomically.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = to_pretty_json(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| ExpenseError::InvalidInput(format!("cannot encode JSON: {err}")))?;
    Ok(buffer)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn write_json_uses_four_space_indent() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("users.json");
        let mut users = BTreeMap::new();
        users.insert("admin", "password123");
        write_json(&users, &path).expect("write");

        let raw = fs::read_to_string(&path).expect("read back");
        assert_eq!(raw, "{\n    \"admin\": \"password123\"\n}");
        assert!(!tmp_path(&path).exists(), "temp file should be renamed away");
    }

    #[test]
    fn read_json_reports_missing_and_malformed_files() {
        let temp = TempDir::new().expect("temp dir");
        let missing = temp.path().join("missing.json");
        let err = read_json::<Vec<String>>(&missing).expect_err("missing file");
        assert!(matches!(err, ExpenseError::FileNotFound(ref p) if p == &missing));

        let broken = temp.path().join("broken.json");
        fs::write(&broken, "[{").expect("write broken");
        let err = read_json::<Vec<String>>(&broken).expect_err("malformed file");
        assert!(matches!(err, ExpenseError::Parse { .. }), "unexpected: {err:?}");
    }

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        assert_eq!(
            tmp_path(Path::new("/x/alice_expenses.json")),
            PathBuf::from("/x/alice_expenses.json.tmp")
        );
    }
}
