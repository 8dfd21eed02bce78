//! File status inspection tool.
//!
//! The example tool the loop ships with: reports whether a path exists and
//! what it is, with an optional detailed mode covering size, modification
//! time, permission bits, and read/write access.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::Tool;

/// Check existence and metadata of a local path.
pub struct CheckFileStatus;

#[async_trait]
impl Tool for CheckFileStatus {
    fn name(&self) -> &str {
        "check_file_status"
    }

    fn description(&self) -> &str {
        "Check the status and information of local files"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file to check"
                },
                "check_type": {
                    "type": "string",
                    "enum": ["basic", "detailed"],
                    "description": "Type of check to perform (basic: existence only, detailed: full file info)"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let file_path = args["file_path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'file_path' argument"))?;
        let check_type = args["check_type"].as_str().unwrap_or("basic");

        let path = Path::new(file_path);
        let mut result = json!({
            "exists": path.exists(),
            "is_file": path.is_file(),
            "is_directory": path.is_dir(),
        });

        if check_type == "detailed" && path.exists() {
            result["detailed"] = detailed_info(path)?;
        }

        Ok(result)
    }
}

/// Size, mtime, permission bits, and access flags for an existing path.
fn detailed_info(path: &Path) -> anyhow::Result<Value> {
    let metadata = std::fs::metadata(path)?;

    let last_modified = metadata
        .modified()
        .ok()
        .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

    Ok(json!({
        "size": metadata.len(),
        "last_modified": last_modified,
        "permissions": permission_bits(&metadata),
        "is_readable": can_access(path, Access::Read),
        "is_writable": can_access(path, Access::Write),
    }))
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> Value {
    use std::os::unix::fs::PermissionsExt;
    json!(format!("{:03o}", metadata.permissions().mode() & 0o777))
}

#[cfg(not(unix))]
fn permission_bits(metadata: &std::fs::Metadata) -> Value {
    json!(if metadata.permissions().readonly() { "r" } else { "rw" })
}

enum Access {
    Read,
    Write,
}

/// Effective-uid access check via access(2).
#[cfg(unix)]
fn can_access(path: &Path, access: Access) -> bool {
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = std::ffi::CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    let mode = match access {
        Access::Read => libc::R_OK,
        Access::Write => libc::W_OK,
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(not(unix))]
fn can_access(path: &Path, access: Access) -> bool {
    match access {
        Access::Read => std::fs::metadata(path).is_ok(),
        Access::Write => std::fs::metadata(path)
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reports_missing_path() {
        let result = CheckFileStatus
            .execute(json!({"file_path": "/definitely/not/a/real/path"}))
            .await
            .unwrap();
        assert_eq!(result["exists"], false);
        assert_eq!(result["is_file"], false);
        assert_eq!(result["is_directory"], false);
    }

    #[tokio::test]
    async fn reports_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = CheckFileStatus
            .execute(json!({"file_path": dir.path().to_str().unwrap()}))
            .await
            .unwrap();
        assert_eq!(result["exists"], true);
        assert_eq!(result["is_directory"], true);
        assert_eq!(result["is_file"], false);
        // basic check carries no detailed block
        assert!(result.get("detailed").is_none());
    }

    #[tokio::test]
    async fn detailed_check_reports_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("sample.txt");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(b"hello").unwrap();

        let result = CheckFileStatus
            .execute(json!({
                "file_path": file_path.to_str().unwrap(),
                "check_type": "detailed"
            }))
            .await
            .unwrap();

        assert_eq!(result["exists"], true);
        assert_eq!(result["is_file"], true);
        let detailed = &result["detailed"];
        assert_eq!(detailed["size"], 5);
        assert_eq!(detailed["is_readable"], true);
        assert_eq!(detailed["is_writable"], true);
        assert!(detailed["last_modified"].is_string());
    }

    #[tokio::test]
    async fn detailed_check_on_missing_path_skips_metadata() {
        let result = CheckFileStatus
            .execute(json!({
                "file_path": "/definitely/not/a/real/path",
                "check_type": "detailed"
            }))
            .await
            .unwrap();
        assert_eq!(result["exists"], false);
        assert!(result.get("detailed").is_none());
    }
}
