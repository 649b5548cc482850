use anyhow::{Context, Result};
use sblgnt_viewer_engine::data::{build_book_payload, update_manifest, write_json};
use std::path::PathBuf;

use crate::cli::BuildDataArgs;

/// Convert the input text into book JSON and register it in the manifest.
///
/// Returns the number of verses written.
pub fn run(args: &BuildDataArgs) -> Result<usize> {
    let payload = build_book_payload(
        &args.input,
        args.book_id.as_deref(),
        args.display_name.as_deref(),
    )
    .with_context(|| format!("Failed to read {}", args.input.display()))?;

    write_json(&args.output, &payload)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!(
        "Wrote {} verses of {} to {}",
        payload.verses.len(),
        payload.display_name,
        args.output.display()
    );

    let manifest = manifest_path(args);
    update_manifest(&manifest, &args.output, &payload)
        .with_context(|| format!("Failed to update {}", manifest.display()))?;
    log::info!("Registered {} in {}", payload.book_id, manifest.display());

    Ok(payload.verses.len())
}

/// `--manifest`, else `manifest.json` beside the output
pub fn manifest_path(args: &BuildDataArgs) -> PathBuf {
    args.manifest
        .clone()
        .unwrap_or_else(|| args.output.with_file_name("manifest.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_writes_book_and_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Mark.txt");
        std::fs::write(
            &input,
            "ΚΑΤΑ ΜΑΡΚΟΝ\nMark 1:1 Ἀρχὴ τοῦ εὐαγγελίου\nMark 1:2 Καθὼς γέγραπται\nἐν τῷ Ἠσαΐᾳ\n",
        )
        .unwrap();
        let args = BuildDataArgs {
            input,
            output: temp_dir.path().join("data/mark.json"),
            book_id: None,
            display_name: Some("Gospel of Mark".to_string()),
            manifest: Some(temp_dir.path().join("data/manifest.json")),
        };

        let written = run(&args).unwrap();

        assert_eq!(written, 2);
        let book: Value =
            serde_json::from_str(&std::fs::read_to_string(&args.output).unwrap()).unwrap();
        assert_eq!(book["book_id"], "mark");
        assert_eq!(book["verses"][1]["text"], "Καθὼς γέγραπται ἐν τῷ Ἠσαΐᾳ");

        let manifest: Value = serde_json::from_str(
            &std::fs::read_to_string(temp_dir.path().join("data/manifest.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["books"][0]["data_url"], "data/mark.json");
        assert_eq!(manifest["books"][0]["display_name"], "Gospel of Mark");
    }

    #[test]
    fn test_manifest_defaults_to_the_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("John.txt");
        std::fs::write(&input, "ΚΑΤΑ ΙΩΑΝΝΗΝ\nJohn 1:1 Ἐν ἀρχῇ ἦν ὁ λόγος\n").unwrap();
        let args = BuildDataArgs {
            input,
            output: temp_dir.path().join("data/john.json"),
            book_id: None,
            display_name: None,
            manifest: None,
        };

        run(&args).unwrap();

        let manifest_file = temp_dir.path().join("data/manifest.json");
        assert_eq!(manifest_path(&args), manifest_file);
        let manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(manifest_file).unwrap()).unwrap();
        assert_eq!(manifest["books"][0]["book_id"], "john");
        assert_eq!(manifest["books"][0]["data_url"], "data/john.json");
    }

    #[test]
    fn test_missing_input_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let args = BuildDataArgs {
            input: temp_dir.path().join("Missing.txt"),
            output: temp_dir.path().join("out.json"),
            book_id: None,
            display_name: None,
            manifest: None,
        };

        let error = run(&args).unwrap_err();

        assert!(format!("{error}").contains("Missing.txt"));
        assert!(!args.output.exists());
    }
}
