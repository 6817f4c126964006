// UI layer: a linear terminal flow built on `dialoguer` prompts and
// `indicatif` spinners. Collects the input file and the deposit metadata,
// then drives the two API calls in order: upload first, register second.

use crate::api::{Creator, DepositMetadata, DepositionClient};
use crate::config::Config;
use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upload types the deposition API accepts for a record.
const UPLOAD_TYPES: &[&str] = &[
    "poster",
    "publication",
    "presentation",
    "dataset",
    "image",
    "video",
    "software",
    "lesson",
    "other",
];

/// Run the deposit flow once. Blocks until both calls complete; the first
/// error aborts the run and surfaces through `main`.
pub fn run(client: &DepositionClient, config: &Config) -> Result<()> {
    // The bucket URL is an explicit input: taken from the environment when
    // present, prompted for otherwise.
    let bucket_url = match &config.bucket_url {
        Some(url) => url.clone(),
        None => Input::new().with_prompt("Bucket URL").interact_text()?,
    };

    let input: String = Input::new()
        .with_prompt("File to upload (or a directory holding one .vcf.gz)")
        .default("./data".to_string())
        .interact_text()?;
    let path = resolve_upload_path(Path::new(&input))?;

    let spinner = spinner("Uploading...");
    let file = client.upload_file(&bucket_url, &path)?;
    spinner.finish_with_message("Upload complete");
    if let Some(checksum) = &file.checksum {
        println!("Stored {} ({})", path.display(), checksum);
    }

    let metadata = collect_metadata()?;
    let spinner = self::spinner("Creating deposition...");
    let deposition = client.create_deposition(&metadata)?;
    spinner.finish_with_message("Deposition created");
    println!("Deposition id: {}", deposition.id);
    Ok(())
}

/// Resolve what the user typed into one concrete file. A file path is used
/// as-is; a directory must hold exactly one `.vcf.gz` file.
pub fn resolve_upload_path(input: &Path) -> Result<PathBuf> {
    if input.is_file() {
        return Ok(input.to_path_buf());
    }
    if !input.is_dir() {
        bail!("{} is neither a file nor a directory", input.display());
    }

    let mut matches = Vec::new();
    for entry in std::fs::read_dir(input)
        .with_context(|| format!("Failed to read directory {}", input.display()))?
    {
        let path = entry?.path();
        let is_match = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| name.ends_with(".vcf.gz"))
            .unwrap_or(false);
        if is_match && path.is_file() {
            matches.push(path);
        }
    }
    match matches.len() {
        0 => bail!("No .vcf.gz file found in {}", input.display()),
        1 => Ok(matches.remove(0)),
        n => bail!(
            "Found {} .vcf.gz files in {}, expected exactly one",
            n,
            input.display()
        ),
    }
}

/// Collect the deposit metadata fields interactively. At least one creator
/// is always present; the loop asks before adding more.
fn collect_metadata() -> Result<DepositMetadata> {
    let title: String = Input::new().with_prompt("Title").interact_text()?;
    let upload_type = UPLOAD_TYPES[Select::new()
        .with_prompt("Upload type")
        .items(UPLOAD_TYPES)
        .default(0)
        .interact()?]
    .to_string();
    let description: String = Input::new().with_prompt("Description").interact_text()?;

    let mut creators = Vec::new();
    loop {
        let name: String = Input::new()
            .with_prompt("Creator name (Family, Given)")
            .interact_text()?;
        let affiliation: String = Input::new().with_prompt("Affiliation").interact_text()?;
        creators.push(Creator { name, affiliation });
        if !Confirm::new()
            .with_prompt("Add another creator?")
            .default(false)
            .interact()?
        {
            break;
        }
    }

    Ok(DepositMetadata {
        title,
        upload_type,
        description,
        creators,
    })
}

fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(msg);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_file_path_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.vcf.gz");
        std::fs::write(&path, b"GZIPDATA").unwrap();
        assert_eq!(resolve_upload_path(&path).unwrap(), path);
    }

    #[test]
    fn directory_with_one_match_resolves() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("calls.vcf.gz"), b"GZIPDATA").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        let resolved = resolve_upload_path(dir.path()).unwrap();
        assert_eq!(resolved, dir.path().join("calls.vcf.gz"));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_upload_path(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No .vcf.gz file"));
    }

    #[test]
    fn ambiguous_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.vcf.gz"), b"A").unwrap();
        std::fs::write(dir.path().join("b.vcf.gz"), b"B").unwrap();
        let err = resolve_upload_path(dir.path()).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(resolve_upload_path(Path::new("./no/such/place")).is_err());
    }
}
