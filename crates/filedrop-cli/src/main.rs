//! Filedrop CLI — store and remove uploads using the configured upload manager.
//!
//! Reads `upload.fsBasePath`, `upload.urlBasePath` and `upload.sizeLimit` (or
//! their `UPLOAD_*` aliases) from the environment or a `.env` file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use filedrop_cli::{init_tracing, ConfigReport};
use filedrop_core::UploadSettings;
use filedrop_storage::{create_upload_manager, IncomingFile, SaveOptions};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filedrop", about = "Filedrop upload store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved upload configuration
    Config,
    /// Store a local file as an upload
    Save {
        /// Path to the file to store
        file: std::path::PathBuf,
        /// Sub-directory below the fs base path (generated if omitted)
        #[arg(long, requires = "name")]
        sub_dir: Option<String>,
        /// Stored file name without extension (generated if omitted)
        #[arg(long, requires = "sub_dir")]
        name: Option<String>,
        /// Fail instead of replacing an existing file
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Remove a stored file by its full storage path
    Remove {
        /// Storage path as returned by `save`
        path: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let settings = UploadSettings::from_env().context("Failed to load upload settings")?;
    let manager = create_upload_manager(&settings)
        .await
        .context("Failed to configure upload manager")?;

    match cli.command {
        Commands::Config => {
            print_json(&ConfigReport::from_manager(&manager))?;
        }
        Commands::Save {
            file,
            sub_dir,
            name,
            no_overwrite,
        } => {
            let content = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let original_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .context("File path has no file name")?;
            let incoming = IncomingFile::new(content, original_name);

            let record = match (sub_dir, name) {
                (Some(sub_dir), Some(name)) => {
                    let options = SaveOptions::new(sub_dir, name).overwrite(!no_overwrite);
                    manager.save_file(incoming, options).await?
                }
                _ => manager.save_file_generated(incoming).await?,
            };
            print_json(&record)?;
        }
        Commands::Remove { path } => {
            manager.remove_file(&path).await?;
            print_json(&serde_json::json!({ "success": true, "removed": path }))?;
        }
    }

    Ok(())
}
