//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::TypegenConfig;
use crate::error::{Error, Result};
use crate::generator::{select_collections, Generator, SchemaPreview};
use crate::source::JsonDirSource;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Generate { dry_run, force, .. } => {
                self.generate(&config, *dry_run, *force).await
            }
            Commands::ListCollections => self.list_collections(&config).await,
            Commands::Preview {
                collection, format, ..
            } => self.preview(&config, collection, *format).await,
        }
    }

    /// Load the config file (if any) and apply command-line overrides
    fn load_config(&self) -> Result<TypegenConfig> {
        let mut config = match &self.cli.config {
            Some(path) => TypegenConfig::from_file(path)?,
            None => TypegenConfig::default(),
        };

        if let Some(source) = &self.cli.source {
            config.source = Some(source.clone());
        }
        if let Some(id_field) = &self.cli.id_field {
            config.id_field.clone_from(id_field);
        }

        match &self.cli.command {
            Commands::Generate {
                out,
                sample_size,
                collections,
                exclude,
                ..
            } => {
                if let Some(out) = out {
                    config.out.clone_from(out);
                }
                if let Some(n) = sample_size {
                    config.sample_size = *n as usize;
                }
                if !collections.is_empty() {
                    config.collections.clone_from(collections);
                }
                if !exclude.is_empty() {
                    config.exclude.clone_from(exclude);
                }
            }
            Commands::Preview { sample_size, .. } => {
                if let Some(n) = sample_size {
                    config.preview_sample_size = *n as usize;
                }
            }
            Commands::ListCollections => {}
        }

        config.validate()?;
        Ok(config)
    }

    /// Open the source directory and build a generator over it
    async fn connect(&self, config: &TypegenConfig) -> Result<Generator<JsonDirSource>> {
        let root = config
            .source
            .as_ref()
            .ok_or_else(|| Error::config("Source directory not specified (use --source)"))?;

        let source = JsonDirSource::connect(root).await?;
        Ok(Generator::new(source).with_id_field(config.id_field.clone()))
    }

    /// Generate models for the selected collections
    async fn generate(&self, config: &TypegenConfig, dry_run: bool, force: bool) -> Result<()> {
        let generator = self.connect(config).await?;

        let available = generator.list_collections().await?;
        let selection = select_collections(&available, &config.collections, &config.exclude);
        for name in &selection.missing {
            warn!("Collection '{name}' not found in source");
        }
        if selection.targets.is_empty() {
            return Err(Error::NoCollections);
        }

        if !dry_run {
            ensure_writable(&config.out, force).await?;
        }

        info!(
            "Processing {} collections: {}",
            selection.targets.len(),
            selection.targets.join(", ")
        );

        let code = generator
            .generate_definitions(&selection.targets, config.sample_size)
            .await?;

        if dry_run {
            print!("{code}");
            return Ok(());
        }

        write_output(&config.out, &code).await?;
        info!("Models written to {}", config.out.display());
        Ok(())
    }

    /// Print the collections in the source
    async fn list_collections(&self, config: &TypegenConfig) -> Result<()> {
        let generator = self.connect(config).await?;
        let names = generator.list_collections().await?;

        if names.is_empty() {
            println!("No collections found in '{}'", generator.source().root().display());
            return Ok(());
        }

        println!("Collections in '{}':", generator.source().root().display());
        for (i, name) in names.iter().enumerate() {
            println!("{:2}. {name}", i + 1);
        }
        Ok(())
    }

    /// Print the inferred schema of one collection
    async fn preview(
        &self,
        config: &TypegenConfig,
        collection: &str,
        format: OutputFormat,
    ) -> Result<()> {
        let generator = self.connect(config).await?;

        let available = generator.list_collections().await?;
        if !available.iter().any(|c| c == collection) {
            return Err(Error::collection_not_found(collection));
        }

        let preview = generator
            .preview_schema(collection, config.preview_sample_size)
            .await?
            .ok_or_else(|| Error::EmptyCollection {
                collection: collection.to_string(),
            })?;

        match format {
            OutputFormat::Pretty => print!("{}", format_preview(&preview)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preview)?),
        }
        Ok(())
    }
}

/// Fail if `path` exists and overwriting was not requested
async fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if !force && tokio::fs::try_exists(path).await? {
        return Err(Error::OutputExists {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Write generated code, creating parent directories as needed
async fn write_output(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, code).await?;
    Ok(())
}

/// Human-readable preview
fn format_preview(preview: &SchemaPreview) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Schema for collection '{}' ({} documents sampled):",
        preview.collection, preview.sampled_count
    );
    out.push('\n');

    for (field, schema) in &preview.schema.fields {
        let status = if schema.is_optional {
            "optional"
        } else {
            "required"
        };
        let _ = writeln!(out, "  {field}: {} ({status})", schema.types.names().join(", "));
    }

    out.push_str("\nGenerated TypedDict:\n\n");
    out.push_str(&preview.rendered_definition);
    out.push('\n');
    out
}
