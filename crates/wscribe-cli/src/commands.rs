//! Subcommand handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use wscribe_core::core::{
    editor::{EditCommand, EditorSession, MediaInfo, SessionMetadata},
    formats::{parse_file, ExportFormat},
    fs::write_export,
    grouping::group_into_chunks,
    segments::{sanitize, RawSegment, Segment},
    sequence::MarkupTextExtractor,
    settings::{default_settings_dir, AppSettings, SettingsManager},
    View,
};

/// Where an export goes when the caller gave no `--output`
pub struct ExportTarget<'a> {
    pub output: Option<&'a Path>,
    pub format: Option<ExportFormat>,
    pub view: Option<View>,
}

fn settings_dir(config_dir: Option<&Path>) -> Option<PathBuf> {
    config_dir.map(Path::to_path_buf).or_else(default_settings_dir)
}

pub fn load_settings(config_dir: Option<&Path>) -> AppSettings {
    match settings_dir(config_dir) {
        Some(dir) => {
            tracing::debug!("Loading settings from {}", dir.display());
            SettingsManager::new(dir).load()
        }
        None => {
            tracing::warn!("No config directory available, using default settings");
            AppSettings::default()
        }
    }
}

fn read_segments(file: &Path) -> Result<Vec<RawSegment>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Not a file path: {}", file.display()))?;

    parse_file(file_name, &content).with_context(|| format!("Failed to parse {}", file.display()))
}

fn open_session(file: &Path, settings: &AppSettings) -> Result<EditorSession> {
    let raw = read_segments(file)?;
    EditorSession::from_raw(raw, settings)
        .with_context(|| format!("Invalid segment timing in {}", file.display()))
}

fn write_view(
    session: &EditorSession,
    settings: &AppSettings,
    target: ExportTarget<'_>,
) -> Result<PathBuf> {
    let format = target.format.unwrap_or(settings.export.default_format);
    let view = target.view.unwrap_or(settings.export.default_view);

    let (content, extension) = session.export(view, format, &MarkupTextExtractor)?;
    let dir = match &settings.export.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve the working directory")?,
    };

    let path = write_export(
        target.output,
        &dir,
        view,
        extension,
        &content,
        chrono::Local::now().naive_local(),
    )
    .context("Failed to write export")?;
    tracing::info!("Exported {:?} view as {} to {}", view, format, path.display());
    Ok(path)
}

// =============================================================================
// Handlers
// =============================================================================

pub fn validate(file: &Path) -> Result<usize> {
    let segments = sanitize(read_segments(file)?)
        .with_context(|| format!("Invalid segment timing in {}", file.display()))?;
    println!("{}: {} segments OK", file.display(), segments.len());
    Ok(segments.len())
}

pub fn convert(
    file: &Path,
    mut settings: AppSettings,
    chunk_size: Option<usize>,
    target: ExportTarget<'_>,
) -> Result<PathBuf> {
    if let Some(chunk_size) = chunk_size {
        settings.grouping.chunk_size = chunk_size;
        settings.normalize();
    }
    let session = open_session(file, &settings)?;
    let path = write_view(&session, &settings, target)?;
    println!("{}", path.display());
    Ok(path)
}

pub fn group(
    file: &Path,
    settings: &AppSettings,
    chunk_size: Option<usize>,
) -> Result<Vec<Segment>> {
    let segments = sanitize(read_segments(file)?)
        .with_context(|| format!("Invalid segment timing in {}", file.display()))?;
    let groups = group_into_chunks(
        &segments,
        chunk_size.unwrap_or(settings.grouping.chunk_size),
    );
    println!("{}", serde_json::to_string_pretty(&groups)?);
    Ok(groups)
}

/// Outcome of running an edit script
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReport {
    pub applied: usize,
    pub rejected: Vec<String>,
    pub output: PathBuf,
}

pub fn edit(
    file: &Path,
    script: &Path,
    settings: &AppSettings,
    target: ExportTarget<'_>,
) -> Result<EditReport> {
    let mut session = open_session(file, settings)?;
    let json = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let commands = EditCommand::parse_script(&json)
        .with_context(|| format!("Invalid edit script {}", script.display()))?;

    let applied = session
        .apply_all(&commands)
        .with_context(|| format!("Edit script {} stopped early", script.display()))?;
    let output = write_view(&session, settings, target)?;

    let report = EditReport {
        applied,
        rejected: session.errors().to_vec(),
        output,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report)
}

/// Prints the effective settings, deleting the stored file first on `reset`
pub fn show_settings(config_dir: Option<&Path>, reset: bool) -> Result<AppSettings> {
    let dir = settings_dir(config_dir).context("No config directory available")?;
    let manager = SettingsManager::new(dir);
    let settings = if reset {
        let settings = manager.reset().context("Failed to reset settings")?;
        tracing::info!("Reset {}", manager.settings_path().display());
        settings
    } else {
        manager.load()
    };
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(settings)
}

pub fn info(
    file: &Path,
    settings: &AppSettings,
    view: Option<View>,
    media: Option<&str>,
) -> Result<SessionMetadata> {
    let session = open_session(file, settings)?;
    let view = view.unwrap_or(settings.export.default_view);
    let transcript_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let media = MediaInfo {
        file_name: media.unwrap_or_default().to_string(),
        playback_speed: 1.0,
        ..MediaInfo::default()
    };
    let metadata = session.metadata(view, &transcript_name, &media);
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(metadata)
}

// =============================================================================
// Tests
// =============================================================================
