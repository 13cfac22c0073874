// ==========================================
// Test helpers
// ==========================================
// Temporary SQLite databases, app state and docx inspection
// ==========================================

#![allow(dead_code)]

use bqc_generator::app::AppState;
use bqc_generator::config::AppConfig;
use bqc_generator::db::{init_schema, open_sqlite_connection};
use std::error::Error;
use std::io::{Cursor, Read};
use tempfile::NamedTempFile;

/// Create a temporary database with the schema applied
///
/// # Returns
/// - NamedTempFile: the file (keep it alive for the test's duration)
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Test configuration over a fresh temporary database
pub fn create_test_config() -> Result<(NamedTempFile, AppConfig), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let config = AppConfig {
        db_path,
        ..AppConfig::default()
    };
    Ok((temp_file, config))
}

/// Full application state over a fresh temporary database
pub fn create_test_state() -> Result<(NamedTempFile, AppState), Box<dyn Error>> {
    let (temp_file, config) = create_test_config()?;
    let state = AppState::new(&config)?;
    Ok((temp_file, state))
}

/// Names of all entries in a zip archive
pub fn zip_entry_names(bytes: &[u8]) -> Result<Vec<String>, Box<dyn Error>> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Contents of one part of a docx package
pub fn read_part(bytes: &[u8], name: &str) -> Result<String, Box<dyn Error>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name(name)?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(xml)
}

/// `word/document.xml` of a docx package
pub fn document_xml(bytes: &[u8]) -> Result<String, Box<dyn Error>> {
    read_part(bytes, "word/document.xml")
}
