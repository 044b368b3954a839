use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::profile::ProfileRecord;
use crate::repository::{ProfileWriter, RepositoryResult};

pub const HEADER: [&str; 7] = [
    "Company",
    "Name",
    "Title",
    "ProfileURL",
    "Location",
    "ConnectionLevel",
    "Experience",
];

/// Writes one CSV file per export into a directory.
pub struct CsvRepository {
    export_dir: PathBuf,
}

impl CsvRepository {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

/// `acme_ltd_linkedin_profiles_20250101_120000.csv`
pub fn export_file_name(company: &str, timestamp: &str) -> String {
    let slug = company
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect::<String>();
    format!("{slug}_linkedin_profiles_{timestamp}.csv")
}

/// Writes the header and one row per record to `writer`.
pub fn write_records<W: Write>(
    writer: W,
    company: &str,
    records: &[ProfileRecord],
) -> RepositoryResult<()> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            company,
            record.name.as_str(),
            record.role_title.as_str(),
            record.profile_url.as_str(),
            record.location.as_str(),
            record.connection_level.as_str(),
            record.experience_band.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

impl ProfileWriter for CsvRepository {
    fn write_profiles(
        &self,
        company: &str,
        records: &[ProfileRecord],
    ) -> RepositoryResult<PathBuf> {
        fs::create_dir_all(&self.export_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = self.export_dir.join(export_file_name(company, &timestamp));

        write_records(File::create(&path)?, company, records)?;
        log::info!("Saved {} profiles to {}", records.len(), path.display());
        Ok(path)
    }
}
