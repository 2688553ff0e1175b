use std::fmt::Display;

use bytesize::ByteSize;
use chrono::Local;
use color_eyre::{Result, eyre::bail};
use derive_more::Add;
use regex::Regex;
use serde::Serialize;

/// Case-insensitive substring match against bucket names.
pub struct NameFilter {
    text: String,
    regex: Regex,
}
impl NameFilter {
    pub fn parse(text: &str) -> Result<NameFilter> {
        let text = text.trim();
        if text.is_empty() {
            bail!("A blank filter would match every bucket in the account.");
        }

        let regex = Regex::new(&format!("(?i){}", regex::escape(text)))?;

        Ok(NameFilter {
            text: text.to_string(),
            regex,
        })
    }

    pub fn matches(&self, bucket_name: &str) -> bool {
        self.regex.is_match(bucket_name)
    }
}
impl Display for NameFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Add)]
pub struct PurgeTotals {
    pub versions: usize,
    pub delete_markers: usize,
    pub bytes: u64,
}
impl Display for PurgeTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{} versions, {} delete markers, {}",
            self.versions,
            self.delete_markers,
            ByteSize::b(self.bytes)
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct PurgeRecord {
    timestamp: String,
    bucket: String,
    versions: usize,
    delete_markers: usize,
    bytes: u64,
    bytes_human: String,
}
impl PurgeRecord {
    pub fn new(bucket: &str, totals: &PurgeTotals) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            bucket: bucket.to_string(),
            versions: totals.versions,
            delete_markers: totals.delete_markers,
            bytes: totals.bytes,
            bytes_human: ByteSize::b(totals.bytes).to_string(),
        }
    }
}
