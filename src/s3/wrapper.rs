use aws_sdk_s3::{
    Client,
    operation::list_object_versions::ListObjectVersionsOutput,
    types::{Delete, ObjectIdentifier},
};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use human_format::Formatter;

use super::types::PurgeTotals;

pub struct S3Wrapper {
    pub client: Client,
}

impl S3Wrapper {
    /// Every bucket name in the account, across all listing pages.
    pub async fn list_bucket_names(&self) -> Result<Vec<String>> {
        let mut acc: Vec<String> = Vec::new();

        let mut c_token = None;
        loop {
            let list_output = self
                .client
                .list_buckets()
                .set_continuation_token(c_token)
                .send()
                .await
                .wrap_err("listing account buckets")?;

            c_token = list_output.continuation_token().map(str::to_string);

            let names = list_output
                .buckets
                .unwrap_or_default()
                .into_iter()
                .flat_map(|b| b.name);
            acc.extend(names);

            if c_token.is_none() {
                break;
            }
        }

        Ok(acc)
    }

    async fn get_versions(&self, bucket: &str) -> Result<Vec<ListObjectVersionsOutput>> {
        async fn next_page(
            client: &Client,
            bucket: &str,
            next_key: Option<String>,
            next_version: Option<String>,
        ) -> Result<ListObjectVersionsOutput> {
            client
                .list_object_versions()
                .bucket(bucket)
                .set_key_marker(next_key)
                .set_version_id_marker(next_version)
                .send()
                .await
                .map_err(|e| e.into())
        }

        let mut next_key = None;
        let mut next_version = None;

        let mut acc: Vec<ListObjectVersionsOutput> = Vec::new();
        let mut prev_records_counter: usize = 0;
        let mut formatter = Formatter::new();
        formatter.with_decimals(1);

        loop {
            let out = next_page(&self.client, bucket, next_key, next_version).await?;

            next_key = out.next_key_marker.clone();
            next_version = out.next_version_id_marker.clone();
            acc.push(out);

            let records_so_far = acc
                .iter()
                .map(|page| page.versions().len() + page.delete_markers().len())
                .sum::<usize>();
            if records_so_far - prev_records_counter > 20000 {
                prev_records_counter = records_so_far;
                log::info!(
                    "Collected {} versioning records in {} ...",
                    formatter.format(records_so_far as f64),
                    bucket
                );
            }

            if next_key.is_none() && next_version.is_none() {
                break;
            }
        }

        Ok(acc)
    }

    /// Delete every object version and delete marker in the bucket,
    /// one batch call per listing page.
    pub async fn purge_all_versions(&self, bucket: &str) -> Result<PurgeTotals> {
        let version_pages = self.get_versions(bucket).await?;

        let mut totals = PurgeTotals::default();
        for page in version_pages {
            let (object_identifiers, page_totals) = page_identifiers(page)?;

            if object_identifiers.is_empty() {
                log::debug!("Nothing to delete in {}", bucket);
                continue;
            }

            log::info!(
                "Deleting {} identifiers in {}",
                object_identifiers.len(),
                bucket
            );
            let out = self
                .client
                .delete_objects()
                .bucket(bucket)
                .delete(
                    Delete::builder()
                        .set_objects(Some(object_identifiers))
                        .build()?,
                )
                .send()
                .await
                .wrap_err_with(|| format!("deleting a batch in {}", bucket))?;

            let errors = out.errors.unwrap_or_default();
            if let Some(first) = errors.first() {
                bail!(
                    "{} identifiers failed to delete in {}, first was '{}': {}",
                    errors.len(),
                    bucket,
                    first.key().unwrap_or("<no key>"),
                    first.message().unwrap_or("no message"),
                );
            }

            totals = totals + page_totals;
        }

        Ok(totals)
    }

    pub async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .wrap_err_with(|| format!("deleting bucket {}", bucket))?;
        Ok(())
    }
}

/// One identifier per delete marker and per object version on the page.
/// A page never holds more identifiers than a single batch delete accepts.
pub(crate) fn page_identifiers(
    page: ListObjectVersionsOutput,
) -> Result<(Vec<ObjectIdentifier>, PurgeTotals)> {
    let object_versions = page.versions.unwrap_or_default();
    let delete_markers = page.delete_markers.unwrap_or_default();

    let totals = PurgeTotals {
        versions: object_versions.len(),
        delete_markers: delete_markers.len(),
        bytes: object_versions
            .iter()
            .map(|v| v.size.unwrap_or(0))
            .sum::<i64>() as u64,
    };

    let mut object_identifiers = Vec::with_capacity(totals.versions + totals.delete_markers);

    for item in delete_markers {
        let id = ObjectIdentifier::builder()
            .set_version_id(item.version_id)
            .set_key(item.key)
            .build()?;
        object_identifiers.push(id);
    }

    for item in object_versions {
        let id = ObjectIdentifier::builder()
            .set_version_id(item.version_id)
            .set_key(item.key)
            .build()?;
        object_identifiers.push(id);
    }

    Ok((object_identifiers, totals))
}
