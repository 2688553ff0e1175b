use aws_sdk_s3::Client;
use bucket_reaper::{
    log::setup_logging,
    s3::{NameFilter, PurgeRecord, PurgeTotals, S3Wrapper},
};
use clap::Parser;
use color_eyre::Result;
use dialoguer::Confirm;
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(version, about)]
/// Find buckets whose name matches a filter, empty them of every object
/// version and delete marker, then delete the buckets themselves.
struct Cli {
    /// Verbose mode (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Case-insensitive text to match against bucket names
    #[clap(short, long)]
    filter: String,

    /// Skip the confirmation prompt
    #[clap(short, long)]
    yes: bool,

    /// CSV file recording what was purged
    #[clap(short, long)]
    report: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    // Deletions should be visible by default, -v steps up from info.
    setup_logging(cli.verbose.saturating_add(1));

    let filter = NameFilter::parse(&cli.filter)?;

    let runtime = Runtime::new()?;
    runtime.block_on(async {
        let config = aws_config::load_from_env().await;

        let s3 = S3Wrapper {
            client: Client::new(&config),
        };

        let buckets = s3.list_bucket_names().await?;
        log::info!("Account has {} buckets", buckets.len());

        let matched: Vec<String> = buckets
            .into_iter()
            .filter(|name| filter.matches(name))
            .collect();

        if matched.is_empty() {
            log::warn!("No bucket names matched '{}'", filter);
            return Ok(());
        }

        println!("Buckets matching '{}':", filter);
        for name in &matched {
            println!("  s3://{}", name);
        }

        let confirmed = cli.yes
            || Confirm::new()
                .with_prompt(format!(
                    "Permanently delete the {} buckets above, including every object version and delete marker?",
                    matched.len()
                ))
                .default(false)
                .interact()?;
        if !confirmed {
            println!("Nothing deleted.");
            return Ok(());
        }

        let mut report_writer = match &cli.report {
            Some(path) => Some(csv::Writer::from_path(path)?),
            None => None,
        };

        let mut totals = PurgeTotals::default();
        for name in &matched {
            log::info!("Purging s3://{}", name);
            let bucket_totals = s3.purge_all_versions(name).await?;
            s3.delete_bucket(name).await?;
            println!("Deleted s3://{} ({})", name, bucket_totals);

            if let Some(writer) = report_writer.as_mut() {
                writer.serialize(PurgeRecord::new(name, &bucket_totals))?;
                writer.flush()?;
            }

            totals = totals + bucket_totals;
        }

        println!("Removed {} buckets: {}", matched.len(), totals);
        if let Some(path) = &cli.report {
            log::info!("Purge report written to {}", path);
        }

        Ok(())
    })
}
