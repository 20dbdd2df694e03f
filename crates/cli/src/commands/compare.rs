use std::path::Path;

use resim_table::{compare_tables, CompareOutcome};

pub fn run(left: &Path, right: &Path, decimals: u32) -> anyhow::Result<()> {
    let outcome = compare_tables(left, right, decimals)
        .map_err(|err| anyhow::anyhow!("cannot compare: {err}"))?;

    match outcome {
        CompareOutcome::SamePath => {
            println!("Warning: both arguments name the same file; nothing was compared.");
            Ok(())
        }
        CompareOutcome::ShapeMismatch { left, right } => {
            anyhow::bail!(
                "cannot compare: shapes differ ({}x{} vs {}x{})",
                left.0,
                left.1,
                right.0,
                right.1
            )
        }
        CompareOutcome::DiffRows(0) => {
            println!("Tables match within {decimals}-decimal rounding.");
            Ok(())
        }
        CompareOutcome::DiffRows(count) => {
            anyhow::bail!("{count} rows differ (ignoring rounding past {decimals} decimals)")
        }
    }
}
