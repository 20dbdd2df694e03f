use std::time::Duration;

use resim_pipeline::runner::BatchReport;

pub fn print_report(report: &BatchReport, elapsed: Duration) {
    println!("\n========================================");
    println!("  Types patched: {}", report.types_patched);
    println!("  Seeds done:    {}", report.completed.len());
    println!("  Rows written:  {}", report.total_rows());
    println!("  Time:          {:.2}s", elapsed.as_secs_f64());
    println!("========================================");

    for record in &report.completed {
        println!(
            "  seed {:>6}  {:>8} rows  {}",
            record.seed,
            record.rows,
            record.table.display()
        );
    }
    for failure in &report.failed {
        println!("  FAILED: {failure}");
    }
}
