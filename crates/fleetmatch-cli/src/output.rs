//! Output formatting module

use fleetmatch_types::{BatchResults, OutputFormat, Result};

pub fn output_result(output_format: OutputFormat, results: &BatchResults) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(results)?;
        println!("{}", content);
    } else {
        // Table format
        println!("\nMatch Results");
        println!("=============");
        println!("Run started:    {}", results.started_at.to_rfc3339());
        println!("Measurements:   {}", results.total_measurements);
        println!("Matched:        {}", results.matched);
        println!("Unmatched:      {}", results.unmatched);
        if let Some(rate) = results.match_rate_percent() {
            println!("Match rate:     {:.1}%", rate);
        }

        if !results.entries.is_empty() {
            println!();
            println!(
                "{:<24} {:<17} {:<8} {:<12} {:<12} {:<10}",
                "File", "VIN", "Matched", "Engine", "Transmission", "Reg No"
            );
            println!("{}", "-".repeat(88));
            for entry in &results.entries {
                println!(
                    "{:<24} {:<17} {:<8} {:<12} {:<12} {:<10}",
                    truncate_str(&entry.source, 23),
                    entry.vin,
                    if entry.matched { "yes" } else { "no" },
                    entry.engine.as_deref().unwrap_or("-"),
                    entry.transmission.as_deref().unwrap_or("-"),
                    entry.registration_number.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
