use crate::cli::CommonArgs;
use crate::model::{MonthlyOutput, MonthlyTable, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use std::path::Path;

pub fn output_json(table: &MonthlyTable, input: &Path, common: &CommonArgs) -> Result<()> {
    let output = MonthlyOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: input.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        records: table.records().to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(table: &MonthlyTable) -> Result<()> {
    for record in table.records() {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}
