use std::fs::File;

use ventura_core::InvestmentRecord;

use super::file::resolve_path;

/// Read investment records from a CSV file with camelCase headers
/// (name, sector, roundStage, investedAt, amountInvested, currentValuation, ...).
pub fn read_records(path: &str) -> Result<Vec<InvestmentRecord>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let file = File::open(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse_records(file).map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn parse_records<R: std::io::Read>(reader: R) -> Result<Vec<InvestmentRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize().collect()
}
