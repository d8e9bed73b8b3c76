use rust_decimal::Decimal;

use loan_analytics_core::prep::RawLoanRecord;
use loan_analytics_core::LoanRecord;

use super::file;

/// Read cleaned loans from a CSV file with `installment,time_to_maturity` columns.
pub fn read_loans_csv(path: &str) -> Result<Vec<LoanRecord>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Failed to open loan file '{}': {}", path, e))?;

    let mut loans = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let loan: LoanRecord =
            row.map_err(|e| format!("Bad loan row {} in '{}': {}", line + 1, path, e))?;
        loans.push(loan);
    }
    Ok(loans)
}

/// Read raw export rows from a CSV file
/// (`installment,issue_d,term,int_rate,loan_status`).
pub fn read_raw_loans_csv(path: &str) -> Result<Vec<RawLoanRecord>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Failed to open loan file '{}': {}", path, e))?;

    let mut loans = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let loan: RawLoanRecord =
            row.map_err(|e| format!("Bad loan row {} in '{}': {}", line + 1, path, e))?;
        loans.push(loan);
    }
    Ok(loans)
}

/// Read predicted default probabilities from a JSON array file.
pub fn read_predictions(path: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    file::read_json(path)
}
