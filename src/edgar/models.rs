// src/edgar/models.rs
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A company we scan filings for.
/// `cik` is kept as the zero-padded ten digit string EDGAR uses in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub cik: String,
    pub ticker: String,
}

/// A filing document discovered in the master index and confirmed reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingReference {
    pub document_url: String,
    pub company_name: String,
    pub ticker: String,
}

/// EDGAR full-index quarter directory (`QTR1` .. `QTR4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Qtr1,
    Qtr2,
    Qtr3,
    Qtr4,
}

impl Quarter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Qtr1 => "QTR1",
            Quarter::Qtr2 => "QTR2",
            Quarter::Qtr3 => "QTR3",
            Quarter::Qtr4 => "QTR4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QTR1" | "Q1" | "1" => Ok(Quarter::Qtr1),
            "QTR2" | "Q2" | "2" => Ok(Quarter::Qtr2),
            "QTR3" | "Q3" | "3" => Ok(Quarter::Qtr3),
            "QTR4" | "Q4" | "4" => Ok(Quarter::Qtr4),
            other => Err(format!("unknown quarter '{}', expected QTR1..QTR4", other)),
        }
    }
}

/// Form types the scanner knows how to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    Form8K,
    Form10K,
    Form10Q,
}

impl FormType {
    /// Token as it appears in the master index `Form Type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Form8K => "8-K",
            FormType::Form10K => "10-K",
            FormType::Form10Q => "10-Q",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "8-K" => Ok(FormType::Form8K),
            "10-K" => Ok(FormType::Form10K),
            "10-Q" => Ok(FormType::Form10Q),
            other => Err(format!("unsupported form '{}', expected 8-K, 10-K or 10-Q", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_parses_edgar_spelling() {
        assert_eq!("QTR4".parse::<Quarter>(), Ok(Quarter::Qtr4));
        assert_eq!("qtr1".parse::<Quarter>(), Ok(Quarter::Qtr1));
        assert_eq!(Quarter::Qtr3.to_string(), "QTR3");
        assert!("QTR5".parse::<Quarter>().is_err());
    }

    #[test]
    fn form_type_round_trips_index_token() {
        for form in [FormType::Form8K, FormType::Form10K, FormType::Form10Q] {
            assert_eq!(form.as_str().parse::<FormType>(), Ok(form));
        }
        assert_eq!("10-q".parse::<FormType>(), Ok(FormType::Form10Q));
        assert!("S-1".parse::<FormType>().is_err());
    }
}
