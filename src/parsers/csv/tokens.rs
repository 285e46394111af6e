use super::detect::Delimiter;
use crate::{
    canonical::{day_month_name_date, month_name_day_date, parse_amount, parse_date},
    types::Transaction,
};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

re!(iso_date_scan, r"\d{4}[-/]\d{1,2}[-/]\d{1,2}");
re!(numeric_date_scan, r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}");
re!(amount_scan, r"-?[$€£¥]?\s*\(?-?\d[\d,]*(?:\.\d+)?\)?");
re!(whitespace, r"\s+");

/// Date shapes searched anywhere in a line, in priority order.
const DATE_SCANS: [fn() -> &'static Regex; 4] = [
    iso_date_scan,
    numeric_date_scan,
    day_month_name_date,
    month_name_day_date,
];

/// Pulls a date, an amount and a description out of a header-less line.
#[derive(Debug, Clone, Copy)]
pub struct TokenExtractor {
    delimiter: Delimiter,
}

impl TokenExtractor {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    /// `None` when the line carries no usable date or no usable amount.
    pub fn extract_from_line(&self, line: &str) -> Option<Transaction> {
        let (mut date, mut amount) = self.scan_fields(line);

        // Once the fields fall short the whole line is scanned, and its
        // trailing amount replaces a leading reference number.
        if date.is_none() || amount.is_none() {
            date = date.or_else(|| scan_date(line));
            amount = scan_amount(line).or(amount);
        }

        let (date, amount) = (date?, amount?);
        Some(Transaction::new(date, self.residual_description(line), amount))
    }

    /// First field reading as a date and first other field reading as an amount.
    fn scan_fields(&self, line: &str) -> (Option<NaiveDate>, Option<Decimal>) {
        let mut date = None;
        let mut amount = None;

        for field in self.delimiter.split(line) {
            if date.is_none() {
                if let Some(parsed) = parse_date(&field) {
                    date = Some(parsed);
                    continue;
                }
            }
            if amount.is_none() {
                amount = parse_amount(&field);
            }
            if date.is_some() && amount.is_some() {
                break;
            }
        }

        (date, amount)
    }

    /// The line with every date and amount token removed.
    fn residual_description(&self, line: &str) -> String {
        let stripped = strip_dates(line);
        let stripped = amount_scan().replace_all(&stripped, " ");
        let stripped = stripped.replace(self.delimiter.as_char(), " ");
        whitespace().replace_all(&stripped, " ").trim().to_string()
    }
}

fn scan_date(line: &str) -> Option<NaiveDate> {
    DATE_SCANS.iter().find_map(|pattern| {
        pattern()
            .find_iter(line)
            .find_map(|m| parse_date(m.as_str()))
    })
}

/// Trailing tokens are more often the amount than a leading reference number,
/// so the last candidate wins.
fn scan_amount(line: &str) -> Option<Decimal> {
    let without_dates = strip_dates(line);
    amount_scan()
        .find_iter(&without_dates)
        .last()
        .and_then(|m| parse_amount(m.as_str()))
}

fn strip_dates(line: &str) -> String {
    DATE_SCANS.iter().fold(line.to_string(), |acc, pattern| {
        pattern().replace_all(&acc, " ").into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FALLBACK_DESCRIPTION;
    use rstest::rstest;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case(Delimiter::Comma, "2024-01-05,Coffee,-4.50", ymd(2024, 1, 5), "Coffee", dec("-4.50"))]
    #[case(Delimiter::Tab, "2024-01-05\t-42.50\tCoffee", ymd(2024, 1, 5), "Coffee", dec("-42.50"))]
    #[case(Delimiter::Comma, "2024-01-05 Coffee Shop -4.50", ymd(2024, 1, 5), "Coffee Shop", dec("-4.50"))]
    #[case(Delimiter::Tab, "15 Jan 2024 Salary $2,500.00", ymd(2024, 1, 15), "Salary", dec("2500.00"))]
    #[case(Delimiter::Tab, "Rent paid Jan 3, 2024 (1,200.00)", ymd(2024, 1, 3), "Rent paid", dec("-1200.00"))]
    #[case(Delimiter::Semicolon, "13/02/2024;Bakery;3.20", ymd(2024, 2, 13), "Bakery", dec("3.20"))]
    #[case(Delimiter::Pipe, "02/05/2024|Fuel|(40.00)", ymd(2024, 2, 5), "Fuel", dec("-40.00"))]
    fn test_extract_from_line(
        #[case] delimiter: Delimiter,
        #[case] line: &str,
        #[case] date: NaiveDate,
        #[case] description: &str,
        #[case] amount: Decimal,
    ) {
        let txn = TokenExtractor::new(delimiter).extract_from_line(line).unwrap();
        assert_eq!(txn.date, date);
        assert_eq!(txn.description, description);
        assert_eq!(txn.amount, amount);
    }

    #[test]
    fn test_first_date_field_wins() {
        let txn = TokenExtractor::new(Delimiter::Comma)
            .extract_from_line("2024-01-05,2024-01-07,Transfer,10.00")
            .unwrap();

        assert_eq!(txn.date, ymd(2024, 1, 5));
        assert_eq!(txn.amount, dec("10.00"));
    }

    #[test]
    fn test_first_amount_field_wins() {
        let txn = TokenExtractor::new(Delimiter::Comma)
            .extract_from_line("2024-01-05,25.00,Groceries,974.10")
            .unwrap();

        assert_eq!(txn.amount, dec("25.00"));
    }

    #[test]
    fn test_scan_takes_last_amount_on_line() {
        let txn = TokenExtractor::new(Delimiter::Comma)
            .extract_from_line("Card 4821 on 2024-03-09 paid grocery 58.20")
            .unwrap();

        assert_eq!(txn.date, ymd(2024, 3, 9));
        assert_eq!(txn.amount, dec("58.20"));
        assert_eq!(txn.description, "Card on paid grocery");
    }

    #[test]
    fn test_line_scan_prefers_trailing_amount_over_reference() {
        let txn = TokenExtractor::new(Delimiter::Comma)
            .extract_from_line("4821,Coffee 05/01/2024 12.00")
            .unwrap();

        assert_eq!(txn.date, ymd(2024, 5, 1));
        assert_eq!(txn.amount, dec("12.00"));
        assert_eq!(txn.description, "Coffee");
    }

    #[test]
    fn test_only_numbers_leave_fallback_description() {
        let txn = TokenExtractor::new(Delimiter::Comma)
            .extract_from_line("2024-01-05,-4.50")
            .unwrap();

        assert_eq!(txn.description, FALLBACK_DESCRIPTION);
    }

    #[rstest]
    #[case("--- end of statement ---")]
    #[case("Opening balance")]
    #[case("Coffee,-4.50")]                  // sem data
    #[case("Statement date: 2024-01-31")]    // sem valor
    #[case("")]
    fn test_lines_without_transaction_are_dropped(#[case] line: &str) {
        assert_eq!(TokenExtractor::new(Delimiter::Comma).extract_from_line(line), None);
    }
}
