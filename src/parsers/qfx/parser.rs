use super::types::QfxDate;
use crate::{
    canonical::parse_amount, errors::StatementResult, parsers::traits::Parser,
    types::Transaction,
};
use std::collections::HashMap;

re!(stmttrn_block, r"(?is)<STMTTRN>(.*?)</STMTTRN>");
re!(open_tag, r"<([A-Za-z0-9.]+)>");

const DATE_TAGS: [&str; 2] = ["DTPOSTED", "DTUSER"];
const AMOUNT_TAGS: [&str; 1] = ["TRNAMT"];
const DESCRIPTION_TAGS: [&str; 2] = ["MEMO", "NAME"];
const TYPE_TAGS: [&str; 1] = ["TRNTYPE"];

pub struct QfxParser;

impl Parser for QfxParser {
    fn is_supported(filename: Option<&str>) -> bool {
        filename
            .map(|name| {
                let name = name.to_lowercase();
                name.ends_with(".qfx") || name.ends_with(".ofx")
            })
            .unwrap_or(false)
    }

    fn parse(content: &str) -> StatementResult<Vec<Transaction>> {
        let mut transactions = Vec::new();
        let mut blocks = 0usize;

        for caps in stmttrn_block().captures_iter(content) {
            blocks += 1;
            let body = caps.get(1).map_or("", |m| m.as_str());

            match QfxBlock::read(body).into_transaction() {
                Some(txn) => transactions.push(txn),
                None => tracing::trace!(block = blocks, "dropping STMTTRN without date or amount"),
            }
        }

        tracing::debug!(blocks, parsed = transactions.len(), "parsed OFX/QFX content");
        Ok(transactions)
    }
}

/// Leaf tags of one `<STMTTRN>` aggregate, keyed by upper-cased tag name.
struct QfxBlock {
    tags: HashMap<String, String>,
}

impl QfxBlock {
    /// A value runs to its closing tag when one follows (`<TAG>v</TAG>`, may
    /// span lines), otherwise to the next tag or line end (SGML `<TAG>v`).
    fn read(body: &str) -> Self {
        let upper = body.to_ascii_uppercase();
        let mut tags = HashMap::new();

        for caps in open_tag().captures_iter(body) {
            let (Some(tag), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str().to_ascii_uppercase();
            let rest = &body[tag.end()..];

            let end = upper[tag.end()..]
                .find(&format!("</{name}>"))
                .or_else(|| rest.find(['<', '\r', '\n']))
                .unwrap_or(rest.len());

            tags.entry(name)
                .or_insert_with(|| decode_entities(rest[..end].trim()));
        }
        Self { tags }
    }

    /// First non-empty value among `names`, in preference order.
    fn first_of(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.tags.get(*name))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }

    fn into_transaction(self) -> Option<Transaction> {
        let date = QfxDate::from(self.first_of(&DATE_TAGS)?).to_date()?;
        let amount = parse_amount(self.first_of(&AMOUNT_TAGS)?)?;
        let description = self.first_of(&DESCRIPTION_TAGS).unwrap_or_default();
        let kind = self.first_of(&TYPE_TAGS).map(str::to_string);

        Some(Transaction::new(date, description, amount).with_kind(kind))
    }
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FALLBACK_DESCRIPTION;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_XML_QFX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OFX>
    <BANKMSGSRSV1>
        <STMTTRNRS>
            <STMTRS>
                <BANKTRANLIST>
                    <STMTTRN>
                        <TRNTYPE>DEBIT</TRNTYPE>
                        <DTPOSTED>20251226120000</DTPOSTED>
                        <TRNAMT>-50.00</TRNAMT>
                        <FITID>202512260</FITID>
                        <NAME>Coffee Shop</NAME>
                        <MEMO>Morning coffee</MEMO>
                    </STMTTRN>
                </BANKTRANLIST>
            </STMTRS>
        </STMTTRNRS>
    </BANKMSGSRSV1>
</OFX>"#;

    const SAMPLE_SGML_QFX: &str = r#"OFXHEADER:100
DATA:OFXSGML
VERSION:102

<OFX>
<BANKMSGSRSV1>
<STMTTRNRS>
<TRNUID>1
<STMTRS>
<CURDEF>USD
<BANKTRANLIST>
<DTSTART>20251201
<DTEND>20251231
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20251226120000
<TRNAMT>-50.00
<FITID>202512260
<NAME>Coffee Shop
</STMTTRN>
<STMTTRN>
<TRNTYPE>CREDIT
<DTUSER>20251224
<TRNAMT>1500.00
<NAME>ACME Corp Payroll
</STMTTRN>
</BANKTRANLIST>
</STMTRS>
</STMTTRNRS>
</BANKMSGSRSV1>
</OFX>"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Some("test.qfx"), true)]
    #[case(Some("test.ofx"), true)]
    #[case(Some("test.QFX"), true)]
    #[case(Some("Statement.OfX"), true)]
    #[case(Some("test.csv"), false)]
    #[case(Some("ofx.txt"), false)]
    #[case(None, false)]
    fn test_is_supported(#[case] filename: Option<&str>, #[case] expected: bool) {
        assert_eq!(QfxParser::is_supported(filename), expected);
    }

    #[test]
    fn test_parse_minimal_fragment() {
        let content = "<STMTTRN><DTPOSTED>20240115120000</DTPOSTED>\
                       <TRNAMT>-75.20</TRNAMT><MEMO>Grocery Store</MEMO></STMTTRN>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, date(2024, 1, 15));
        assert_eq!(transactions[0].description, "Grocery Store");
        assert_eq!(transactions[0].amount, Decimal::from_str("-75.20").unwrap());
    }

    #[test]
    fn test_parse_xml_statement_prefers_memo() {
        let transactions = QfxParser::parse(SAMPLE_XML_QFX).unwrap();
        assert_eq!(transactions.len(), 1);

        let txn = &transactions[0];
        assert_eq!(txn.date, date(2025, 12, 26));
        assert_eq!(txn.description, "Morning coffee");
        assert_eq!(txn.amount.to_string(), "-50.00");
        assert_eq!(txn.kind.as_deref(), Some("DEBIT"));
    }

    #[test]
    fn test_parse_sgml_statement() {
        let transactions = QfxParser::parse(SAMPLE_SGML_QFX).unwrap();
        assert_eq!(transactions.len(), 2);

        assert_eq!(transactions[0].description, "Coffee Shop");
        assert_eq!(transactions[0].amount.to_string(), "-50.00");

        // DTUSER substitui DTPOSTED ausente
        assert_eq!(transactions[1].date, date(2025, 12, 24));
        assert_eq!(transactions[1].description, "ACME Corp Payroll");
        assert_eq!(transactions[1].kind.as_deref(), Some("CREDIT"));
    }

    #[test]
    fn test_parse_lowercase_tags() {
        let content = "<stmttrn>\n<dtposted>20240301\n<trnamt>12.00\n<name>Refund\n</stmttrn>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "Refund");
        assert_eq!(transactions[0].date, date(2024, 3, 1));
    }

    #[test]
    fn test_parse_empty_memo_falls_back_to_name() {
        let content = "<STMTTRN><DTPOSTED>20240301</DTPOSTED><TRNAMT>1</TRNAMT>\
                       <MEMO></MEMO><NAME>Shop</NAME></STMTTRN>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions[0].description, "Shop");
    }

    #[test]
    fn test_parse_missing_description_uses_fallback() {
        let content = "<STMTTRN><DTPOSTED>20240301</DTPOSTED><TRNAMT>1</TRNAMT></STMTTRN>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions[0].description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_parse_closed_tag_spanning_lines() {
        let content = "<STMTTRN>\n<DTPOSTED>20240301</DTPOSTED>\n<TRNAMT>-3.00</TRNAMT>\n\
                       <MEMO>Line one\nLine two</MEMO>\n</STMTTRN>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions[0].description, "Line one\nLine two");
        assert_eq!(transactions[0].amount, Decimal::from_str("-3.00").unwrap());
    }

    #[test]
    fn test_parse_mixed_closed_and_unclosed_tags() {
        let content = "<STMTTRN>\n<DTPOSTED>20240301\n<TRNAMT>7.50\n\
                       <name>Open value\n<MEMO>Closed\nvalue</memo>\n</STMTTRN>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions[0].date, date(2024, 3, 1));
        assert_eq!(transactions[0].amount, Decimal::from_str("7.50").unwrap());
        assert_eq!(transactions[0].description, "Closed\nvalue");
    }

    #[test]
    fn test_parse_decodes_entities() {
        let content = "<STMTTRN><DTPOSTED>20240301<TRNAMT>-9.99<NAME>Barnes &amp; Noble</STMTTRN>";

        let transactions = QfxParser::parse(content).unwrap();
        assert_eq!(transactions[0].description, "Barnes & Noble");
    }

    #[rstest]
    #[case("<STMTTRN><TRNAMT>-5.00</TRNAMT><NAME>No date</NAME></STMTTRN>")]
    #[case("<STMTTRN><DTPOSTED>20240301</DTPOSTED><NAME>No amount</NAME></STMTTRN>")]
    #[case("<STMTTRN><DTPOSTED>garbage</DTPOSTED><TRNAMT>1</TRNAMT></STMTTRN>")]
    #[case("<STMTTRN><DTPOSTED>20240301</DTPOSTED><TRNAMT>abc</TRNAMT></STMTTRN>")]
    fn test_incomplete_blocks_are_dropped(#[case] content: &str) {
        let transactions = QfxParser::parse(content).unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn test_parse_without_transactions() {
        let transactions = QfxParser::parse("<OFX></OFX>").unwrap();
        assert!(transactions.is_empty());
    }
}
