//! Line-oriented CSV tokenizer for spreadsheet exports.
//!
//! Each line is one row. Quoted fields may contain commas and doubled quotes
//! (`""` for a literal `"`), but not line breaks: a quote left open at the end
//! of a line closes with the line.

pub type Row = Vec<String>;

/// Splits `text` into rows of fields. Whitespace-only lines produce no row.
pub fn parse(text: &str) -> Vec<Row> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Row {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(expected: &[&[&str]]) -> Vec<Row> {
        expected
            .iter()
            .map(|r| r.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn splits_plain_fields() {
        assert_eq!(parse("a,b,c"), rows(&[&["a", "b", "c"]]));
    }

    #[test]
    fn keeps_commas_inside_quotes() {
        assert_eq!(parse(r#"a,"b,c",d"#), rows(&[&["a", "b,c", "d"]]));
    }

    #[test]
    fn unescapes_doubled_quotes() {
        assert_eq!(parse(r#"a,"b""c",d"#), rows(&[&["a", "b\"c", "d"]]));
        assert_eq!(parse(r#""""""#), rows(&[&["\""]]));
    }

    #[test]
    fn skips_blank_and_whitespace_lines() {
        assert_eq!(parse("a,b\n\nc,d"), rows(&[&["a", "b"], &["c", "d"]]));
        assert_eq!(parse("a,b\n  \t \nc,d\n"), rows(&[&["a", "b"], &["c", "d"]]));
        assert!(parse("").is_empty());
        assert!(parse("\n \n").is_empty());
    }

    #[test]
    fn handles_crlf_exports() {
        assert_eq!(
            parse("email,name\r\nx@y.com,X\r\n"),
            rows(&[&["email", "name"], &["x@y.com", "X"]])
        );
    }

    #[test]
    fn keeps_empty_fields() {
        assert_eq!(parse("a,,c,"), rows(&[&["a", "", "c", ""]]));
        assert_eq!(parse(",\"\","), rows(&[&["", "", ""]]));
    }

    #[test]
    fn unterminated_quote_closes_at_line_end() {
        assert_eq!(
            parse("a,\"b,c\nd,e"),
            rows(&[&["a", "b,c"], &["d", "e"]])
        );
    }

    #[test]
    fn ragged_rows_pass_through() {
        assert_eq!(parse("a,b,c\n1\n1,2,3,4"), rows(&[&["a", "b", "c"], &["1"], &["1", "2", "3", "4"]]));
    }

    #[test]
    fn well_formed_sheet_keeps_header_width() {
        let text = "email,name,team\nann@x.com,Ann,\"Red, Blue\"\nbo@x.com,Bo,Green\ncy@x.com,\"C \"\"Cy\"\"\",Gold\n";
        let parsed = parse(text);
        assert_eq!(parsed.len(), 4);
        assert!(parsed.iter().all(|r| r.len() == parsed[0].len()));
        assert_eq!(parsed[3][1], "C \"Cy\"");
    }

    #[test]
    fn parse_is_pure() {
        let text = "a,\"b\"\"\",c\n\nd";
        assert_eq!(parse(text), parse(text));
    }
}
