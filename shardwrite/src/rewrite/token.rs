//! Tokens produced by the parser.
//!
//! A token marks a span of the original statement that
//! can't be sent to a data source as written.

use super::Error;
use crate::statement::Expression;

/// Identifier quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    #[default]
    None,
    /// `` `name` ``
    BackQuote,
    /// `"name"`
    Double,
    /// `[name]`
    Bracket,
}

impl Quote {
    /// Detect quoting from an identifier as written.
    pub fn of(text: &str) -> Self {
        match text.chars().next() {
            Some('`') => Self::BackQuote,
            Some('"') => Self::Double,
            Some('[') => Self::Bracket,
            _ => Self::None,
        }
    }

    pub fn wrap(&self, identifier: &str) -> String {
        match self {
            Self::None => identifier.to_string(),
            Self::BackQuote => format!("`{}`", identifier),
            Self::Double => format!("\"{}\"", identifier),
            Self::Bracket => format!("[{}]", identifier),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Logical table name.
    Table { table: String, quote: Quote },
    /// Schema qualifying `table`.
    Schema { schema: String, table: String },
    /// Index name. `table` is the table it's defined on, when known.
    Index {
        index: String,
        table: Option<String>,
        quote: Quote,
    },
    /// Column list of an `INSERT`, parentheses included.
    InsertColumns,
    /// Select items added for the merge, e.g. `ORDER BY` columns
    /// missing from the select list. Zero-width.
    Items {
        items: Vec<String>,
        first_item_special: bool,
    },
    /// The `VALUES` rows of an `INSERT`.
    InsertValues,
    /// `LIMIT` row count literal.
    RowCount(u64),
    /// `LIMIT` offset literal.
    Offset(u64),
    /// Where a derived `ORDER BY` goes. Zero-width.
    OrderBy,
    /// `DISTINCT column` inside an aggregate function.
    AggregationDistinct {
        column: String,
        alias: Option<String>,
    },
    /// Text dropped from the statement.
    Remove,
    /// `column = expression` assigning an encrypted column.
    /// `on_duplicate_key` is the assignment's position in
    /// `ON DUPLICATE KEY UPDATE`, `None` for `SET`.
    EncryptAssignment {
        table: String,
        column: String,
        value: Expression,
        on_duplicate_key: Option<usize>,
    },
    /// Select item reading an encrypted column, alias included.
    /// Owner prefix, e.g. `u.`, stays outside the token.
    EncryptProjection {
        table: String,
        column: String,
        alias: Option<String>,
    },
    /// A predicate on an encrypted column. `condition` indexes
    /// the statement's encrypt conditions.
    EncryptPredicate { condition: usize },
}

impl TokenKind {
    /// Name for errors and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table { .. } => "table",
            Self::Schema { .. } => "schema",
            Self::Index { .. } => "index",
            Self::InsertColumns => "insert columns",
            Self::Items { .. } => "items",
            Self::InsertValues => "insert values",
            Self::RowCount(_) => "row count",
            Self::Offset(_) => "offset",
            Self::OrderBy => "order by",
            Self::AggregationDistinct { .. } => "aggregation distinct",
            Self::Remove => "remove",
            Self::EncryptAssignment { .. } => "encrypt assignment",
            Self::EncryptProjection { .. } => "encrypt projection",
            Self::EncryptPredicate { .. } => "encrypt predicate",
        }
    }
}

/// Marker over the original statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Byte offset of the first character.
    pub begin: usize,
    /// Text covered by the token, as written. Empty for
    /// tokens that only mark an insertion point.
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(begin: usize, text: impl ToString, kind: TokenKind) -> Self {
        Self {
            begin,
            text: text.to_string(),
            kind,
        }
    }

    /// Table name token. Quoting is detected from the text.
    pub fn table(begin: usize, text: &str) -> Self {
        let quote = Quote::of(text);
        let table = match quote {
            Quote::None => text,
            _ => text.get(1..text.len().saturating_sub(1)).unwrap_or(text),
        };
        Self::new(
            begin,
            text,
            TokenKind::Table {
                table: table.to_string(),
                quote,
            },
        )
    }

    /// Zero-width marker.
    pub fn marker(begin: usize, kind: TokenKind) -> Self {
        Self::new(begin, "", kind)
    }

    /// Byte offset right after the token.
    pub fn end(&self) -> usize {
        self.begin + self.text.len()
    }
}

/// Tokens must be sorted, inside the statement, on character
/// boundaries and must not overlap.
pub fn validate(sql: &str, tokens: &[Token]) -> Result<(), Error> {
    let mut previous_end = 0;

    for token in tokens {
        let (begin, end) = (token.begin, token.end());
        if end > sql.len() || !sql.is_char_boundary(begin) || !sql.is_char_boundary(end) {
            return Err(Error::TokenOutOfBounds {
                begin,
                end,
                len: sql.len(),
            });
        }
        if begin < previous_end {
            return Err(Error::TokensOverlap {
                begin,
                previous_end,
            });
        }
        previous_end = end;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_token_quote() {
        let token = Token::table(14, "`t_order`");
        assert_eq!(
            token.kind,
            TokenKind::Table {
                table: "t_order".into(),
                quote: Quote::BackQuote
            }
        );
        assert_eq!(token.end(), 23);

        let token = Token::table(0, "t_order");
        assert!(matches!(token.kind, TokenKind::Table { quote: Quote::None, .. }));
    }

    #[test]
    fn test_validate() {
        let sql = "SELECT * FROM t_order";
        assert!(validate(sql, &[Token::table(14, "t_order")]).is_ok());
        assert!(validate(sql, &[]).is_ok());

        assert!(matches!(
            validate(sql, &[Token::table(15, "t_order")]),
            Err(Error::TokenOutOfBounds { .. })
        ));
        assert!(matches!(
            validate(
                sql,
                &[Token::table(14, "t_order"), Token::table(16, "order")]
            ),
            Err(Error::TokensOverlap { .. })
        ));
    }

    #[test]
    fn test_validate_char_boundary() {
        let sql = "SELECT '中' FROM t";
        assert!(matches!(
            validate(sql, &[Token::marker(9, TokenKind::OrderBy)]),
            Err(Error::TokenOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_quote_wrap() {
        assert_eq!(Quote::Bracket.wrap("t_order_0"), "[t_order_0]");
        assert_eq!(Quote::of("\"t\""), Quote::Double);
    }
}
