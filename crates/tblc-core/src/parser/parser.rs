//! Schema parser implementation.

use std::collections::BTreeSet;

use tracing::{debug, error, trace};

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Span, Token, TokenCursor, TokenKind};
use crate::schema::{
    ConstraintType, Field, FieldType, ForeignKey, Operator, Table, TableBuilder, UniqueKey,
    is_reserved_keyword,
};

/// Builds a [`ParseError`] and reports it through the log.
fn fail(table: &str, kind: ParseErrorKind, span: Span) -> ParseError {
    let err = ParseError::new(kind, table, span);
    error!("{err}");
    err
}

/// Returns the text of a bare word token.
fn word(token: &Token) -> Option<&str> {
    match &token.kind {
        TokenKind::Word(w) => Some(w),
        _ => None,
    }
}

/// Schema parser.
///
/// Parsing is a single forward pass over the token cursor. The only
/// backtracking is a one-token step back after the closing parenthesis of a
/// field list. The first error ends the table being parsed; no partially
/// built table is ever returned.
pub struct Parser {
    cursor: TokenCursor,
    /// Names of the tables parsed so far by [`Parser::parse_next_table`].
    declared: BTreeSet<String>,
}

impl Parser {
    /// Creates a parser over already tokenized input.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            declared: BTreeSet::new(),
        }
    }

    /// Tokenizes `source` and creates a parser over it.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` wrapping the [`crate::LexError`] if the source
    /// cannot be tokenized.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize().map_err(|e| {
            let err = ParseError::from(e);
            error!("{err}");
            err
        })?;
        Ok(Self::new(tokens))
    }

    /// Returns the underlying token cursor.
    #[must_use]
    pub const fn cursor(&self) -> &TokenCursor {
        &self.cursor
    }

    /// Parses the next `table <name> { ... }` definition.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the definition is malformed or fails
    /// validation, or if a table of the same name was already parsed.
    pub fn parse_next_table(&mut self) -> Result<Option<Table>, ParseError> {
        let Some(token) = self.advance() else {
            return Ok(None);
        };
        if !token.is_word("table") {
            return Err(fail(
                "",
                ParseErrorKind::UnknownDirective {
                    token: token.text().to_string(),
                },
                token.span,
            ));
        }
        let (name, span) = self
            .next_name()
            .map_err(|span| fail("", ParseErrorKind::MissingTableName, span))?;
        if self.declared.contains(&name) {
            return Err(fail(
                &name,
                ParseErrorKind::DuplicateTable {
                    table: name.clone(),
                },
                span,
            ));
        }

        debug!(table = %name, "parsing table");
        let table = self.parse_table(&name)?;
        self.declared.insert(name);
        Ok(Some(table))
    }

    /// Parses the `{ ... }` block of table `name` and normalizes the result.
    ///
    /// The cursor must be positioned right after the table name.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` on the first malformed or invalid declaration.
    pub fn parse_table(&mut self, name: &str) -> Result<Table, ParseError> {
        self.expect_block_open(name)?;
        let mut table = TableBuilder::new(name);

        loop {
            let Some(token) = self.advance() else {
                return Err(fail(
                    name,
                    ParseErrorKind::UnexpectedEof {
                        expected: "'}' to close the table",
                    },
                    self.cursor.eof_span(),
                ));
            };
            match word(&token) {
                Some("field") => self.parse_field(&mut table)?,
                Some("constraints") => self.parse_constraints(&mut table)?,
                Some("namespace") => {
                    let (namespace, _) = self.expect_name(name, "namespace", name)?;
                    table.set_namespace(namespace);
                }
                Some("classname") => {
                    let (classname, _) = self.expect_name(name, "classname", name)?;
                    table.set_classname(classname);
                }
                _ if token.kind == TokenKind::RightBrace => {
                    return table.finish().map_err(|kind| fail(name, kind, token.span));
                }
                _ => return Err(self.unknown_directive(name, &token)),
            }
        }
    }

    /// Skips tokens up to the next `table` keyword.
    ///
    /// Used to resume after a failed definition; returns the number of
    /// skipped tokens.
    pub fn skip_to_next_table(&mut self) -> usize {
        let mut skipped = 0;
        while let Some(token) = self.cursor.peek() {
            if token.is_word("table") {
                break;
            }
            self.cursor.next();
            skipped += 1;
        }
        skipped
    }

    /// Parses one `field <name> { ... }` block; `field` is already consumed.
    fn parse_field(&mut self, table: &mut TableBuilder) -> Result<(), ParseError> {
        let table_name = table.name().to_string();
        let (name, name_span) = self
            .next_name()
            .map_err(|span| fail(&table_name, ParseErrorKind::MissingFieldName, span))?;
        if is_reserved_keyword(&name) {
            return Err(fail(
                &table_name,
                ParseErrorKind::ReservedKeyword { field: name },
                name_span,
            ));
        }
        self.expect_block_open(&table_name)?;

        let mut field = Field::new(name.as_str());
        loop {
            let Some(token) = self.advance() else {
                return Err(fail(
                    &table_name,
                    ParseErrorKind::UnexpectedEof {
                        expected: "'}' to close the field",
                    },
                    self.cursor.eof_span(),
                ));
            };
            if token.kind == TokenKind::RightBrace {
                break;
            }

            match word(&token) {
                Some("type") => {
                    let (value, span) = self.expect_name(&table_name, "type", &name)?;
                    field.field_type = FieldType::from_name(&value).ok_or_else(|| {
                        fail(
                            &table_name,
                            ParseErrorKind::UnknownType {
                                field: name.clone(),
                                name: value.clone(),
                            },
                            span,
                        )
                    })?;
                }
                Some("default") => {
                    let value = self.expect_value(&table_name, "default", &name)?;
                    if let Some(existing) = &field.default_value {
                        return Err(fail(
                            &table_name,
                            ParseErrorKind::DuplicateDefault {
                                field: name,
                                existing: existing.clone(),
                            },
                            token.span,
                        ));
                    }
                    field.default_value = Some(value);
                }
                Some("operator") => {
                    let (value, span) = self.expect_name(&table_name, "operator", &name)?;
                    field.update_operator = Operator::from_name(&value).ok_or_else(|| {
                        fail(
                            &table_name,
                            ParseErrorKind::UnknownOperator {
                                field: name.clone(),
                                name: value.clone(),
                            },
                            span,
                        )
                    })?;
                }
                Some("length") => {
                    if !self.cursor.has_next() {
                        return Err(fail(
                            &table_name,
                            ParseErrorKind::MissingValue {
                                directive: "length",
                                owner: name,
                            },
                            self.cursor.eof_span(),
                        ));
                    }
                    if !field.field_type.supports_length() {
                        return Err(fail(
                            &table_name,
                            ParseErrorKind::UnsupportedLength {
                                field: name,
                                field_type: field.field_type,
                            },
                            token.span,
                        ));
                    }
                    let (value, span) = self.expect_name(&table_name, "length", &name)?;
                    let length = value.parse::<u32>().ok().filter(|l| *l > 0);
                    let Some(length) = length else {
                        return Err(fail(
                            &table_name,
                            ParseErrorKind::InvalidLength { field: name, value },
                            span,
                        ));
                    };
                    field.length = Some(length);
                }
                Some(directive) => {
                    let Some(ty) = ConstraintType::from_name(directive) else {
                        return Err(self.unknown_directive(&table_name, &token));
                    };
                    if ty == ConstraintType::ForeignKey {
                        let foreign_key = self.parse_foreign_target(&table_name, &name)?;
                        table
                            .add_foreign_key(&name, foreign_key)
                            .map_err(|kind| fail(&table_name, kind, token.span))?;
                    }
                    table.add_constraint(&name, ty.mask());
                }
                None => return Err(self.unknown_directive(&table_name, &token)),
            }
        }

        // `length` may precede a `type` that doesn't take one
        if field.length.is_some() && !field.field_type.supports_length() {
            return Err(fail(
                &table_name,
                ParseErrorKind::UnsupportedLength {
                    field: name,
                    field_type: field.field_type,
                },
                name_span,
            ));
        }

        table
            .add_field(field)
            .map_err(|kind| fail(&table_name, kind, name_span))
    }

    /// Parses a `constraints { ... }` block; `constraints` is already consumed.
    fn parse_constraints(&mut self, table: &mut TableBuilder) -> Result<(), ParseError> {
        let table_name = table.name().to_string();
        self.expect_block_open(&table_name)?;

        while let Some((names, group_span)) = self.parse_field_group(&table_name)? {
            let owner = names.iter().cloned().collect::<Vec<_>>().join(", ");
            let Some(token) = self.advance() else {
                return Err(fail(
                    &table_name,
                    ParseErrorKind::MissingValue {
                        directive: "constraint type",
                        owner,
                    },
                    self.cursor.eof_span(),
                ));
            };
            trace!(table = %table_name, token = %token.text(), "constraint type");
            let ty = token
                .as_name()
                .and_then(ConstraintType::from_name)
                .ok_or_else(|| {
                    fail(
                        &table_name,
                        ParseErrorKind::UnknownConstraintType {
                            token: token.text().to_string(),
                        },
                        token.span,
                    )
                })?;

            if ty == ConstraintType::ForeignKey {
                if names.len() != 1 {
                    return Err(fail(
                        &table_name,
                        ParseErrorKind::ForeignKeyFieldCountMismatch { count: names.len() },
                        group_span,
                    ));
                }
                let foreign_key = self.parse_foreign_target(&table_name, &owner)?;
                table
                    .add_foreign_key(&owner, foreign_key)
                    .map_err(|kind| fail(&table_name, kind, group_span))?;
            }

            if names.len() == 1 {
                table.add_constraint(&owner, ty.mask());
            } else if ty == ConstraintType::Unique {
                table.add_unique_key(names);
            } else if ty == ConstraintType::PrimaryKey {
                // composite primary key: every member gets the PRIMARY_KEY bit
                // and counts towards `Table::primary_keys`
                for name in &names {
                    table.add_constraint(name, ty.mask());
                }
            } else {
                return Err(fail(
                    &table_name,
                    ParseErrorKind::MultiFieldNonUniqueConstraint {
                        fields: names.into_iter().collect(),
                        types: ty.mask(),
                    },
                    group_span,
                ));
            }
        }
        Ok(())
    }

    /// Parses the field names of one constraint entry.
    ///
    /// Returns `None` when the closing `}` of the block is reached.
    fn parse_field_group(
        &mut self,
        table: &str,
    ) -> Result<Option<(UniqueKey, Span)>, ParseError> {
        let Some(token) = self.advance() else {
            return Err(fail(
                table,
                ParseErrorKind::UnexpectedEof {
                    expected: "'}' to close the constraints",
                },
                self.cursor.eof_span(),
            ));
        };
        match &token.kind {
            TokenKind::RightBrace => Ok(None),
            TokenKind::LeftParen => self.parse_field_list(table, token.span).map(Some),
            _ => match token.as_name() {
                Some(name) => Ok(Some((UniqueKey::from([name.to_string()]), token.span))),
                None => Err(fail(
                    table,
                    ParseErrorKind::ExpectedFieldList {
                        found: token.text().to_string(),
                    },
                    token.span,
                )),
            },
        }
    }

    /// Parses `a, b ... )` after an opening parenthesis at `open`.
    fn parse_field_list(
        &mut self,
        table: &str,
        open: Span,
    ) -> Result<(UniqueKey, Span), ParseError> {
        let mut names = UniqueKey::new();

        let end = loop {
            let Some(token) = self.advance() else {
                return Err(fail(table, ParseErrorKind::UnterminatedGroup, open));
            };
            if token.kind == TokenKind::Comma || token.is_empty() {
                continue;
            }
            if token.kind == TokenKind::RightParen {
                // an empty token may directly follow the closing parenthesis
                if self.cursor.has_next() && !self.advance().is_some_and(|t| t.is_empty()) {
                    self.cursor.prev();
                }
                break token.span.end;
            }
            match token.as_name() {
                Some(name) => {
                    names.insert(name.to_string());
                }
                None => return Err(fail(table, ParseErrorKind::UnterminatedGroup, token.span)),
            }
        };

        let span = Span::new(open.start, end);
        if names.is_empty() {
            return Err(fail(
                table,
                ParseErrorKind::ExpectedFieldList {
                    found: "()".to_string(),
                },
                span,
            ));
        }
        Ok((names, span))
    }

    /// Parses the `<table> <field>` target of a foreign key owned by `owner`.
    fn parse_foreign_target(
        &mut self,
        table: &str,
        owner: &str,
    ) -> Result<ForeignKey, ParseError> {
        let missing = |expected: &'static str, span: Span| {
            fail(
                table,
                ParseErrorKind::ForeignKeyMissingTarget {
                    field: owner.to_string(),
                    expected,
                },
                span,
            )
        };
        let (target_table, _) = self
            .next_name()
            .map_err(|span| missing("foreign table", span))?;
        let (target_field, _) = self
            .next_name()
            .map_err(|span| missing("foreign field", span))?;
        Ok(ForeignKey::new(target_table, target_field))
    }

    /// Rejects `token` as a directive of the enclosing block.
    ///
    /// A `table` word here means the block was left open; it is un-consumed
    /// so that recovery resumes at that definition.
    fn unknown_directive(&mut self, table: &str, token: &Token) -> ParseError {
        if token.is_word("table") {
            self.cursor.prev();
        }
        fail(
            table,
            ParseErrorKind::UnknownDirective {
                token: token.text().to_string(),
            },
            token.span,
        )
    }

    /// Consumes the next token.
    fn advance(&mut self) -> Option<Token> {
        let token = self.cursor.next()?.clone();
        trace!(token = %token.text(), "token");
        Some(token)
    }

    /// Consumes a name token, returning the span to blame on failure.
    fn next_name(&mut self) -> Result<(String, Span), Span> {
        match self.advance() {
            Some(token) => match token.as_name() {
                Some(name) => Ok((name.to_string(), token.span)),
                None => Err(token.span),
            },
            None => Err(self.cursor.eof_span()),
        }
    }

    fn expect_block_open(&mut self, table: &str) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token.kind == TokenKind::LeftBrace => Ok(()),
            Some(token) => Err(fail(
                table,
                ParseErrorKind::ExpectedBlockOpen {
                    found: token.text().to_string(),
                },
                token.span,
            )),
            None => Err(fail(
                table,
                ParseErrorKind::UnexpectedEof { expected: "'{'" },
                self.cursor.eof_span(),
            )),
        }
    }

    /// Consumes the name argument of `directive`.
    fn expect_name(
        &mut self,
        table: &str,
        directive: &'static str,
        owner: &str,
    ) -> Result<(String, Span), ParseError> {
        self.next_name().map_err(|span| {
            fail(
                table,
                ParseErrorKind::MissingValue {
                    directive,
                    owner: owner.to_string(),
                },
                span,
            )
        })
    }

    /// Consumes a literal argument of `directive`; empty strings are allowed.
    fn expect_value(
        &mut self,
        table: &str,
        directive: &'static str,
        owner: &str,
    ) -> Result<String, ParseError> {
        let token = self.advance();
        let span = token.as_ref().map_or(self.cursor.eof_span(), |t| t.span);
        token
            .as_ref()
            .and_then(Token::as_value)
            .map(str::to_string)
            .ok_or_else(|| {
                fail(
                    table,
                    ParseErrorKind::MissingValue {
                        directive,
                        owner: owner.to_string(),
                    },
                    span,
                )
            })
    }
}
