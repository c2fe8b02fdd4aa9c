//! Query-option grammar
//!
//! nom combinators for the textual query options: `$filter` expressions,
//! `$orderby` clause chains, `$select`/`$expand` path lists, and key-segment
//! literals. Parsing is purely syntactic; identifier resolution against the
//! model happens in the parser module.

use super::error::QueryError;
use crate::query::{
    ComparisonOp, FilterExpr, Literal, OrderByItem, PropertyPath, SortDirection,
};
use chrono::{NaiveDate, NaiveDateTime};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace0, multispace1, satisfy},
    combinator::{all_consuming, map, map_res, not, opt, recognize, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

/// Parse a complete `$filter` expression
pub(crate) fn parse_filter(input: &str) -> Result<FilterExpr, QueryError> {
    match all_consuming(delimited(multispace0, or_expr, multispace0))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(_) => Err(QueryError::InvalidFilter {
            input: input.to_string(),
        }),
    }
}

/// Parse a complete `$orderby` clause chain
pub(crate) fn parse_orderby(input: &str) -> Result<Vec<OrderByItem>, QueryError> {
    let item = map(
        pair(
            property_path,
            opt(preceded(multispace1, sort_direction)),
        ),
        |(property, direction)| OrderByItem {
            property,
            direction: direction.unwrap_or_default(),
        },
    );
    match all_consuming(delimited(
        multispace0,
        separated_list1(delimited(multispace0, char(','), multispace0), item),
        multispace0,
    ))(input)
    {
        Ok((_, items)) => Ok(items),
        Err(_) => Err(QueryError::InvalidOrderBy {
            input: input.to_string(),
        }),
    }
}

/// Parse a comma-separated property path list (`$select`, `$expand`)
pub(crate) fn parse_paths(input: &str) -> Result<Vec<PropertyPath>, QueryError> {
    match all_consuming(delimited(
        multispace0,
        separated_list1(
            delimited(multispace0, char(','), multispace0),
            property_path,
        ),
        multispace0,
    ))(input)
    {
        Ok((_, paths)) => Ok(paths),
        Err(_) => Err(QueryError::InvalidSelect {
            input: input.to_string(),
        }),
    }
}

/// Parse the text inside a key parenthetical: a single literal, or
/// comma-separated `name=literal` components
pub(crate) fn parse_key(input: &str) -> Result<Vec<(Option<String>, Literal)>, QueryError> {
    let named = separated_list1(
        delimited(multispace0, char(','), multispace0),
        map(
            separated_pair(
                identifier,
                delimited(multispace0, char('='), multispace0),
                literal,
            ),
            |(name, lit)| (Some(name.to_string()), lit),
        ),
    );
    let single = map(literal, |lit| vec![(None, lit)]);
    match all_consuming(delimited(multispace0, alt((named, single)), multispace0))(input) {
        Ok((_, components)) => Ok(components),
        Err(_) => Err(QueryError::InvalidKey {
            input: input.to_string(),
        }),
    }
}

// =========================================================================
// Expression grammar
// =========================================================================

fn or_expr(input: &str) -> IResult<&str, FilterExpr> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(preceded(
        delimited(multispace1, tag("or"), multispace1),
        and_expr,
    ))(input)?;
    Ok((input, fold_boolean(first, rest, false)))
}

fn and_expr(input: &str) -> IResult<&str, FilterExpr> {
    let (input, first) = cmp_expr(input)?;
    let (input, rest) = many0(preceded(
        delimited(multispace1, tag("and"), multispace1),
        cmp_expr,
    ))(input)?;
    Ok((input, fold_boolean(first, rest, true)))
}

fn fold_boolean(first: FilterExpr, mut rest: Vec<FilterExpr>, is_and: bool) -> FilterExpr {
    if rest.is_empty() {
        return first;
    }
    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(first);
    items.append(&mut rest);
    if is_and {
        FilterExpr::And(items)
    } else {
        FilterExpr::Or(items)
    }
}

fn cmp_expr(input: &str) -> IResult<&str, FilterExpr> {
    let (input, left) = unary_expr(input)?;
    let (input, rest) = opt(pair(
        delimited(multispace1, comparison_op, multispace1),
        unary_expr,
    ))(input)?;
    Ok((input, match rest {
        Some((op, right)) => FilterExpr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        None => left,
    }))
}

fn unary_expr(input: &str) -> IResult<&str, FilterExpr> {
    alt((not_expr, term))(input)
}

fn not_expr(input: &str) -> IResult<&str, FilterExpr> {
    let (rest, _) = tag("not")(input)?;
    // `not` binds either a spaced operand or a parenthesized group; a name
    // like `notes` falls through to the term parser.
    let (rest, inner) = alt((preceded(multispace1, unary_expr), paren_expr))(rest)?;
    Ok((rest, FilterExpr::Not(Box::new(inner))))
}

fn term(input: &str) -> IResult<&str, FilterExpr> {
    alt((
        paren_expr,
        map(literal, FilterExpr::Literal),
        map(property_path, FilterExpr::Property),
    ))(input)
}

fn paren_expr(input: &str) -> IResult<&str, FilterExpr> {
    delimited(
        pair(char('('), multispace0),
        or_expr,
        pair(multispace0, char(')')),
    )(input)
}

fn comparison_op(input: &str) -> IResult<&str, ComparisonOp> {
    map_res(
        alt((
            tag("eq"),
            tag("ne"),
            tag("gt"),
            tag("ge"),
            tag("lt"),
            tag("le"),
        )),
        str::parse,
    )(input)
}

fn sort_direction(input: &str) -> IResult<&str, SortDirection> {
    map_res(
        terminated(alt((tag("asc"), tag("desc"))), ident_boundary),
        str::parse,
    )(input)
}

// =========================================================================
// Tokens
// =========================================================================

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Succeeds (consuming nothing) when the next character cannot continue an
/// identifier; keeps keyword literals from eating identifier prefixes
fn ident_boundary(input: &str) -> IResult<&str, ()> {
    not(satisfy(is_ident_char))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_'),
        take_while(is_ident_char),
    ))(input)
}

fn property_path(input: &str) -> IResult<&str, PropertyPath> {
    map(separated_list1(char('/'), identifier), |segments| {
        PropertyPath::new(segments.into_iter().map(str::to_string).collect())
    })(input)
}

/// Literal values: null, booleans, date/time, numbers, quoted strings
pub(crate) fn literal(input: &str) -> IResult<&str, Literal> {
    alt((
        null_literal,
        bool_literal,
        datetime_literal,
        date_literal,
        float_literal,
        int_literal,
        string_literal,
    ))(input)
}

fn null_literal(input: &str) -> IResult<&str, Literal> {
    value(Literal::Null, terminated(tag("null"), ident_boundary))(input)
}

fn bool_literal(input: &str) -> IResult<&str, Literal> {
    alt((
        value(Literal::Bool(true), terminated(tag("true"), ident_boundary)),
        value(Literal::Bool(false), terminated(tag("false"), ident_boundary)),
    ))(input)
}

fn date_literal(input: &str) -> IResult<&str, Literal> {
    map_res(
        recognize(tuple((digit1, char('-'), digit1, char('-'), digit1))),
        |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Literal::Date),
    )(input)
}

fn datetime_literal(input: &str) -> IResult<&str, Literal> {
    map_res(
        recognize(tuple((
            digit1,
            char('-'),
            digit1,
            char('-'),
            digit1,
            char('T'),
            digit1,
            char(':'),
            digit1,
            opt(pair(char(':'), digit1)),
        ))),
        |s: &str| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
                .map(Literal::DateTime)
        },
    )(input)
}

fn float_literal(input: &str) -> IResult<&str, Literal> {
    map_res(
        recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
        |s: &str| s.parse::<f64>().map(Literal::Float),
    )(input)
}

fn int_literal(input: &str) -> IResult<&str, Literal> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>().map(Literal::Int)
    })(input)
}

/// Single-quoted string; an embedded quote is doubled (`'O''Brien'`)
fn string_literal(input: &str) -> IResult<&str, Literal> {
    let (mut rest, _) = char('\'')(input)?;
    let mut out = String::new();
    loop {
        match rest.find('\'') {
            None => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    rest,
                    nom::error::ErrorKind::Char,
                )))
            }
            Some(pos) => {
                out.push_str(&rest[..pos]);
                let after = &rest[pos + 1..];
                if let Some(stripped) = after.strip_prefix('\'') {
                    out.push('\'');
                    rest = stripped;
                } else {
                    return Ok((after, Literal::String(out)));
                }
            }
        }
    }
}
