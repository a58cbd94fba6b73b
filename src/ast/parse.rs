use pest::Parser;
use pest::iterators::Pair;
use pest::error::{Error, ErrorVariant};

use pest_derive::*;
use crate::ast::{Expression, Symbol};

#[derive(Parser)]
#[grammar = "../grammar.pest"]
struct Grammar;

/// Read a whitespace separated prefix-notation formula such as `* x7 * x6 - x6`.
///
/// This is a tokenizer, not a validator: the symbols come back in the order
/// they were written, with one `Stop` appended.
pub fn parse(source: &str) -> Result<Expression, Error<Rule>> {
    let pairs = Grammar::parse(Rule::source, source)?;
    let mut symbols = vec![];
    for pair in pairs {
        match pair.as_rule() {
            // the stop is implied, we add it ourselves below
            Rule::EOI | Rule::stop => { break; }
            _ => symbols.push(parse_symbol(pair)?),
        }
    }
    Ok(Expression::terminated(symbols))
}

fn parse_symbol(pair: Pair<Rule>) -> Result<Symbol, Error<Rule>> {
    let symbol = match pair.as_rule() {
        Rule::not => Symbol::Not,
        Rule::or => Symbol::Or,
        Rule::and => Symbol::And,
        Rule::falsity => Symbol::False,
        Rule::truth => Symbol::True,
        Rule::variable => {
            // the grammar guarantees at least one digit after the `x`
            match pair.as_str()[1..].parse::<u32>() {
                Ok(id) => Symbol::var(id),
                Err(why) => {
                    let variant = ErrorVariant::CustomError {
                        message: format!("bad variable index `{}`: {}", pair.as_str(), why)
                    };
                    return Err(Error::new_from_span(variant, pair.as_span()));
                }
            }
        }
        // silent rules and end markers produce no symbol
        _ => {
            let variant = ErrorVariant::CustomError {
                message: format!("rule {:?} does not denote a symbol", pair.as_rule())
            };
            return Err(Error::new_from_span(variant, pair.as_span()));
        }
    };
    Ok(symbol)
}
