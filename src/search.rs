//! Keyword search preset
//!
//! A small boolean query language built on the engine: words are matched as substrings
//! of a target string and combined with and / or / not, nested with the configured
//! groupings. With the default configuration:
//!
//! ```text
//! marley && (stephen && !(ziggy || damian) || bob)
//! ```
//!
//! matches `"bob marley - jammin"`.
//!
//! A [`Query`] is parsed once and can be matched against any number of targets; each
//! match re-evaluates the same tree with a leaf bound to that target.

use crate::ast::Expression;
use crate::config::SearchConfig;
use crate::error::{Error, EvalError, ParseError};
use crate::parsing::Parser;
use once_cell::sync::Lazy;

/// Parser for the default configuration, shared by [`matches`]
static DEFAULT_PARSER: Lazy<Parser<bool>> = Lazy::new(|| parser(&SearchConfig::default()));

/// Build the boolean parser described by `config`.
///
/// Values evaluate to `false` until a target is bound with [`Query::matches`].
pub fn parser(config: &SearchConfig) -> Parser<bool> {
    let operators = &config.operators;
    let mut parser = Parser::with_leaf(|_: &str| false)
        .binary(operators.and.as_str(), |a, b| a && b)
        .binary(operators.or.as_str(), |a, b| a || b)
        .unary(operators.not.as_str(), |a: bool| !a)
        .associativity(config.associativity);

    for grouping in &config.groupings {
        parser = parser.grouping(grouping.start(), grouping.end());
    }
    parser
}

/// A compiled query
#[derive(Debug, Clone)]
pub struct Query {
    expression: Expression<bool>,
    case_sensitive: bool,
}

impl Query {
    pub fn compile(query: &str, config: &SearchConfig) -> Result<Self, ParseError> {
        Self::compile_with(&parser(config), query, config.case_sensitive)
    }

    fn compile_with(parser: &Parser<bool>, query: &str, case_sensitive: bool) -> Result<Self, ParseError> {
        Ok(Self {
            expression: parser.parse(query)?,
            case_sensitive,
        })
    }

    pub fn expression(&self) -> &Expression<bool> {
        &self.expression
    }

    /// Evaluate the query with every word tested as a substring of `target`
    pub fn matches(&self, target: &str) -> Result<bool, EvalError> {
        let resolved = if self.case_sensitive {
            self.expression.evaluate_with(|word: &str| target.contains(word))
        } else {
            let target = target.to_lowercase();
            self.expression
                .evaluate_with(|word: &str| target.contains(&word.to_lowercase()))
        }?;
        Ok(resolved.into_value())
    }
}

/// Compile `query` with the default syntax and match it against `target`
pub fn matches(query: &str, target: &str) -> Result<bool, Error> {
    let query = Query::compile_with(&DEFAULT_PARSER, query, SearchConfig::default().case_sensitive)?;
    Ok(query.matches(target)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Loader;
    use crate::error::OperandFault;

    const QUERY: &str = "marley && (stephen && !(ziggy || damian) || bob)";

    #[test]
    fn test_domain_example() {
        let query = Query::compile(QUERY, &SearchConfig::default()).unwrap();

        assert!(query.matches("bob marley - jammin").unwrap());
        assert!(query.matches("stephen marley - break us apart").unwrap());
        assert!(!query.matches("damian marley - welcome to jamrock").unwrap());
        assert!(!query.matches("peter tosh - legalize it").unwrap());
    }

    #[test]
    fn test_unbound_leaf_is_false() {
        let query = Query::compile("bob", &SearchConfig::default()).unwrap();
        assert!(!*query.expression().evaluate().unwrap().value());
        assert!(*query.expression().evaluate_with(|_| true).unwrap().value());
    }

    #[test]
    fn test_case_insensitive_config() {
        let config = Loader::new()
            .set_override("case_sensitive", false)
            .unwrap()
            .build()
            .unwrap();
        let query = Query::compile("Marley && !Tosh", &config).unwrap();

        assert!(query.matches("BOB MARLEY").unwrap());
        assert!(!Query::compile("Marley", &SearchConfig::default())
            .unwrap()
            .matches("BOB MARLEY")
            .unwrap());
    }

    #[test]
    fn test_custom_tokens() {
        let config = Loader::new()
            .with_toml("[operators]\nand = \" AND \"\nor = \" OR \"\nnot = \"NOT \"\n")
            .build()
            .unwrap();
        let query = Query::compile("bob AND (NOT ziggy OR damian)", &config).unwrap();

        assert!(query.matches("bob marley").unwrap());
        assert!(!query.matches("bob and ziggy").unwrap());
    }

    #[test]
    fn test_matches_convenience() {
        assert!(matches("bob || ziggy", "ziggy marley").unwrap());
        assert!(matches("(bob", "bob").is_err());
        match matches("bob &&", "bob") {
            Err(Error::Eval(EvalError::InvalidOperand { fault, index })) => {
                assert_eq!(fault, OperandFault::MissingRight);
                assert_eq!(index, Some(4));
            }
            other => panic!("Expected invalid operand, got {other:?}"),
        }
    }
}
