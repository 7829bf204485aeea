//! Trigger condition expressions for menu items
//!
//! Grammar:
//!   or    := and ( "||" and )*
//!   and   := unary ( "&&" unary )*
//!   unary := "!" unary | "(" or ")" | "true" | "false" | DATA | NAME
//!
//! NAME is a lower-level decision name (true when it was added and fired).
//! DATA is `ID:ORIG` with an optional `/SPEC` (decimal or 0x hex), true when a
//! matching object was added.

use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

use crate::core::EventAccumulator;
use crate::types::{DataType, Specification};

lazy_static! {
    static ref RE_TOKEN: Regex = Regex::new(
        r"^\s*(?:(\|\|)|(&&)|(!)|(\()|(\))|([A-Za-z0-9_*]+:[A-Za-z0-9_*]+(?:/(?:0[xX][0-9A-Fa-f]+|[0-9]+))?)|([A-Za-z_][A-Za-z0-9_.\-]*))"
    ).expect("token regex is valid");
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Or,
    And,
    Not,
    Open,
    Close,
    Data(String),
    Name(String),
}

/// Parsed condition
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `true` / `false`
    Const(bool),
    /// A lower-level decision fired
    Decision(String),
    /// An object of this type (and spec, if given) was added
    Data {
        data_type: DataType,
        spec: Option<Specification>,
    },
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Evaluate against the inputs of the current event
    pub fn evaluate(&self, events: &EventAccumulator) -> bool {
        match self {
            Condition::Const(value) => *value,
            Condition::Decision(name) => events.decision_fired(name),
            Condition::Data { data_type, spec } => events.has_object(data_type, *spec),
            Condition::Not(inner) => !inner.evaluate(events),
            Condition::And(a, b) => a.evaluate(events) && b.evaluate(events),
            Condition::Or(a, b) => a.evaluate(events) || b.evaluate(events),
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err("condition is empty".to_string());
        }
        let mut parser = Parser { tokens, pos: 0 };
        let condition = parser.parse_or()?;
        match parser.peek() {
            None => Ok(condition),
            Some(token) => Err(format!("unexpected {:?} after end of expression", token)),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut rest = text;
    loop {
        if rest.trim().is_empty() {
            return Ok(tokens);
        }
        let caps = RE_TOKEN
            .captures(rest)
            .ok_or_else(|| format!("unrecognised text at '{}'", rest.trim()))?;
        let token = if caps.get(1).is_some() {
            Token::Or
        } else if caps.get(2).is_some() {
            Token::And
        } else if caps.get(3).is_some() {
            Token::Not
        } else if caps.get(4).is_some() {
            Token::Open
        } else if caps.get(5).is_some() {
            Token::Close
        } else if let Some(m) = caps.get(6) {
            Token::Data(m.as_str().to_string())
        } else if let Some(m) = caps.get(7) {
            Token::Name(m.as_str().to_string())
        } else {
            return Err(format!("unrecognised text at '{}'", rest.trim()));
        };
        tokens.push(token);
        rest = &rest[caps[0].len()..];
    }
}

fn parse_data(text: &str) -> Result<Condition, String> {
    let (type_text, spec_text) = match text.split_once('/') {
        Some((t, s)) => (t, Some(s)),
        None => (text, None),
    };
    let data_type: DataType = type_text
        .parse()
        .map_err(|_| format!("invalid data type '{}'", type_text))?;
    let spec = match spec_text {
        None => None,
        Some(s) => {
            let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => s.parse::<u32>(),
            };
            Some(parsed.map_err(|_| format!("invalid specification '{}'", s))?)
        }
    };
    Ok(Condition::Data { data_type, spec })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<Condition, String> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.parse_and()?;
            left = Condition::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Condition, String> {
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Condition::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Condition, String> {
        match self.next() {
            Some(Token::Not) => Ok(Condition::Not(Box::new(self.parse_unary()?))),
            Some(Token::Open) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err("missing ')'".to_string()),
                }
            }
            Some(Token::Name(name)) => Ok(if name == "true" {
                Condition::Const(true)
            } else if name == "false" {
                Condition::Const(false)
            } else {
                Condition::Decision(name)
            }),
            Some(Token::Data(text)) => parse_data(&text),
            Some(token) => Err(format!("unexpected {:?}", token)),
            None => Err("unexpected end of condition".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TriggerDecision;

    fn events(fired: &[&str], quiet: &[&str]) -> EventAccumulator {
        let mut acc = EventAccumulator::new();
        for name in fired {
            acc.add_decision(&TriggerDecision::new(*name, true)).unwrap();
        }
        for name in quiet {
            acc.add_decision(&TriggerDecision::new(*name, false)).unwrap();
        }
        acc
    }

    fn eval(text: &str, acc: &EventAccumulator) -> bool {
        text.parse::<Condition>().unwrap().evaluate(acc)
    }

    #[test]
    fn test_single_name() {
        let acc = events(&["MUON"], &["TPC"]);
        assert!(eval("MUON", &acc));
        assert!(!eval("TPC", &acc));
        assert!(!eval("PHOS", &acc));
    }

    #[test]
    fn test_precedence_and_binds_tighter() {
        let acc = events(&["A"], &["B", "C"]);
        // A || (B && C)
        assert!(eval("A || B && C", &acc));
        // (A || B) && C
        assert!(!eval("(A || B) && C", &acc));
    }

    #[test]
    fn test_negation_and_constants() {
        let acc = events(&[], &["A"]);
        assert!(eval("!A", &acc));
        assert!(eval("true", &acc));
        assert!(!eval("false || !true", &acc));
        assert!(eval("!!true", &acc));
    }

    #[test]
    fn test_data_reference() {
        let mut acc = EventAccumulator::new();
        let phos: DataType = "CLUSTERS:PHOS".parse().unwrap();
        acc.add_object(&serde_json::Value::Null, &phos, 0x10).unwrap();
        assert!(eval("CLUSTERS:PHOS", &acc));
        assert!(eval("CLUSTERS:PHOS/0x10", &acc));
        assert!(eval("CLUSTERS:PHOS/16", &acc));
        assert!(!eval("CLUSTERS:PHOS/0x20", &acc));
        assert!(eval("********:PHOS", &acc));
        assert!(!eval("TRACKS:TPC", &acc));
    }

    #[test]
    fn test_syntax_errors() {
        assert!("".parse::<Condition>().is_err());
        assert!("A &&".parse::<Condition>().is_err());
        assert!("(A || B".parse::<Condition>().is_err());
        assert!("A B".parse::<Condition>().is_err());
        assert!("A $ B".parse::<Condition>().is_err());
        assert!("TOOLONGIDENT:PHOS".parse::<Condition>().is_err());
    }
}
