use pest::error::LineColLocation;
use pest::Parser;

use crate::calc::Calculator;
use crate::decimal::Decimal;
use crate::errors::*;

#[derive(Parser)]
#[grammar = "rpn.pest"]
pub struct RpnParser;

/// Evaluates a line of whitespace separated RPN input: numbers are entered,
/// everything else runs as a command. Words in double quotes may contain
/// spaces. Stops at the first failing word and returns its error; what was
/// evaluated before it stays on the stack.
pub fn eval(line: &str, calc: &mut Calculator) -> CalcErrorResult {
    let pairs = match RpnParser::parse(Rule::line, line) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(error = %e, "unparsable input");
            let (line_no, col) = match e.line_col {
                LineColLocation::Pos(pos) => pos,
                LineColLocation::Span(start, _) => start,
            };
            let msg = format!("{} at line {}, column {}", e.variant.message(), line_no, col);
            return Err(CalcError::ParseFailed(msg));
        }
    };

    for pair in pairs {
        let text = pair.as_span().as_str();
        match pair.as_rule() {
            Rule::number => calc.enter(Decimal::parse(text)?),
            Rule::quoted => calc.command(&text[1..text.len() - 1])?,
            Rule::word => calc.command(text)?,
            Rule::EOI => {}
            _ => return Err(CalcError::ParseFailed(text.to_string())),
        }
    }
    Ok(())
}
