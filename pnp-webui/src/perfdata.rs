#[allow(unused)]
use tracing::{debug, error, info, span, trace, warn, Instrument, Level};

use nom::{
    bytes::complete::{take_till1, take_while},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};

/// Skip any run of whitespace, including none at all.
fn blank0(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

/// A single metric, e.g. `rta=0.052ms;100;500;0`.  Anything that isn't whitespace is accepted,
/// the graph backend is the one that has to make sense of it.
fn metric_token1(input: &str) -> IResult<&str, &str> {
    preceded(blank0, take_till1(char::is_whitespace))(input)
}

/// Splits a performance data string into its metric tokens.
///
/// Leading, trailing, and repeated whitespace (spaces, tabs, newlines) never produces an empty
/// token.
#[tracing::instrument]
pub(crate) fn metric_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    terminated(many0(metric_token1), blank0)(input)
}

/// Returns the metric tokens in `perf_data`, in order.
///
/// This never fails: input the lexer can't consume is logged and dropped.
pub fn metrics(perf_data: &str) -> Vec<&str> {
    match metric_tokens(perf_data) {
        Ok((rest, tokens)) => {
            if !rest.is_empty() {
                warn!(rest, "trailing perf data ignored");
            }
            tokens
        }
        Err(e) => {
            warn!(%e, "couldn't tokenize perf data");
            Vec::new()
        }
    }
}

/// Number of graphs the backend holds for `perf_data`, one per metric.
pub fn metric_count(perf_data: &str) -> usize {
    let count = metrics(perf_data).len();
    trace!(count);
    count
}
