use nom::{
    bytes::complete::take_while1,
    character::complete::{multispace0, one_of},
    combinator::{opt, recognize},
    sequence::pair,
    IResult,
};
use vectionary_protocol::Span;

/// Letters, digits and underscore, in any script.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// One word-like run: word characters with at most one internal apostrophe
/// followed by more word characters ("don't", "O'Neill", "it’s").
pub fn word_run(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(is_word_char),
        opt(pair(one_of("'\u{2019}"), take_while1(is_word_char))),
    ))(input)
}

/// One whitespace-delimited chunk, punctuation attached.
pub fn chunk(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

/// Runs `token` repeatedly over `original_input`, skipping whitespace and any
/// character `token` rejects, and records byte spans.
pub fn scan_with_spans<'a, F>(original_input: &'a str, mut token: F) -> Vec<(Span, &'a str)>
where
    F: FnMut(&'a str) -> IResult<&'a str, &'a str>,
{
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        match token(input) {
            Ok((next_input, matched)) => {
                let start = original_input.len() - input.len();
                result.push((Span::new(start, start + matched.len()), matched));
                input = next_input;
            }
            Err(_) => {
                // Not part of any token: skip one char
                match input.chars().next() {
                    Some(c) => input = &input[c.len_utf8()..],
                    None => break,
                }
            }
        }
    }

    result
}
