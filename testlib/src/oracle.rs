//! Differential oracle for the two decode strategies.
//!
//! For a value `O` the oracle checks that:
//! 1. decoding `encode(O)` with either strategy gives back `O`,
//! 2. both strategies decode the same bytes to equal values,
//! 3. re-encoding a decoded value reproduces the original bytes.
//!
//! For raw input it checks that both strategies accept or reject it together.
//! [`check_rewrites`] feeds non-canonical rewrites of `encode(O)` through the raw input
//! check: layout rewrites must still decode to `O`, perturbed ones must only agree.

use std::fmt;

use serde::Serialize;
use swagspec_core::{
    DecodeOptions, DecodeStrategy, codec,
    codec::{Decode, MAX_DEPTH_CEILING, general::parse_strict},
};

use crate::{
    fuzz::{Fuzz, FuzzConfig, FuzzFuncs, Fuzzer},
    mutate::Mutator,
};

/// Rewrites checked per fuzz case by [`run`].
pub const REWRITES_PER_CASE: usize = 1;

/// The property a failing case violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// `decode(encode(O)) == O` for the given strategy.
    RoundTrip(DecodeStrategy),
    /// Both strategies decode the same bytes to equal values.
    Equivalence,
    /// `encode(decode(B)) == B` for the given strategy.
    Reencode(DecodeStrategy),
    /// Both strategies accept, or both reject, the same bytes.
    Acceptance,
    /// A layout rewrite of `encode(O)` decodes to `O`.
    Layout,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invariant::RoundTrip(strategy) => write!(f, "round-trip ({strategy})"),
            Invariant::Equivalence => f.write_str("decoder equivalence"),
            Invariant::Reencode(strategy) => write!(f, "re-encode determinism ({strategy})"),
            Invariant::Acceptance => f.write_str("acceptance parity"),
            Invariant::Layout => f.write_str("layout independence"),
        }
    }
}

/// Both sides of a violated invariant, in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{invariant} violated\n  expected: {expected}\n  actual:   {actual}")]
pub struct Divergence {
    pub invariant: Invariant,
    pub expected: String,
    pub actual: String,
}

/// Why a case failed.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Divergence(#[from] Divergence),

    /// A value the encoder produced was rejected by a decoder.
    #[error("{strategy} decoder rejected encoded input: {source}\n  input: {input}")]
    Rejected {
        strategy: DecodeStrategy,
        input: String,
        #[source]
        source: swagspec_core::Error,
    },

    #[error("encoding failed: {0}")]
    Encode(#[source] swagspec_core::Error),

    /// A failure on a rewritten encoding.
    #[error("{failure}\n  rewritten input: {input}")]
    Rewrite { input: String, failure: Box<Failure> },

    /// A failure of the case with the given index of a fuzz run.
    #[error("case {case} (seed {seed}): {failure}")]
    Case {
        case: usize,
        seed: u64,
        failure: Box<Failure>,
    },
}

/// Checks the round-trip, equivalence and re-encode invariants for `expected`.
pub fn check_value<T>(expected: &T) -> Result<(), Failure>
where
    T: Decode + Serialize + PartialEq + fmt::Debug,
{
    let bytes = codec::encode(expected).map_err(Failure::Encode)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let general = decode_with::<T>(DecodeStrategy::General, &bytes, &text)?;
    let optimized = decode_with::<T>(DecodeStrategy::Optimized, &bytes, &text)?;

    for (strategy, decoded) in [
        (DecodeStrategy::General, &general),
        (DecodeStrategy::Optimized, &optimized),
    ] {
        if decoded != expected {
            return Err(divergence(Invariant::RoundTrip(strategy), expected, decoded)?.into());
        }
    }
    if general != optimized {
        return Err(divergence(Invariant::Equivalence, &general, &optimized)?.into());
    }
    for (strategy, decoded) in [
        (DecodeStrategy::General, &general),
        (DecodeStrategy::Optimized, &optimized),
    ] {
        let reencoded = codec::encode(decoded).map_err(Failure::Encode)?;
        if reencoded != bytes {
            return Err(Divergence {
                invariant: Invariant::Reencode(strategy),
                expected: text,
                actual: String::from_utf8_lossy(&reencoded).into_owned(),
            }
            .into());
        }
    }
    Ok(())
}

/// Checks that both strategies agree on arbitrary `input`.
///
/// Returns the decoded value when both accept it and `None` when both reject it.
pub fn check_bytes<T>(input: &[u8]) -> Result<Option<T>, Failure>
where
    T: Decode + Serialize + PartialEq + fmt::Debug,
{
    let options = DecodeOptions::new();
    let general = codec::decode::<T>(input, options.strategy(DecodeStrategy::General));
    let optimized = codec::decode::<T>(input, options.strategy(DecodeStrategy::Optimized));

    match (general, optimized) {
        (Ok(general), Ok(optimized)) => {
            if general != optimized {
                return Err(divergence(Invariant::Equivalence, &general, &optimized)?.into());
            }
            let first = codec::encode(&general).map_err(Failure::Encode)?;
            let second = codec::encode(&optimized).map_err(Failure::Encode)?;
            if first != second {
                return Err(Divergence {
                    invariant: Invariant::Reencode(DecodeStrategy::Optimized),
                    expected: String::from_utf8_lossy(&first).into_owned(),
                    actual: String::from_utf8_lossy(&second).into_owned(),
                }
                .into());
            }
            Ok(Some(general))
        }
        (Err(_), Err(_)) => Ok(None),
        (general, optimized) => Err(Divergence {
            invariant: Invariant::Acceptance,
            expected: outcome(&general),
            actual: outcome(&optimized),
        }
        .into()),
    }
}

/// Checks `rounds` rewrites of the encoding of `expected`.
///
/// Each round writes the document with a fresh layout, which must decode to
/// `expected` on both strategies, and then perturbs it with a shadowing `$ref` or a
/// `null` member, on which both strategies must agree.
pub fn check_rewrites<T>(expected: &T, mutator: &mut Mutator, rounds: usize) -> Result<(), Failure>
where
    T: Decode + Serialize + PartialEq + fmt::Debug,
{
    let bytes = codec::encode(expected).map_err(Failure::Encode)?;
    let tree = parse_strict(&bytes, MAX_DEPTH_CEILING).map_err(|source| Failure::Rejected {
        strategy: DecodeStrategy::General,
        input: String::from_utf8_lossy(&bytes).into_owned(),
        source,
    })?;

    for _ in 0..rounds {
        let layout = mutator.relayout(&tree);
        let decoded = check_bytes::<T>(&layout).map_err(|failure| rewrite(&layout, failure))?;
        match decoded {
            Some(decoded) if decoded == *expected => {}
            Some(decoded) => {
                let failure = divergence(Invariant::Layout, expected, &decoded)?.into();
                return Err(rewrite(&layout, failure));
            }
            None => {
                let failure = Divergence {
                    invariant: Invariant::Layout,
                    expected: "accepted".to_owned(),
                    actual: "rejected".to_owned(),
                };
                return Err(rewrite(&layout, failure.into()));
            }
        }

        let mut perturbed = tree.clone();
        if let Some(perturbation) = mutator.perturb(&mut perturbed) {
            let input = mutator.relayout(&perturbed);
            tracing::trace!(?perturbation, "checking perturbed rewrite");
            check_bytes::<T>(&input).map_err(|failure| rewrite(&input, failure))?;
        }
    }
    Ok(())
}

/// Fuzzes `cases` values of type `T` and checks each with [`check_value`] and
/// [`check_rewrites`].
///
/// Returns the number of checked cases.
pub fn run<T>(config: FuzzConfig, funcs: FuzzFuncs, cases: usize) -> Result<usize, Failure>
where
    T: Fuzz + Decode + Serialize + PartialEq + fmt::Debug,
{
    let mut fuzzer = Fuzzer::with_funcs(config, funcs);
    let mut mutator = Mutator::new(config.seed);
    for case in 0..cases {
        let value = T::fuzz(&mut fuzzer);
        check_value(&value)
            .and_then(|()| check_rewrites(&value, &mut mutator, REWRITES_PER_CASE))
            .map_err(|failure| Failure::Case {
            case,
            seed: config.seed,
            failure: Box::new(failure),
        })?;
    }
    tracing::debug!(cases, seed = config.seed, "differential run passed");
    Ok(cases)
}

fn decode_with<T: Decode>(strategy: DecodeStrategy, bytes: &[u8], text: &str) -> Result<T, Failure> {
    codec::decode(bytes, DecodeOptions::new().strategy(strategy)).map_err(|source| {
        Failure::Rejected {
            strategy,
            input: text.to_owned(),
            source,
        }
    })
}

/// Builds a divergence showing both values serialized, falling back to their debug
/// form when the serialized forms are identical.
fn divergence<T>(invariant: Invariant, expected: &T, actual: &T) -> Result<Divergence, Failure>
where
    T: Serialize + fmt::Debug,
{
    let expected_json = codec::encode_to_string(expected).map_err(Failure::Encode)?;
    let actual_json = codec::encode_to_string(actual).map_err(Failure::Encode)?;
    if expected_json == actual_json {
        return Ok(Divergence {
            invariant,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        });
    }
    Ok(Divergence {
        invariant,
        expected: expected_json,
        actual: actual_json,
    })
}

fn rewrite(input: &[u8], failure: Failure) -> Failure {
    Failure::Rewrite {
        input: String::from_utf8_lossy(input).into_owned(),
        failure: Box::new(failure),
    }
}

fn outcome<T>(result: &swagspec_core::Result<T>) -> String {
    match result {
        Ok(_) => "accepted".to_owned(),
        Err(err) => format!("rejected: {err}"),
    }
}
