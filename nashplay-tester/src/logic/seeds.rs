use anyhow::{Context, Result, bail};

/// Resolve a list of CLI seed arguments into concrete seeds.
///
/// Supports decimal integers (negative values fold to their magnitude),
/// `0x`-prefixed hex, and the keyword `random` which draws a fresh seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("random") {
            let seed = rand::random::<u64>();
            log::info!("drew random seed {seed}");
            seeds.push(seed);
            continue;
        }

        if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            let seed = u64::from_str_radix(hex, 16)
                .with_context(|| format!("invalid hex seed '{token}'"))?;
            seeds.push(seed);
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            seeds.push(value);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            seeds.push(value.unsigned_abs());
            continue;
        }

        bail!("unrecognised seed '{token}' (expected an integer, 0x-hex, or 'random')");
    }

    if seeds.is_empty() {
        bail!("no seeds supplied");
    }
    seeds.dedup();
    Ok(seeds)
}
