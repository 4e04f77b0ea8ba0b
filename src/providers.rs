// src/providers.rs

//! Offline stand-ins for the external data collaborators.
//!
//! Real provider integrations are out of scope; every series here is derived
//! deterministically from the ticker symbol so the shell works offline and
//! the rendered blocks are stable across runs.

/// A small ticker directory backing `search`.
pub const TICKER_DIRECTORY: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("AMC", "AMC Entertainment Holdings"),
    ("AMZN", "Amazon.com Inc."),
    ("BB", "BlackBerry Ltd."),
    ("GME", "GameStop Corp."),
    ("GOOG", "Alphabet Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("KO", "The Coca-Cola Company"),
    ("MSFT", "Microsoft Corp."),
    ("NOK", "Nokia Oyj"),
    ("NVDA", "NVIDIA Corp."),
    ("PLTR", "Palantir Technologies"),
    ("TSLA", "Tesla Inc."),
    ("V", "Visa Inc."),
    ("XOM", "Exxon Mobil Corp."),
];

/// Cheap deterministic generator seeded from the ticker symbol.
struct Lcg(u64);

impl Lcg {
    fn from_ticker(ticker: &str) -> Self {
        let seed = ticker
            .bytes()
            .fold(0x9e37_79b9_7f4a_7c15u64, |acc, b| {
                acc.rotate_left(7) ^ u64::from(b).wrapping_mul(0x100_0000_01b3)
            });
        Self(seed | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform float in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Pseudo close series for a ticker: a bounded random walk.
pub fn close_series(ticker: &str, len: usize) -> Vec<f64> {
    let mut rng = Lcg::from_ticker(ticker);
    let mut price = 20.0 + rng.unit() * 280.0;
    let mut series = Vec::with_capacity(len);
    for _ in 0..len {
        let step = (rng.unit() - 0.5) * 0.04;
        price = (price * (1.0 + step)).max(1.0);
        series.push(price);
    }
    series
}

/// Renders a one-screen quote block.
pub fn quote(ticker: &str) -> String {
    let series = close_series(ticker, 2);
    let prev = series[0];
    let last = series[1];
    let change = last - prev;
    let pct = change / prev * 100.0;
    format!(
        "{ticker} quote\n  last       {last:>10.2}\n  previous   {prev:>10.2}\n  change     {change:>+10.2} ({pct:+.2}%)"
    )
}

/// Renders a company profile block.
pub fn profile(ticker: &str) -> String {
    let name = TICKER_DIRECTORY
        .iter()
        .find(|(symbol, _)| *symbol == ticker)
        .map_or("(unlisted in offline directory)", |(_, name)| *name);
    let mut rng = Lcg::from_ticker(ticker);
    let employees = 1_000 + (rng.next() % 200_000);
    let mktcap = 1.0 + rng.unit() * 2_000.0;
    format!(
        "{ticker} profile\n  name       {name}\n  employees  {employees}\n  market cap {mktcap:.1}B"
    )
}

/// Renders `limit` periods of a named financial statement.
pub fn statement(ticker: &str, kind: &str, limit: usize, quarterly: bool) -> String {
    let mut rng = Lcg::from_ticker(ticker);
    let cadence = if quarterly { "quarterly" } else { "annual" };
    let mut out = format!("{ticker} {kind} ({cadence})");
    let base = 100.0 + rng.unit() * 10_000.0;
    for period in 0..limit {
        let value = base * (1.0 + rng.unit() * 0.4) * (1.0 - 0.05 * period as f64);
        out.push_str(&format!("\n  period -{period:<2} {value:>12.1}M"));
    }
    out
}

/// Renders a generic named metric table (ratings, estimates, ratios...).
pub fn metric_table(ticker: &str, title: &str, rows: &[&str]) -> String {
    let mut rng = Lcg::from_ticker(ticker);
    let mut out = format!("{ticker} {title}");
    for row in rows {
        let value = rng.unit() * 100.0;
        out.push_str(&format!("\n  {row:<16} {value:>8.2}"));
    }
    out
}

/// Case-insensitive substring search over the ticker directory.
pub fn search(query: &str, limit: usize) -> Vec<(String, String)> {
    let needle = query.to_lowercase();
    TICKER_DIRECTORY
        .iter()
        .filter(|(symbol, name)| {
            symbol.to_lowercase().contains(&needle) || name.to_lowercase().contains(&needle)
        })
        .take(limit)
        .map(|(symbol, name)| (symbol.to_string(), name.to_string()))
        .collect()
}

/// Summary statistics over a series.
pub fn summary_stats(series: &[f64]) -> String {
    if series.is_empty() {
        return "no data".to_string();
    }
    let len = series.len() as f64;
    let mean = series.iter().sum::<f64>() / len;
    let var = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    format!(
        "  count {:>8}\n  mean  {mean:>8.2}\n  std   {:>8.2}\n  min   {min:>8.2}\n  max   {max:>8.2}",
        series.len(),
        var.sqrt()
    )
}

/// Plain-text histogram of a series.
pub fn histogram(series: &[f64], bins: usize) -> String {
    if series.is_empty() || bins == 0 {
        return "no data".to_string();
    }
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = ((max - min) / bins as f64).max(f64::EPSILON);
    let mut counts = vec![0usize; bins];
    for value in series {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(idx, count)| {
            let lo = min + idx as f64 * width;
            format!("  {lo:>8.2} | {}", "#".repeat(*count))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_is_deterministic_per_ticker() {
        assert_eq!(close_series("AAPL", 30), close_series("AAPL", 30));
        assert_ne!(close_series("AAPL", 30), close_series("GME", 30));
    }

    #[test]
    fn search_matches_symbol_and_name() {
        let by_symbol = search("gme", 10);
        assert!(by_symbol.iter().any(|(symbol, _)| symbol == "GME"));
        let by_name = search("coca", 10);
        assert!(by_name.iter().any(|(symbol, _)| symbol == "KO"));
        assert!(search("zzzz", 10).is_empty());
    }

    #[test]
    fn search_honors_the_limit() {
        assert_eq!(search("a", 2).len(), 2);
    }

    #[test]
    fn histogram_buckets_every_sample() {
        let series = close_series("TSLA", 100);
        let rendered = histogram(&series, 5);
        let total: usize = rendered.matches('#').count();
        assert_eq!(total, 100);
    }

    #[test]
    fn summary_handles_empty_series() {
        assert_eq!(summary_stats(&[]), "no data");
    }
}
