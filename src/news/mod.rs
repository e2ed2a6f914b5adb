// src/news/mod.rs
//! Flood news pipeline: fetch candidates → ranking assistant → parsed indices.

pub mod providers;
pub mod types;

use std::collections::HashSet;

use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PipelineError;
use crate::news::types::{Article, ArticleSource, NewsRanking};
use crate::ranking::{build_ranking_prompt, parse_indices, RankingAssistant};

/// Normalize a headline: decode HTML entities, strip tags, collapse whitespace.
pub fn normalize_title(s: &str) -> String {
    static RE_TAGS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, "");
    let quoted = stripped
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    RE_WS.replace_all(&quoted, " ").trim().to_string()
}

/// Drop indices that don't point into the candidate list, and repeats.
/// Order of the rest is kept: it is the ranking.
pub fn retain_valid_indices(indices: Vec<usize>, len: usize) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(indices.len());
    indices
        .into_iter()
        .filter(|&i| i < len && seen.insert(i))
        .collect()
}

/// Ask the assistant to pick the most relevant candidates. One attempt only.
///
/// Assistant failures and unparseable replies both yield
/// [`NewsRanking::unavailable`]; callers should show "no articles" rather than
/// guess an order. Only a failure to build the request is an error.
pub async fn rank_articles(
    candidates: Vec<Article>,
    assistant: &dyn RankingAssistant,
) -> Result<NewsRanking, PipelineError> {
    let prompt = build_ranking_prompt(&candidates)?;

    let t0 = std::time::Instant::now();
    let reply = assistant.complete(&prompt).await;
    histogram!("ranking_latency_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    let reply = match reply {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(
                target: "ranking",
                error = ?e,
                provider = assistant.provider_name(),
                "ranking assistant call failed"
            );
            counter!("ranking_assistant_errors_total").increment(1);
            return Ok(NewsRanking::unavailable());
        }
    };
    tracing::debug!(target: "ranking", reply = %reply, "ranking assistant reply");

    let Some(indices) = parse_indices(&reply) else {
        tracing::warn!(
            target: "ranking",
            provider = assistant.provider_name(),
            reply_len = reply.len(),
            "ranking reply not parseable"
        );
        counter!("ranking_unparseable_total").increment(1);
        return Ok(NewsRanking::unavailable());
    };

    let parsed = indices.len();
    let indices = retain_valid_indices(indices, candidates.len());
    if indices.len() != parsed {
        tracing::warn!(
            target: "ranking",
            parsed,
            kept = indices.len(),
            candidates = candidates.len(),
            "dropped out-of-range or repeated indices"
        );
    }
    if indices.is_empty() {
        counter!("ranking_unparseable_total").increment(1);
        return Ok(NewsRanking::unavailable());
    }

    let ranking = NewsRanking::ranked(candidates, indices);
    for a in ranking.picks() {
        tracing::debug!(target: "ranking", title = %a.title, source = %a.source, "picked article");
    }
    Ok(ranking)
}

/// Fetch candidates, then rank them. Source failures yield an unavailable ranking.
pub async fn fetch_ranked_news(
    source: &dyn ArticleSource,
    assistant: &dyn RankingAssistant,
) -> Result<NewsRanking, PipelineError> {
    let candidates = match source.fetch_candidates().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "news", error = ?e, source = source.name(), "news source error");
            counter!("news_source_errors_total").increment(1);
            return Ok(NewsRanking::unavailable());
        }
    };

    tracing::info!(target: "news", candidates = candidates.len(), source = source.name(), "fetched news candidates");
    if candidates.is_empty() {
        return Ok(NewsRanking::unavailable());
    }

    rank_articles(candidates, assistant).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_title_decodes_and_collapses() {
        let s = "  <b>Flash&nbsp;flood</b>   hits &amp; closes \u{201C}Main St\u{201D}  ";
        assert_eq!(normalize_title(s), r#"Flash flood hits & closes "Main St""#);
    }

    #[test]
    fn retain_valid_indices_keeps_order_and_drops_bad() {
        assert_eq!(retain_valid_indices(vec![3, 1, 9, 1, 0], 4), vec![3, 1, 0]);
        assert!(retain_valid_indices(vec![5, 6], 2).is_empty());
    }
}
