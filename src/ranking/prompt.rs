use crate::news::types::Article;

pub const MIN_PICKS: usize = 4;
pub const MAX_PICKS: usize = 6;

pub(crate) const RANKING_PROMPT_TEMPLATE: &str = r#"You are a helpful assistant. Your job is to return a JSON array that is valid JSON, and nothing else.
You will receive a list of news article objects (title, url, publishedAt, source). They were found by searching for flooding and heavy rain.

Pick the articles that either
1) describe a CURRENT flood or heavy-rain DISASTER in the United States, or
2) give information on flood events forecast to hit somewhere in the United States soon.

Select between {min} and {max} articles that best fit these criteria. Sort them so the most relevant article comes first.

Output: a JSON array of integer indices into the list below (0-based), most relevant first. Example: [3, 0, 7, 2]

ARTICLES:
{articles}
"#;

/// Build the instruction text for the ranking assistant, embedding the
/// candidates as a JSON array. Indices in the reply refer to this array.
pub fn build_ranking_prompt(articles: &[Article]) -> Result<String, serde_json::Error> {
    let listing = serde_json::to_string(articles)?;
    Ok(RANKING_PROMPT_TEMPLATE
        .replace("{min}", &MIN_PICKS.to_string())
        .replace("{max}", &MAX_PICKS.to_string())
        .replace("{articles}", &listing))
}
