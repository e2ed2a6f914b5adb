// src/ranking/mod.rs
//! Ranking assistant plumbing: outbound prompt, inbound reply parsing, providers.

pub mod assistant;
pub mod parse;
pub mod prompt;

pub use crate::ranking::assistant::{
    build_assistant, DisabledAssistant, DynRankingAssistant, MockAssistant, OpenAiAssistant,
    RankingAssistant,
};
pub use crate::ranking::parse::{parse_indices, strip_code_fences};
pub use crate::ranking::prompt::{build_ranking_prompt, MAX_PICKS, MIN_PICKS};
