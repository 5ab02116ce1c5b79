//! Narrative-generation collaborator client.
//!
//! The statistics engine hands this module a numeric stat bundle; this
//! module turns it into a prompt, posts it to an OpenAI-style endpoint,
//! and returns a short hype line. The collaborator is strictly optional:
//! any failure — missing API key, network error, malformed reply —
//! degrades to a fixed fallback line and never fails the request.

use std::time::Duration;

use serde::Deserialize;

use crate::config::CommentaryConfig;
use crate::service::MatchStatsBundle;

/// Line returned whenever the collaborator cannot produce commentary.
pub const FALLBACK_COMMENTARY: &str = "The crowd is ready!";

/// Minimal shape of the collaborator's reply.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// HTTP client for the commentary collaborator.
#[derive(Debug, Clone)]
pub struct CommentaryClient {
    http: reqwest::Client,
    config: CommentaryConfig,
}

impl CommentaryClient {
    /// Creates a client from configuration. A missing API key produces a
    /// client that always answers with the fallback line.
    #[must_use]
    pub fn new(config: CommentaryConfig) -> Self {
        let http = match reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "commentary client build failed, falling back to default client without timeout"
                );
                reqwest::Client::default()
            }
        };
        Self { http, config }
    }

    /// Produces a hype line for the given stat bundle.
    ///
    /// Infallible by contract: every failure path returns
    /// [`FALLBACK_COMMENTARY`].
    pub async fn hype(&self, bundle: &MatchStatsBundle) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::debug!("commentary disabled: no API key configured");
            return FALLBACK_COMMENTARY.to_string();
        };

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "user", "content": build_prompt(bundle) }
            ],
        });

        let result = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%err, "commentary collaborator unreachable");
                return FALLBACK_COMMENTARY.to_string();
            }
        };
        let parsed = match response.json::<CompletionResponse>().await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(%err, "commentary collaborator returned malformed reply");
                return FALLBACK_COMMENTARY.to_string();
            }
        };

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_COMMENTARY.to_string())
    }
}

/// Renders the stat bundle into the collaborator prompt.
///
/// The prompt is the collaborator's side of the boundary — it may spell
/// the percentages out, but the bundle itself carries them only as numeric
/// fields.
fn build_prompt(bundle: &MatchStatsBundle) -> String {
    let a = &bundle.fighter_a;
    let b = &bundle.fighter_b;
    let s = &bundle.stats;
    format!(
        "You are a high-energy pro-wrestling style commentator hyping up a \
         fighting-game tournament match.\n\
         \n\
         Fighters:\n\
         - Fighter 1: {a_name} using {a_char}\n\
         - Fighter 2: {b_name} using {b_char}\n\
         \n\
         Percentages (0-100):\n\
         \n\
         Overall records:\n\
         - Player {a_name} overall win rate: {uo_a:.0}%\n\
         - {a_name} as {a_char}: {fo_a:.0}%\n\
         - Character {a_char} overall: {co_a:.0}%\n\
         - Player {b_name} overall win rate: {uo_b:.0}%\n\
         - {b_name} as {b_char}: {fo_b:.0}%\n\
         - Character {b_char} overall: {co_b:.0}%\n\
         \n\
         Head-to-head:\n\
         - Player vs player: {a_name} vs {b_name}: {uh_a:.0}% / {uh_b:.0}%\n\
         - Fighter vs fighter: {fh_a:.0}% / {fh_b:.0}%\n\
         - Character vs character ({a_char} vs {b_char}): {ch_a:.0}% / {ch_b:.0}%\n\
         \n\
         Guidelines:\n\
         - Use an excited, pro-wrestling commentator tone.\n\
         - 1 to 3 sentences max.\n\
         - If one side is a clear favorite in a head-to-head stat, lean into \
           the favorite vs underdog story.\n\
         - Give hope to the underdog by mentioning at least one impressive \
           stat in their favor if possible.\n\
         - Do NOT mention percentages numerically. Refer to them \
           qualitatively.\n\
         \n\
         Now, give the hype intro for this upcoming match.",
        a_name = a.display_name,
        a_char = a.character_name,
        b_name = b.display_name,
        b_char = b.character_name,
        uo_a = s.user_overall_a,
        fo_a = s.fighter_overall_a,
        co_a = s.character_overall_a,
        uo_b = s.user_overall_b,
        fo_b = s.fighter_overall_b,
        co_b = s.character_overall_b,
        uh_a = s.user_head_to_head_a,
        uh_b = s.user_head_to_head_b,
        fh_a = s.fighter_head_to_head_a,
        fh_b = s.fighter_head_to_head_b,
        ch_a = s.character_head_to_head_a,
        ch_b = s.character_head_to_head_b,
    )
}
