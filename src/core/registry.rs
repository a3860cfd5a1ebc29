//! Static registry of selectable agents.
//!
//! Descriptors carry no behavior; selecting one only changes which
//! descriptor the session tracks as current.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    #[serde(rename = "azure-openai")]
    AzureOpenAi,
    Gemini,
    #[serde(rename = "deepseek")]
    DeepSeek,
    Auto,
}

impl Provider {
    pub fn id(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::AzureOpenAi => "azure-openai",
            Provider::Gemini => "gemini",
            Provider::DeepSeek => "deepseek",
            Provider::Auto => "auto",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::AzureOpenAi => "Azure OpenAI",
            Provider::Gemini => "Google Gemini",
            Provider::DeepSeek => "DeepSeek",
            Provider::Auto => "Auto Select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub provider: Provider,
    #[serde(rename = "isMax")]
    pub is_max: bool,
}

const fn agent(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    provider: Provider,
    is_max: bool,
) -> AgentDescriptor {
    AgentDescriptor {
        id,
        name,
        description,
        provider,
        is_max,
    }
}

static AGENTS: [AgentDescriptor; 11] = [
    agent("gpt-4o", "GPT-4o", "Latest OpenAI model", Provider::OpenAi, true),
    agent("gpt-4-turbo", "GPT-4 Turbo", "Powerful OpenAI model", Provider::OpenAi, false),
    agent(
        "claude-3-5-sonnet-20240620",
        "Claude 3.5 Sonnet",
        "Latest Anthropic model",
        Provider::Anthropic,
        true,
    ),
    agent(
        "claude-3-opus-20240229",
        "Claude 3 Opus",
        "Most powerful Claude model",
        Provider::Anthropic,
        false,
    ),
    agent(
        "claude-3-sonnet-20240229",
        "Claude 3 Sonnet",
        "Balanced Claude model",
        Provider::Anthropic,
        false,
    ),
    agent("azure-gpt-4o", "Azure GPT-4o", "GPT-4o on Azure", Provider::AzureOpenAi, false),
    agent(
        "gemini-2.0-flash-exp",
        "Gemini 2.0 Flash",
        "Fast Google model",
        Provider::Gemini,
        false,
    ),
    agent("gemini-1.5-pro", "Gemini 1.5 Pro", "Powerful Google model", Provider::Gemini, false),
    agent("deepseek-v3", "DeepSeek V3", "Fast & affordable model", Provider::DeepSeek, false),
    agent(
        "deepseek-r1",
        "DeepSeek Reasoner",
        "Strong reasoning capabilities",
        Provider::DeepSeek,
        false,
    ),
    agent("auto", "Auto-select", "Best model for the task", Provider::Auto, false),
];

pub const DEFAULT_AGENT_ID: &str = "gpt-4o";

pub fn all() -> &'static [AgentDescriptor] {
    &AGENTS
}

pub fn find(id: &str) -> Option<&'static AgentDescriptor> {
    AGENTS.iter().find(|agent| agent.id.eq_ignore_ascii_case(id.trim()))
}

pub fn default_agent() -> &'static AgentDescriptor {
    &AGENTS[0]
}

/// Agents grouped by provider, in the order providers first appear.
pub fn grouped() -> Vec<(Provider, Vec<&'static AgentDescriptor>)> {
    let mut groups: Vec<(Provider, Vec<&'static AgentDescriptor>)> = Vec::new();
    for agent in AGENTS.iter() {
        match groups.iter_mut().find(|(provider, _)| *provider == agent.provider) {
            Some((_, members)) => members.push(agent),
            None => groups.push((agent.provider, vec![agent])),
        }
    }
    groups
}

/// Infer the vendor from a model identifier by prefix.
pub fn provider_for_model(model: &str) -> Option<Provider> {
    let model = model.trim().to_ascii_lowercase();
    if model.starts_with("gpt") || model.starts_with("text-davinci") {
        Some(Provider::OpenAi)
    } else if model.starts_with("claude") {
        Some(Provider::Anthropic)
    } else if model.starts_with("gemini") {
        Some(Provider::Gemini)
    } else if model.starts_with("deepseek") {
        Some(Provider::DeepSeek)
    } else if model.starts_with("azure-") {
        Some(Provider::AzureOpenAi)
    } else if model == "auto" {
        Some(Provider::Auto)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn grouping_preserves_provider_order() {
        let providers: Vec<Provider> = grouped().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            providers,
            vec![
                Provider::OpenAi,
                Provider::Anthropic,
                Provider::AzureOpenAi,
                Provider::Gemini,
                Provider::DeepSeek,
                Provider::Auto,
            ]
        );
        let anthropic = &grouped()[1].1;
        assert_eq!(anthropic.len(), 3);
    }

    #[test]
    fn default_agent_is_max_tier_gpt4o() {
        let agent = default_agent();
        assert_eq!(agent.id, DEFAULT_AGENT_ID);
        assert!(agent.is_max);
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("DeepSeek-R1").map(|a| a.name), Some("DeepSeek Reasoner"));
        assert!(find("llama-3").is_none());
    }

    #[test]
    fn registry_ids_map_back_to_their_provider() {
        for agent in all() {
            assert_eq!(provider_for_model(agent.id), Some(agent.provider), "{}", agent.id);
        }
        assert_eq!(provider_for_model("text-davinci-003"), Some(Provider::OpenAi));
        assert_eq!(provider_for_model("mistral-large"), None);
    }
}
