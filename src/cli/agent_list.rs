//! Agent listing
//!
//! Prints the built-in agent registry grouped by provider.

use std::error::Error;
use std::fmt::Write as _;

use crate::core::registry::{self, AgentDescriptor};

pub fn list_agents(current: &AgentDescriptor, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(registry::all())?);
    } else {
        print!("{}", format_agent_list(current));
    }
    Ok(())
}

pub fn format_agent_list(current: &AgentDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🤖 Available Agents");
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (provider, agents) in registry::grouped() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", provider.display_name());
        for agent in agents {
            let marker = if agent.id == current.id { "*" } else { " " };
            let badge = if agent.is_max { " [MAX]" } else { "" };
            let _ = writeln!(
                out,
                "  {marker} {:<28} {}{badge} - {}",
                agent.id, agent.name, agent.description
            );
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "* = default agent");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_marks_default_and_max_agents() {
        let output = format_agent_list(registry::default_agent());
        assert!(output.contains("OpenAI\n"));
        assert!(output.contains("Google Gemini\n"));
        let gpt_line = output
            .lines()
            .find(|line| line.contains("gpt-4o "))
            .expect("gpt-4o listed");
        assert!(gpt_line.starts_with("  * "));
        assert!(gpt_line.contains("[MAX]"));
        let opus_line = output
            .lines()
            .find(|line| line.contains("claude-3-opus-20240229"))
            .expect("opus listed");
        assert!(opus_line.starts_with("    "));
        assert!(!opus_line.contains("[MAX]"));
    }

    #[test]
    fn json_uses_registry_field_names() {
        let json = serde_json::to_value(registry::all()).expect("serialize");
        let first = &json[0];
        assert_eq!(first["id"], "gpt-4o");
        assert_eq!(first["provider"], "openai");
        assert_eq!(first["isMax"], true);
    }
}
