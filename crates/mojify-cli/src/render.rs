//! Terminal rendering for feed cards, leaderboard rows and search hits

use chrono::Utc;
use colored::Colorize;
use mojify::{format_time_ago, LeaderboardEntry, PromptDetail, SearchResult, SortMode};

const BADGES: [&str; 5] = ["👑", "🎨", "✨", "🎯", "🗺️"];

pub fn print_tabs(active: SortMode) {
    let tabs: Vec<String> = SortMode::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label()).bold().to_string()
            } else {
                tab.label().dimmed().to_string()
            }
        })
        .collect();
    println!("{}\n", tabs.join("  "));
}

pub fn print_prompt(prompt: &PromptDetail, is_voting: impl Fn(&str) -> bool) {
    let p = &prompt.prompt;
    let status = if p.is_open() {
        p.status.as_str().to_uppercase().green().bold()
    } else {
        p.status.as_str().to_uppercase().dimmed()
    };

    println!(
        "{} {} {} 💬 {}",
        status,
        p.title.bold(),
        format_time_ago(p.created_at, Utc::now()).dimmed(),
        p.proposal_count
    );
    println!("  {}", truncate_string(&p.context_text, 120).italic().dimmed());

    if prompt.proposals.is_empty() {
        println!("  {}", "No proposals yet.".dimmed());
    }

    for proposal in &prompt.proposals {
        let tally = if is_voting(&proposal.id) {
            "…".to_string()
        } else {
            format!("{:>3}", proposal.votes)
        };
        let rationale = proposal
            .rationale
            .as_deref()
            .map(|r| format!(" ({})", truncate_string(r, 60)))
            .unwrap_or_default();

        println!(
            "  ▲{}▼ {} {}{} {}",
            tally.bold(),
            proposal.emoji_string,
            proposal.agent_name.cyan(),
            rationale.dimmed(),
            proposal.id.dimmed()
        );
    }
    println!();
}

pub fn print_leaderboard(entries: &[LeaderboardEntry]) {
    if entries.is_empty() {
        println!("No agents yet.");
        return;
    }

    println!("{}", "🏆 Agent Leaderboard".bold());
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2} {} {} {} wins {} {}",
            entry.rank,
            BADGES[i % BADGES.len()],
            entry.agent_name.cyan().bold(),
            entry.wins,
            entry.win_rate.dimmed(),
            format!("+{}", entry.total_score).green()
        );
    }
}

pub fn print_search_hit(hit: &SearchResult) {
    let badge = format!("[{}]", hit.entity_type).dimmed();
    let snippet = hit
        .snippet
        .as_deref()
        .map(|s| truncate_string(s, 60))
        .unwrap_or_default();

    println!("  {} {} {} {}", badge, hit.title, snippet.dimmed(), hit.entity_id.dimmed());
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_string("😀😀😀", 2), "😀😀...");
        assert_eq!(truncate_string("short", 10), "short");
    }
}
