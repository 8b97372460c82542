//! Terminal rendering for catalogs, roster checks and standings

use colored::*;
use fantasy_gateway::Standings;
use roster_engine::{
    LineupComposer, PlayerCatalog, PlayerId, RosterRules, SquadBuilder, ValidationResult,
};

pub fn print_catalog(catalog: &PlayerCatalog) {
    println!("{}", format!("📋 {} players", catalog.len()).cyan().bold());
    for (position, players) in catalog.grouped_by_position() {
        if players.is_empty() {
            continue;
        }
        println!();
        println!("{}", position.as_str().yellow().bold());
        for player in players {
            println!(
                "  {:>5}  {:<28} {:<4} {:>6.1}",
                player.id, player.name, player.team, player.price
            );
        }
    }
}

pub fn print_search(catalog: &PlayerCatalog, query: &str) {
    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("{}", format!("No players match \"{query}\"").yellow());
        return;
    }
    for player in matches {
        println!(
            "  {:>5}  {:<28} {:<4} {:<3} {:>6.1}",
            player.id, player.name, player.team, player.position, player.price
        );
    }
}

pub fn print_squad(squad: &SquadBuilder, catalog: &PlayerCatalog) {
    let rules = squad.rules();
    println!(
        "{}",
        format!(
            "🧾 Squad for {}: {}/{} players, {:.1} used, {:.1} left",
            squad.gameweek(),
            squad.current_selection().len(),
            rules.squad_size,
            squad.budget_used(catalog),
            squad.budget_remaining(catalog)
        )
        .cyan()
        .bold()
    );
    for &id in squad.current_selection() {
        println!("  {}", player_label(catalog, id));
    }
    print_validation("Squad", &squad.validate(catalog), rules);
}

pub fn print_lineup(lineup: &LineupComposer, catalog: &PlayerCatalog) {
    println!("{}", format!("🏈 Lineup for {}", lineup.gameweek()).cyan().bold());
    for &id in lineup.starters() {
        let mut label = player_label(catalog, id);
        if lineup.captain() == Some(id) {
            label.push_str(" (C)");
        } else if lineup.vice_captain() == Some(id) {
            label.push_str(" (VC)");
        }
        println!("  {label}");
    }
    for id in lineup.bench() {
        println!("  {}", format!("{} [bench]", player_label(catalog, id)).dimmed());
    }
    if let Some(chip) = lineup.chip() {
        println!("  Chip: {}", chip.code().magenta());
    }
    print_validation("Lineup", &lineup.validate(), lineup.rules());
}

pub fn print_validation(label: &str, result: &ValidationResult, rules: &RosterRules) {
    if result.is_valid() {
        println!("{}", format!("✅ {label} is ready to submit").green());
        return;
    }
    println!("{}", format!("❌ {label} is not ready:").red());
    for violation in result.violations() {
        println!("   {} {}", violation.code().red().bold(), violation.describe(rules));
    }
}

pub fn print_standings(standings: &Standings) {
    if standings.is_empty() {
        println!("{}", "No standings yet.".yellow());
        return;
    }
    println!("{}", format!("{:>4}  {:<30} {:>8}", "#", "Team", "Points").bold());
    for (rank, entry) in standings.ranked() {
        println!("{:>4}  {:<30} {:>8.1}", rank, entry.team_name, entry.points);
    }
}

fn player_label(catalog: &PlayerCatalog, id: PlayerId) -> String {
    match catalog.get(id) {
        Some(player) => format!(
            "{} {} ({}, {}) {:.1}",
            id, player.name, player.position, player.team, player.price
        ),
        None => format!("{id} (not in catalog)"),
    }
}
