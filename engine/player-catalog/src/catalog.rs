use crate::error::CatalogError;
use crate::types::{Player, PlayerId, Position};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// Player Catalog - Read-only snapshot of players supplied by the fantasy service
///
/// Keeps the service's ordering for display and an id index for lookups.
/// The catalog is replaced wholesale on refresh, never patched.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    /// Players in the order the service returned them
    players: Vec<Player>,

    /// Map from player id to index in `players`
    index_by_id: HashMap<PlayerId, usize>,
}

impl PlayerCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a service snapshot
    ///
    /// Records with a negative price or an id already seen are skipped.
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Self {
        let mut catalog = Self::new();

        for player in players {
            if player.price < Decimal::ZERO {
                warn!(
                    "Skipping player {} ({}) with negative price {}",
                    player.name, player.id, player.price
                );
                continue;
            }

            if catalog.index_by_id.contains_key(&player.id) {
                warn!("Skipping duplicate player id {} ({})", player.id, player.name);
                continue;
            }

            catalog.index_by_id.insert(player.id, catalog.players.len());
            catalog.players.push(player);
        }

        catalog
    }

    /// Load a catalog from a JSON snapshot file (a list of players)
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self, CatalogError> {
        info!("Loading player catalog from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let players: Vec<Player> = serde_json::from_str(&json_content)?;
        let catalog = Self::from_players(players);

        info!("Loaded {} players into catalog", catalog.len());
        Ok(catalog)
    }

    /// Get a player by id
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.index_by_id.get(&id).map(|&index| &self.players[index])
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.index_by_id.contains_key(&id)
    }

    /// Current price of a player, zero when the id is not in the snapshot
    ///
    /// Selections can briefly reference players a refreshed catalog no longer
    /// lists, so a missing id contributes nothing to budget sums.
    pub fn price_of(&self, id: PlayerId) -> Decimal {
        self.get(id).map(|player| player.price).unwrap_or(Decimal::ZERO)
    }

    /// Sum of current prices for the given ids
    pub fn total_price<'a>(&self, ids: impl IntoIterator<Item = &'a PlayerId>) -> Decimal {
        ids.into_iter().map(|&id| self.price_of(id)).sum()
    }

    /// All players in service order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players grouped by position, every position present even when empty
    pub fn grouped_by_position(&self) -> BTreeMap<Position, Vec<&Player>> {
        let mut groups: BTreeMap<Position, Vec<&Player>> =
            Position::ALL.iter().map(|&position| (position, Vec::new())).collect();

        for player in &self.players {
            groups.entry(player.position).or_default().push(player);
        }

        groups
    }

    /// Search for players by partial name match
    pub fn search(&self, query: &str) -> Vec<&Player> {
        let query_lower = query.to_lowercase();
        self.players
            .iter()
            .filter(|player| player.name.to_lowercase().contains(&query_lower))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
